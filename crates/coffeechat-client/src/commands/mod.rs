//! Subcommand implementations.

pub mod config;
pub mod next;
pub mod reach_out;
pub mod status;
