//! CLI, configuration, reached-out store
//!
//! This crate provides the `coffeechat` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod store;

pub use cli::Cli;
pub use error::{ClientError, ClientResult};
pub use store::FileReachedOutStore;
