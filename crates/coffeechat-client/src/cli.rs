//! Command-line interface definition.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use coffeechat_core::{AvailabilitySlot, Clock, FixedClock, SystemClock};

/// coffeechat - Where each of your one-on-one matches stands
#[derive(Debug, Parser)]
#[command(name = "coffeechat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "COFFEECHAT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Reference timezone (IANA name), overriding the configuration
    #[arg(long, global = true)]
    pub timezone: Option<String>,

    /// Pretend the current time is this RFC 3339 instant
    #[arg(long, global = true)]
    pub now: Option<DateTime<Utc>>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Returns the clock commands should read: pinned by `--now`, else the
    /// system clock.
    pub fn clock(&self) -> Box<dyn Clock> {
        match self.now {
            Some(now) => Box::new(FixedClock::new(now)),
            None => Box::new(SystemClock),
        }
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the chat status of every match in a JSON file
    Status {
        /// JSON array of match records as returned by the backend
        matches: PathBuf,

        /// Output JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the next time matching a weekly availability
    Next {
        /// Weekly slot such as `wednesday@14:30` (can be repeated)
        #[arg(long = "slot", action = clap::ArgAction::Append)]
        slots: Vec<AvailabilitySlot>,
    },

    /// Record that you proposed a time for a match
    ReachOut {
        /// Match identifier
        match_id: String,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
