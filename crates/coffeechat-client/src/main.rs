//! coffeechat CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use coffeechat_client::cli::{Cli, Command, ConfigAction};
use coffeechat_client::commands;
use coffeechat_client::config::ClientConfig;
use coffeechat_client::error::ClientResult;
use coffeechat_core::tracing::{TracingConfig, init_tracing};
use coffeechat_core::{Clock, parse_timezone};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> ClientResult<()> {
    let config = match cli.config {
        Some(ref path) => ClientConfig::load_from(path)?,
        None => ClientConfig::load()?,
    };

    let tracing_config = if cli.debug || config.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::default()
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: {}", e);
    }

    let mut options = config.to_resolver_options()?;
    if let Some(ref name) = cli.timezone {
        options.timezone = parse_timezone(name)?;
    }
    let now = cli.clock().now();
    tracing::debug!(%now, timezone = options.timezone.name(), "starting");

    match cli.command {
        Command::Status { ref matches, json } => {
            commands::status::run(matches, json, &config.reached_out_path(), options, now)
        }
        Command::Next { ref slots } => commands::next::run(slots, now, &options.timezone),
        Command::ReachOut { ref match_id } => {
            commands::reach_out::run(match_id, &config.reached_out_path())
        }
        Command::Config { ref action } => match action {
            ConfigAction::Dump => commands::config::dump(&config),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(),
        },
    }
}
