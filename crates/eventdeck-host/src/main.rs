//! eventdeck CLI entry point.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use eventdeck_core::{Clock, SystemClock, TracingConfig, init_tracing};

use eventdeck_host::cli::{AtArg, Cli, Command, ConfigAction};
use eventdeck_host::commands;
use eventdeck_host::config::SiteConfig;
use eventdeck_host::error::HostResult;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => SiteConfig::load_from(path),
        None => SiteConfig::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let tracing = if cli.command.is_long_running() {
        TracingConfig::service()
    } else {
        TracingConfig::command()
    };
    let tracing = tracing
        .with_debug(cli.debug || config.debug)
        .with_format(cli.log_format);
    if let Err(e) = init_tracing(tracing) {
        eprintln!("warning: {}", e);
    }

    match run(cli.command, &config, cli.config.as_deref()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn now_or(at: AtArg) -> chrono::NaiveDateTime {
    at.at.unwrap_or_else(|| SystemClock.now())
}

async fn run(command: Command, config: &SiteConfig, source: Option<&Path>) -> HostResult<()> {
    match command {
        Command::Events {
            category,
            status,
            at,
            json,
        } => commands::events::list(config, &category, status.map(Into::into), now_or(at), json),
        Command::Live { watch: true, .. } => commands::events::watch_live(config).await,
        Command::Live { at, .. } => commands::events::live(config, now_or(at)),
        Command::Next { at } => commands::events::next(config, now_or(at)),
        Command::Window { id } => commands::events::window(config, id),
        Command::Team { year } => commands::team::team(config, year.as_deref()),
        Command::Rotate {
            year,
            gallery,
            count,
            interval_ms,
        } => commands::rotate::rotate(config, year.as_deref(), gallery, count, interval_ms).await,
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(config, source),
            ConfigAction::Validate => commands::config::validate(config),
            ConfigAction::Path => commands::config::path(),
        },
    }
}
