//! Command-line interface definition.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand, ValueEnum};
use eventdeck_core::{ALL_CATEGORIES, EventStatus, TracingOutputFormat};

/// eventdeck - events, live status and carousels for a community site
#[derive(Debug, Parser)]
#[command(name = "eventdeck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the site file
    #[arg(long, short, global = true, env = "EVENTDECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Log line format on stderr (compact or json)
    #[arg(long, global = true, env = "EVENTDECK_LOG_FORMAT", default_value_t)]
    pub log_format: TracingOutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List events
    Events {
        /// Only show this category ("all" for every event)
        #[arg(long, default_value = ALL_CATEGORIES)]
        category: String,

        /// Only show events with this status
        #[arg(long, value_enum)]
        status: Option<StatusArg>,

        #[command(flatten)]
        at: AtArg,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show events happening now
    Live {
        #[command(flatten)]
        at: AtArg,

        /// Keep running and print whenever the live set changes
        #[arg(long, conflicts_with = "at")]
        watch: bool,
    },

    /// Show the next upcoming event
    Next {
        #[command(flatten)]
        at: AtArg,
    },

    /// Show the resolved start and end of an event
    Window {
        /// Event id
        id: u32,
    },

    /// List the team for a year
    Team {
        /// Roster year (defaults to the configured or latest year)
        #[arg(long)]
        year: Option<String>,
    },

    /// Run a carousel and print each item as it comes up
    Rotate {
        /// Rotate the team of this year
        #[arg(long, conflicts_with = "gallery")]
        year: Option<String>,

        /// Rotate the gallery instead of the team
        #[arg(long)]
        gallery: bool,

        /// Stop after this many transitions
        #[arg(long, default_value_t = 5)]
        count: usize,

        /// Override the auto-advance period
        #[arg(long)]
        interval_ms: Option<u64>,
    },

    /// Inspect the site configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

impl Command {
    /// Whether the command keeps running until interrupted or done rotating.
    pub fn is_long_running(&self) -> bool {
        matches!(self, Self::Live { watch: true, .. } | Self::Rotate { .. })
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective site as TOML
    Dump,
    /// Check the site for problems
    Validate,
    /// Print the default site file path
    Path,
}

/// Reference instant override shared by the listing commands.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct AtArg {
    /// Evaluate at this local time instead of now (YYYY-MM-DD[THH:MM[:SS]])
    #[arg(long, value_parser = parse_at)]
    pub at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Upcoming,
    Past,
}

impl From<StatusArg> for EventStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Upcoming => EventStatus::Upcoming,
            StatusArg::Past => EventStatus::Past,
        }
    }
}

const AT_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parses an `--at` value; a bare date means midnight.
pub fn parse_at(value: &str) -> Result<NaiveDateTime, String> {
    let value = value.trim();
    AT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .map(eventdeck_core::time::start_of_day)
        })
        .ok_or_else(|| format!("expected YYYY-MM-DD[THH:MM[:SS]], got {value:?}"))
}
