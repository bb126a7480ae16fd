//! Log output for the eventdeck binaries.
//!
//! Logs go to stderr so they never mix with command output on stdout.
//! `RUST_LOG` wins over the configured level unless an explicit directive is
//! given.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt as fmt_layer, prelude::*};

/// Crate targets the default level applies to.
const TARGETS: &[&str] = &["eventdeck_core", "eventdeck_host", "eventdeck"];

#[derive(Debug, Error)]
pub enum TracingError {
    #[error("a global tracing subscriber is already installed: {0}")]
    AlreadyInstalled(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("unknown log format {0:?} (expected compact or json)")]
    UnknownFormat(String),
}

/// How log lines are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingOutputFormat {
    #[default]
    Compact,
    /// One JSON object per line.
    Json,
}

impl FromStr for TracingOutputFormat {
    type Err = TracingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(TracingError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for TracingOutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Compact => "compact",
            Self::Json => "json",
        })
    }
}

/// Logging setup for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Level for eventdeck's own targets; everything else stays at WARN.
    pub level: Level,
    pub format: TracingOutputFormat,
    /// Source file and line on every event.
    pub locations: bool,
    pub timestamps: bool,
    /// Filter directive that replaces both `level` and `RUST_LOG`.
    pub directive: Option<String>,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::command()
    }
}

impl TracingConfig {
    /// One-shot commands: warnings only, no timestamps.
    pub fn command() -> Self {
        Self {
            level: Level::WARN,
            format: TracingOutputFormat::Compact,
            locations: false,
            timestamps: false,
            directive: None,
        }
    }

    /// Long-running commands (`live --watch`, `rotate`): driver start/stop
    /// and live-set changes are logged with timestamps.
    pub fn service() -> Self {
        Self {
            level: Level::INFO,
            timestamps: true,
            ..Self::command()
        }
    }

    /// Raises the level to DEBUG and adds source locations when `debug` is set.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        if debug {
            self.level = Level::DEBUG;
            self.locations = true;
        }
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: TracingOutputFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directive = Some(directive.into());
        self
    }

    /// The directive used when neither `directive` nor `RUST_LOG` is set.
    pub fn default_directive(&self) -> String {
        let level = self.level.as_str().to_ascii_lowercase();
        let mut directive = String::from("warn");
        for target in TARGETS {
            directive.push_str(&format!(",{target}={level}"));
        }
        directive
    }

    /// Builds the filter: explicit directive, then `RUST_LOG`, then the default.
    pub fn filter(&self) -> Result<EnvFilter, TracingError> {
        if let Some(directive) = &self.directive {
            return Ok(EnvFilter::try_new(directive)?);
        }
        Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_directive())))
    }
}

/// Installs the global subscriber. Call once, before any work starts.
///
/// # Errors
///
/// Fails if a subscriber is already installed or the directive does not parse.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let filter = config.filter()?;

    let compact = (config.format == TracingOutputFormat::Compact).then(|| {
        let layer = fmt_layer::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(config.locations)
            .with_file(config.locations)
            .with_line_number(config.locations);
        if config.timestamps {
            layer.boxed()
        } else {
            layer.without_time().boxed()
        }
    });
    let json = (config.format == TracingOutputFormat::Json).then(|| {
        fmt_layer::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_file(config.locations)
            .with_line_number(config.locations)
    });

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(compact)
        .with(json);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
