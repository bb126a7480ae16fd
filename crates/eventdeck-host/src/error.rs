//! Host error types.

use std::io;
use std::path::PathBuf;

use eventdeck_core::DateParseError;
use thiserror::Error;

/// Result type for host operations.
pub type HostResult<T> = Result<T, HostError>;

/// Errors that can occur in the host.
#[derive(Debug, Error)]
pub enum HostError {
    /// The site file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The site file is not valid TOML for a site.
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The site could not be rendered back to TOML.
    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// The site parsed but is inconsistent.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// No roster for the requested year.
    #[error("no team roster for year {year}")]
    UnknownYear { year: String },

    /// No event with the requested id.
    #[error("no event with id {id}")]
    UnknownEvent { id: u32 },

    /// An event's dates could not be resolved.
    #[error("event {id} has no usable window: {source}")]
    EventWindow {
        id: u32,
        #[source]
        source: DateParseError,
    },

    /// The driver task behind a handle has exited.
    #[error("{what} is no longer running")]
    Stopped { what: &'static str },

    /// JSON output failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HostError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an unknown year error.
    pub fn unknown_year(year: impl Into<String>) -> Self {
        Self::UnknownYear { year: year.into() }
    }

    pub(crate) fn stopped(what: &'static str) -> Self {
        Self::Stopped { what }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = HostError::ConfigRead {
            path: PathBuf::from("/tmp/site.toml"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "failed to read config /tmp/site.toml: missing");
        assert_eq!(
            HostError::unknown_year("1999").to_string(),
            "no team roster for year 1999"
        );
        assert_eq!(
            HostError::stopped("carousel driver").to_string(),
            "carousel driver is no longer running"
        );

        let err = HostError::EventWindow {
            id: 4,
            source: DateParseError::UnrecognizedDate {
                input: "TBA".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "event 4 has no usable window: unrecognized date: \"TBA\""
        );
    }
}
