#![forbid(unsafe_code)]

//! Subscriber setup: plain or JSON lines on stderr, filtered by
//! `--log-level` unless `FHYPH_LOG` holds a filter directive.

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

use crate::error::{CliError, Result};

/// Environment variable that overrides `--log-level`.
pub const LOG_ENV: &str = "FHYPH_LOG";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    #[must_use]
    pub fn directive(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

fn filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level.directive()))
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(level: LogLevel, json: bool) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_writer(std::io::stderr)
        .with_target(false);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|error| CliError::Logging {
        message: error.to_string(),
    })
}
