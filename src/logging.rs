//! Logging setup built on `tracing-subscriber`.
//!
//! `RUST_LOG` always wins. Without it the level comes from the CLI flags:
//! `-q` → error, default → info, `-v` → debug, `-vv` → trace.
//! Logs are written to stderr so stdout stays clean for command output.

use crate::error::{Result, TrackerError};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = TrackerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(TrackerError::Config(format!("invalid log format: {other}"))),
        }
    }
}

/// Level directive for the given verbosity flags.
#[must_use]
pub const fn level_for(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(verbose: u8, quiet: bool, format: Option<LogFormat>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbose, quiet)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match format.unwrap_or_default() {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|e| {
        TrackerError::Other(anyhow::anyhow!(
            "failed to initialize tracing subscriber: {e}"
        ))
    })
}

static TEST_LOGGING: Once = Once::new();

/// Install a test-friendly subscriber once per process.
///
/// Output goes through the test writer so it is captured per test.
pub fn init_test_logging() {
    TEST_LOGGING.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
