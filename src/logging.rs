//! Structured logging via the `tracing` crate.
//!
//! Log events go to stderr so command output on stdout stays clean. The
//! `STAMPFS_LOG` environment variable takes precedence over configured
//! levels and accepts any `tracing_subscriber::EnvFilter` directive.

use crate::error::StampError;
use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration, usually loaded from the `[logging]` table of
/// `stampfs.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Enable colored output (text format only)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            color: default_true(),
        }
    }
}

/// Initialize the global subscriber. Call once, early in `main`.
pub fn init_logging(config: &LoggingConfig) -> Result<(), StampError> {
    let filter = EnvFilter::try_from_env("STAMPFS_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let base = Registry::default().with(filter);

    match config.format.as_str() {
        "json" => base
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
        "text" => base
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(config.color)
                    .with_writer(std::io::stderr),
            )
            .init(),
        other => {
            return Err(StampError::Config(format!(
                "invalid log format: {other} (must be 'json' or 'text')"
            )))
        }
    }

    Ok(())
}
