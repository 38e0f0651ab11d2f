//! Logging System
//!
//! Structured logging setup using the `tracing` crate. [`LoggingConfig`] is itself a
//! loadable record, so applications can embed it as a section of their own configuration
//! and pass the loaded value to [`init_logging`].

use crate::error::LoggingError;
use serde::{Deserialize, Serialize};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Environment variable holding a full filter directive; wins over [`LoggingConfig::level`]
pub const LOG_FILTER_ENV: &str = "TIERCFG_LOG";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive: trace, debug, info, warn, error, off
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
    "info".to_string()
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

crate::env_record!(LoggingConfig {
    level = "LOG_LEVEL",
    format = "LOG_FORMAT",
    color = "LOG_COLOR",
});

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Initialize the global tracing subscriber.
///
/// Fails if the configuration is invalid or a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = build_env_filter(config)?;
    let format = parse_format(&config.format)?;
    let base_subscriber = Registry::default().with(filter);

    let result = match format {
        LogFormat::Json => base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Text => base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(config.color)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    result.map_err(|e| LoggingError::Init(e.to_string()))
}

/// Build the filter from `TIERCFG_LOG`, falling back to the configured level.
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_FILTER_ENV) {
        return Ok(filter);
    }
    parse_filter(&config.level)
}

fn parse_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(level).map_err(|e| LoggingError::InvalidDirective(format!("{}: {}", level, e)))
}

fn parse_format(format: &str) -> Result<LogFormat, LoggingError> {
    match format {
        "text" => Ok(LogFormat::Text),
        "json" => Ok(LogFormat::Json),
        other => Err(LoggingError::InvalidFormat(other.to_string())),
    }
}
