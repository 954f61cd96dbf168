//! Logging System
//!
//! Structured logging using the `tracing` crate. Logs always go to stderr so that
//! stdout carries nothing but command output, which keeps `--output json` parseable.

use crate::error::StateError;
use serde::{Deserialize, Serialize};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Environment variable holding a full `EnvFilter` directive.
pub const LOG_ENV: &str = "HUB_STATE_LOG";

/// Environment variable selecting the log format.
pub const LOG_FORMAT_ENV: &str = "HUB_STATE_LOG_FORMAT";

/// Directive applied by `--verbose`: request/response tracing from the client and
/// the HTTP stack.
const VERBOSE_DIRECTIVE: &str = "hub_state=debug,reqwest=debug";

/// Logging configuration
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

/// Initialize the logging system
///
/// Priority order (highest to lowest):
/// 1. `HUB_STATE_LOG` / `HUB_STATE_LOG_FORMAT`
/// 2. `--verbose`
/// 3. Configuration (file, `HUB_STATE_LOGGING__*`, `--log-level`, `--log-format`)
/// 4. Defaults
pub fn init_logging(config: &LoggingConfig, verbose: bool) -> Result<(), StateError> {
    let filter = build_env_filter(config, verbose)?;
    let format = determine_format(config)?;
    let base_subscriber = Registry::default().with(filter);

    if format == "json" {
        base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .map_err(|e| StateError::Config(format!("Failed to initialize logging: {}", e)))?;
    } else {
        base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(config.color)
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .map_err(|e| StateError::Config(format!("Failed to initialize logging: {}", e)))?;
    }

    Ok(())
}

/// Build environment filter from config or environment variables
fn build_env_filter(config: &LoggingConfig, verbose: bool) -> Result<EnvFilter, StateError> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return Ok(filter);
    }

    let level = config.level.as_str();
    if level == "off" && !verbose {
        return Ok(EnvFilter::new("off"));
    }
    validate_level(level)?;

    let mut filter = EnvFilter::new(level);
    if verbose {
        for directive in VERBOSE_DIRECTIVE.split(',') {
            filter = filter.add_directive(directive.parse().map_err(|e| {
                StateError::Config(format!("Invalid log directive: {}", e))
            })?);
        }
    }
    Ok(filter)
}

fn validate_level(level: &str) -> Result<(), StateError> {
    match level {
        "trace" | "debug" | "info" | "warn" | "error" | "off" => Ok(()),
        _ => Err(StateError::Config(format!(
            "Invalid log level: {} (must be one of trace, debug, info, warn, error, off)",
            level
        ))),
    }
}

/// Determine output format from config or environment
fn determine_format(config: &LoggingConfig) -> Result<String, StateError> {
    if let Ok(format) = std::env::var(LOG_FORMAT_ENV) {
        if format == "json" || format == "text" {
            return Ok(format);
        }
    }

    let format = config.format.as_str();
    if format != "json" && format != "text" {
        return Err(StateError::Config(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            format
        )));
    }

    Ok(format.to_string())
}
