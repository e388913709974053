//! Configuration types.

use std::path::PathBuf;

use crate::error::{ConfigError, Result};
use crate::wizard::copy::DEFAULT_COPY_FEEDBACK_MS;

/// Application configuration, built from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Port for the HTTP/WebSocket server.
    pub port: u16,
    /// Whether to run the stdin REPL alongside the server.
    pub cli_enabled: bool,
    /// How long the "Copied!" marker stays visible, in milliseconds.
    pub copy_feedback_ms: u32,
    /// Whether resetting mid-call needs confirmation.
    pub confirm_reset: bool,
    /// Directory for daily log files. Logs go to stderr only when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            cli_enabled: true,
            copy_feedback_ms: DEFAULT_COPY_FEEDBACK_MS,
            confirm_reset: true,
            log_dir: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self::from_lookup(|key| std::env::var(key).ok())?)
    }

    /// Build config from any key lookup. Unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> std::result::Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match lookup("CALL_SCRIPT_PORT") {
            Some(v) => parse_number("CALL_SCRIPT_PORT", &v)?,
            None => defaults.port,
        };

        let cli_enabled = match lookup("CALL_SCRIPT_CLI") {
            Some(v) => parse_bool("CALL_SCRIPT_CLI", &v)?,
            None => defaults.cli_enabled,
        };

        let copy_feedback_ms = match lookup("CALL_SCRIPT_COPY_FEEDBACK_MS") {
            Some(v) => parse_number("CALL_SCRIPT_COPY_FEEDBACK_MS", &v)?,
            None => defaults.copy_feedback_ms,
        };

        let confirm_reset = match lookup("CALL_SCRIPT_CONFIRM_RESET") {
            Some(v) => parse_bool("CALL_SCRIPT_CONFIRM_RESET", &v)?,
            None => defaults.confirm_reset,
        };

        let log_dir = lookup("CALL_SCRIPT_LOG_DIR")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            port,
            cli_enabled,
            copy_feedback_ms,
            confirm_reset,
            log_dir,
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> std::result::Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("{value:?}: {e}"),
        })
}

fn parse_bool(key: &str, value: &str) -> std::result::Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("{value:?} is not a boolean"),
        }),
    }
}
