// ABOUTME: Environment-only configuration for the workout logging core
// ABOUTME: Reads DATABASE_URL and logging settings from environment variables with defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment-based configuration.
//!
//! Configuration comes exclusively from environment variables; there is no
//! config file. Every variable has a development-friendly default so the crate
//! works out of the box against a local SQLite file.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Default SQLite database location
const DEFAULT_DATABASE_URL: &str = "sqlite:./data/ironlog.db";

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback to `Info`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }

    /// String form used in env vars and filters
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Runtime configuration for the workout logging core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database connection URL (`sqlite:` path or `sqlite::memory:`)
    pub database_url: String,
    /// Log level for the tracing subscriber
    pub log_level: LogLevel,
    /// Emit JSON-formatted logs instead of the pretty format
    pub json_logs: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Recognized variables: `DATABASE_URL`, `LOG_LEVEL` (error/warn/info/
    /// debug/trace), `LOG_FORMAT` (`json` switches to structured output).
    ///
    /// # Errors
    ///
    /// Currently infallible in practice; returns `Result` so callers keep a
    /// stable signature as validation grows.
    pub fn from_env() -> Result<Self> {
        let database_url = env_var_or_default("DATABASE_URL", DEFAULT_DATABASE_URL);
        let log_level = LogLevel::from_str_or_default(&env_var_or_default("LOG_LEVEL", "info"));
        let json_logs = env_var_or_default("LOG_FORMAT", "pretty").eq_ignore_ascii_case("json");

        Ok(Self {
            database_url,
            log_level,
            json_logs,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.into(),
            log_level: LogLevel::Info,
            json_logs: false,
        }
    }
}

/// Read an environment variable with a fallback default
fn env_var_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str_or_default("DEBUG"), LogLevel::Debug);
        assert_eq!(LogLevel::from_str_or_default("warn"), LogLevel::Warn);
        assert_eq!(LogLevel::from_str_or_default("bogus"), LogLevel::Info);
    }

    #[test]
    fn test_log_level_round_trip() {
        for level in [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ] {
            assert_eq!(LogLevel::from_str_or_default(level.as_str()), level);
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(!config.json_logs);
    }
}
