// ABOUTME: Logging configuration and tracing subscriber setup
// ABOUTME: Builds an env-filtered subscriber with pretty, compact, or JSON output
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structured logging setup built on `tracing`.

use crate::config::{Config, LogLevel};
use anyhow::Result;
use std::env;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON format for production logging
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for space-constrained environments
    Compact,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Base log level applied when `RUST_LOG` is unset
    pub level: LogLevel,
    /// Output format
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    /// Derive logging configuration from the crate [`Config`]
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            level: config.log_level,
            format: if config.json_logs {
                LogFormat::Json
            } else {
                LogFormat::Pretty
            },
            include_location: env::var("LOG_INCLUDE_LOCATION").is_ok(),
        }
    }

    /// Initialize the global tracing subscriber.
    ///
    /// `RUST_LOG` overrides the configured level when set; sqlx query logs are
    /// capped at `info` either way.
    ///
    /// # Errors
    ///
    /// Returns an error if a subscriber is already installed.
    pub fn init(&self) -> Result<()> {
        let env_filter = env::var("RUST_LOG")
            .map_or_else(
                |_| EnvFilter::new(self.level.as_str()),
                |directive| EnvFilter::new(directive),
            )
            .add_directive(
                "sqlx=info"
                    .parse()
                    .unwrap_or_else(|_| tracing::Level::INFO.into()),
            );

        let registry = tracing_subscriber::registry().with(env_filter);

        match self.format {
            LogFormat::Json => registry
                .with(
                    fmt::layer()
                        .with_file(self.include_location)
                        .with_line_number(self.include_location)
                        .with_target(true)
                        .json(),
                )
                .try_init()?,
            LogFormat::Pretty => registry
                .with(
                    fmt::layer()
                        .with_file(self.include_location)
                        .with_line_number(self.include_location)
                        .with_target(true),
                )
                .try_init()?,
            LogFormat::Compact => registry
                .with(
                    fmt::layer()
                        .compact()
                        .with_file(false)
                        .with_line_number(false)
                        .with_target(false),
                )
                .try_init()?,
        }

        tracing::debug!(level = self.level.as_str(), "logging initialized");
        Ok(())
    }
}

/// Initialize logging from environment-derived configuration.
///
/// # Errors
///
/// Returns an error if configuration fails to load or a subscriber is already
/// installed.
pub fn init_from_env() -> Result<()> {
    let config = Config::from_env()?;
    LoggingConfig::from_config(&config).init()
}
