//! Tracing subscriber setup for the CLI.
//!
//! `RUST_LOG` wins over the configured level when it is set, unless debug
//! output was requested explicitly.

use clap::ValueEnum;
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Errors that can occur during tracing initialization
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to set global tracing subscriber: {0}")]
    SetGlobalSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("failed to parse env filter: {0}")]
    EnvFilter(#[from] tracing_subscriber::filter::ParseError),
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Multi-line human-readable output
    Pretty,
    /// Single-line output (default)
    #[default]
    Compact,
    /// One JSON object per line, for log shippers
    Json,
}

/// Logging options derived from flags and config.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: Level,
    pub format: LogFormat,
    /// Ignore `RUST_LOG` and use `level` as is.
    pub force_level: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::Compact,
            force_level: false,
        }
    }
}

impl LoggingConfig {
    #[must_use]
    pub fn debug(format: LogFormat) -> Self {
        Self {
            level: Level::DEBUG,
            format,
            force_level: true,
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Filter directive used when `RUST_LOG` does not apply.
    pub fn directive(&self) -> String {
        let level = self.level.to_string().to_lowercase();
        format!("incident_meet={level},incident_meet_google={level}")
    }
}

/// Installs the global subscriber. Call once, at startup.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let env_filter = if config.force_level {
        EnvFilter::try_new(config.directive())?
    } else {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(config.directive())?,
        }
    };

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.format {
        LogFormat::Pretty => {
            tracing::subscriber::set_global_default(registry.with(fmt::layer().pretty()))?
        }
        LogFormat::Compact => tracing::subscriber::set_global_default(
            registry.with(fmt::layer().compact().with_target(false)),
        )?,
        LogFormat::Json => {
            tracing::subscriber::set_global_default(registry.with(fmt::layer().json()))?
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert_eq!(config.format, LogFormat::Compact);
        assert!(!config.force_level);
    }

    #[test]
    fn debug_config_forces_level() {
        let config = LoggingConfig::debug(LogFormat::Json);
        assert_eq!(config.level, Level::DEBUG);
        assert_eq!(config.format, LogFormat::Json);
        assert!(config.force_level);
    }

    #[test]
    fn directive_covers_both_crates() {
        let directive = LoggingConfig::default().directive();
        assert_eq!(directive, "incident_meet=info,incident_meet_google=info");
        assert!(EnvFilter::try_new(directive).is_ok());
    }
}
