//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::CredentialOverrides;
use crate::logging::LogFormat;

/// incident-meet - open a Google Meet room for an incident
#[derive(Debug, Parser)]
#[command(name = "incident-meet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, global = true, env = "INCIDENT_MEET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// OAuth client ID
    #[arg(long, global = true, env = "GOOGLE_CLIENT_ID", hide_env_values = true)]
    pub client_id: Option<String>,

    /// OAuth client secret
    #[arg(long, global = true, env = "GOOGLE_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// OAuth refresh token for the calendar owner
    #[arg(long, global = true, env = "GOOGLE_REFRESH_TOKEN", hide_env_values = true)]
    pub refresh_token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Credentials given as flags or environment variables.
    pub fn credential_overrides(&self) -> CredentialOverrides {
        CredentialOverrides {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            refresh_token: self.refresh_token.clone(),
        }
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check that the credentials yield an access token
    Auth,

    /// Create a Google Meet room for an incident and print its URL
    Create {
        /// Incident name, used as the calendar event title
        incident: String,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration with secrets masked
    Dump,

    /// Validate configuration and resolve secret references
    Validate,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_create() {
        let cli = Cli::try_parse_from(["incident-meet", "create", "Database outage"]).unwrap();
        match cli.command {
            Command::Create { incident } => assert_eq!(incident, "Database outage"),
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.log_format, LogFormat::Compact);
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "incident-meet",
            "auth",
            "-v",
            "--log-format",
            "json",
            "--refresh-token",
            "1//abc",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Auth));
        assert!(cli.debug);
        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(
            cli.credential_overrides().refresh_token.as_deref(),
            Some("1//abc")
        );
    }

    #[test]
    fn parse_config_action() {
        let cli = Cli::try_parse_from(["incident-meet", "config", "path"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config {
                action: ConfigAction::Path
            }
        ));
    }

    #[test]
    fn create_requires_incident() {
        assert!(Cli::try_parse_from(["incident-meet", "create"]).is_err());
    }
}
