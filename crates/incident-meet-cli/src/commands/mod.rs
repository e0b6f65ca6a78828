//! Subcommand implementations.

pub mod auth;
pub mod config;
pub mod meeting;

use incident_meet_google::GoogleMeetClient;

use crate::config::{AppConfig, CredentialOverrides};
use crate::error::CliResult;

/// Builds the Google client from the merged configuration.
pub(crate) fn build_client(
    config: &AppConfig,
    overrides: &CredentialOverrides,
) -> CliResult<GoogleMeetClient> {
    let meet_config = config.google.to_meet_config(overrides)?;
    Ok(GoogleMeetClient::new(meet_config)?)
}
