//! Meeting creation.

use crate::config::{AppConfig, CredentialOverrides};
use crate::error::CliResult;

/// Creates a Meet room for `incident` and prints its URL on stdout.
pub async fn create(
    incident: &str,
    config: &AppConfig,
    overrides: &CredentialOverrides,
) -> CliResult<()> {
    let client = super::build_client(config, overrides)?;
    let url = client.try_create_meeting(incident).await?;
    println!("{}", url);
    Ok(())
}
