//! Authentication check.

use tracing::info;

use crate::config::{AppConfig, CredentialOverrides};
use crate::error::{CliError, CliResult};

/// Exchanges the refresh token once and reports whether it worked.
pub async fn check(config: &AppConfig, overrides: &CredentialOverrides) -> CliResult<()> {
    let client = super::build_client(config, overrides)?;

    if !client.test_auth().await {
        return Err(CliError::AuthFailed);
    }

    info!("Google authentication succeeded");
    println!("Authentication successful.");
    Ok(())
}
