//! Configuration commands.

use crate::config::{AppConfig, CredentialOverrides};
use crate::error::{CliError, CliResult};

/// Prints the loaded configuration as TOML with literal secrets masked.
pub fn dump(config: &AppConfig) -> CliResult<()> {
    let rendered = toml::to_string_pretty(&config.redacted())
        .map_err(|e| CliError::Config(format!("failed to render config: {}", e)))?;
    print!("{}", rendered);
    Ok(())
}

/// Resolves every credential and validates the resulting client config.
pub fn validate(config: &AppConfig, overrides: &CredentialOverrides) -> CliResult<()> {
    config.google.to_meet_config(overrides)?.validate()?;
    println!("Configuration is valid.");
    Ok(())
}

/// Prints the default configuration path.
pub fn path() -> CliResult<()> {
    println!("{}", AppConfig::default_path().display());
    Ok(())
}
