//! CLI configuration.
//!
//! Settings live in `~/.config/incident-meet/config.toml` by default:
//!
//! ```toml
//! [google]
//! client_id = "1234.apps.googleusercontent.com"
//! client_secret = "pass::google/incident-bot/secret"
//! refresh_token = "env::GOOGLE_REFRESH_TOKEN"
//! ```
//!
//! Credential values support secret references (see [`crate::secret`]).
//! Command line flags win over the file.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use incident_meet_google::{MeetConfig, OAuthCredentials};
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};
use crate::secret::{self, SecretRef};

const REDACTED: &str = "<redacted>";

/// Top-level contents of `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Debug logging.
    pub debug: bool,

    /// Google API settings.
    pub google: GoogleSettings,
}

/// The `[google]` table.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleSettings {
    /// OAuth client ID (supports `pass::` and `env::` prefixes).
    pub client_id: Option<String>,

    /// OAuth client secret (supports `pass::` and `env::` prefixes).
    pub client_secret: Option<String>,

    /// Refresh token (supports `pass::` and `env::` prefixes).
    pub refresh_token: Option<String>,

    /// Redirect URI registered for the OAuth client. Not sent at runtime.
    pub redirect_uri: Option<String>,

    /// Calendar to insert incident events into. Defaults to `primary`.
    pub calendar_id: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,

    /// Override for the OAuth token endpoint.
    pub token_url: Option<String>,

    /// Override for the Calendar API base URL.
    pub calendar_api_base: Option<String>,
}

/// Credentials given on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct CredentialOverrides {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub refresh_token: Option<String>,
}

impl AppConfig {
    /// Loads the default config file, or defaults when it does not exist.
    pub fn load() -> CliResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> CliResult<Self> {
        toml::from_str(content).map_err(|e| CliError::Config(format!("failed to parse config: {}", e)))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("incident-meet")
            .join("config.toml")
    }

    /// Returns a copy safe to print: literal secrets are masked, references
    /// are kept so the user can see where values come from.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.google.client_secret = mask(&self.google.client_secret);
        copy.google.refresh_token = mask(&self.google.refresh_token);
        copy
    }
}

/// Replaces a literal secret with [`REDACTED`]; references pass through.
fn mask(value: &Option<String>) -> Option<String> {
    value.as_ref().map(|v| {
        if SecretRef::parse(v).is_reference() {
            v.clone()
        } else {
            REDACTED.to_string()
        }
    })
}

impl fmt::Debug for GoogleSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleSettings")
            .field("client_id", &self.client_id)
            .field("client_secret", &mask(&self.client_secret))
            .field("refresh_token", &mask(&self.refresh_token))
            .field("redirect_uri", &self.redirect_uri)
            .field("calendar_id", &self.calendar_id)
            .field("timeout_secs", &self.timeout_secs)
            .field("token_url", &self.token_url)
            .field("calendar_api_base", &self.calendar_api_base)
            .finish()
    }
}

impl GoogleSettings {
    /// Merges `overrides` over the file values, resolves secret references and
    /// builds the client configuration.
    pub fn to_meet_config(&self, overrides: &CredentialOverrides) -> CliResult<MeetConfig> {
        let client_id = required("client_id", &overrides.client_id, &self.client_id)?;
        let client_secret = required("client_secret", &overrides.client_secret, &self.client_secret)?;
        let refresh_token = required("refresh_token", &overrides.refresh_token, &self.refresh_token)?;

        let mut config = MeetConfig::new(OAuthCredentials::new(
            client_id,
            client_secret,
            refresh_token,
        ));

        if let Some(ref uri) = self.redirect_uri {
            config = config.with_redirect_uri(uri);
        }
        if let Some(ref id) = self.calendar_id {
            config = config.with_calendar_id(id);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(ref url) = self.token_url {
            config = config.with_token_url(url);
        }
        if let Some(ref base) = self.calendar_api_base {
            config = config.with_calendar_api_base(base);
        }

        Ok(config)
    }
}

/// Picks the flag value over the file value and resolves it.
fn required(
    field: &'static str,
    flag: &Option<String>,
    file: &Option<String>,
) -> CliResult<String> {
    let raw = flag.as_ref().or(file.as_ref()).ok_or_else(|| {
        CliError::Config(format!(
            "missing google.{} (set it in config.toml or pass --{})",
            field,
            field.replace('_', "-")
        ))
    })?;

    secret::resolve(raw).map_err(|message| CliError::Secret { field, message })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const FULL: &str = r#"
debug = true

[google]
client_id = "id.apps.googleusercontent.com"
client_secret = "plain-secret"
refresh_token = "env::_INCIDENT_MEET_CFG_TEST_REFRESH"
redirect_uri = "http://localhost"
calendar_id = "oncall@example.com"
timeout_secs = 10
"#;

    #[test]
    fn parse_full_config() {
        let config = AppConfig::from_toml(FULL).unwrap();
        assert!(config.debug);
        assert_eq!(config.google.client_secret.as_deref(), Some("plain-secret"));
        assert_eq!(config.google.timeout_secs, Some(10));
        assert!(config.google.token_url.is_none());
    }

    #[test]
    fn parse_empty_config() {
        let config = AppConfig::from_toml("").unwrap();
        assert!(!config.debug);
        assert!(config.google.client_id.is_none());
    }

    #[test]
    fn parse_invalid_config() {
        let err = AppConfig::from_toml("[google\nclient_id =").unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FULL.as_bytes()).unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.google.calendar_id.as_deref(), Some("oncall@example.com"));
    }

    #[test]
    fn load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn meet_config_resolves_references() {
        unsafe {
            std::env::set_var("_INCIDENT_MEET_CFG_TEST_REFRESH", "1//refresh");
        }
        let config = AppConfig::from_toml(FULL).unwrap();
        let meet = config
            .google
            .to_meet_config(&CredentialOverrides::default())
            .unwrap();
        unsafe {
            std::env::remove_var("_INCIDENT_MEET_CFG_TEST_REFRESH");
        }

        assert_eq!(meet.credentials.refresh_token, "1//refresh");
        assert_eq!(meet.credentials.client_secret, "plain-secret");
        assert_eq!(meet.calendar_id, "oncall@example.com");
        assert_eq!(meet.timeout, Duration::from_secs(10));
        assert_eq!(meet.redirect_uri.as_deref(), Some("http://localhost"));
    }

    #[test]
    fn overrides_win_over_file() {
        let settings = GoogleSettings {
            client_id: Some("file-id".to_string()),
            client_secret: Some("file-secret".to_string()),
            refresh_token: Some("file-refresh".to_string()),
            ..Default::default()
        };
        let overrides = CredentialOverrides {
            client_id: Some("flag-id".to_string()),
            ..Default::default()
        };

        let meet = settings.to_meet_config(&overrides).unwrap();
        assert_eq!(meet.credentials.client_id, "flag-id");
        assert_eq!(meet.credentials.client_secret, "file-secret");
        assert_eq!(meet.calendar_id, "primary");
    }

    #[test]
    fn missing_credential_is_reported() {
        let settings = GoogleSettings {
            client_id: Some("id".to_string()),
            client_secret: Some("secret".to_string()),
            ..Default::default()
        };
        let err = settings
            .to_meet_config(&CredentialOverrides::default())
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("google.refresh_token"));
        assert!(message.contains("--refresh-token"));
    }

    #[test]
    fn unresolvable_reference_is_reported() {
        let settings = GoogleSettings {
            client_id: Some("id".to_string()),
            client_secret: Some("env::_INCIDENT_MEET_CFG_UNSET_4242".to_string()),
            refresh_token: Some("refresh".to_string()),
            ..Default::default()
        };
        let err = settings
            .to_meet_config(&CredentialOverrides::default())
            .unwrap_err();
        assert!(matches!(err, CliError::Secret { field: "client_secret", .. }));
    }

    #[test]
    fn redacted_masks_literal_secrets_only() {
        let config = AppConfig::from_toml(FULL).unwrap().redacted();
        assert_eq!(config.google.client_secret.as_deref(), Some(REDACTED));
        assert_eq!(
            config.google.refresh_token.as_deref(),
            Some("env::_INCIDENT_MEET_CFG_TEST_REFRESH")
        );
        assert_eq!(
            config.google.client_id.as_deref(),
            Some("id.apps.googleusercontent.com")
        );
    }

    #[test]
    fn debug_masks_literal_secrets() {
        let mut config = AppConfig::from_toml(FULL).unwrap();
        config.google.refresh_token = Some("1//literal-refresh".to_string());

        let printed = format!("{:?}", config);
        assert!(!printed.contains("plain-secret"));
        assert!(!printed.contains("1//literal-refresh"));
        assert!(printed.contains(REDACTED));
        assert!(printed.contains("id.apps.googleusercontent.com"));

        let settings = AppConfig::from_toml(FULL).unwrap().google;
        assert!(format!("{:?}", settings).contains("env::_INCIDENT_MEET_CFG_TEST_REFRESH"));
    }
}
