//! Client configuration.

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::{MeetError, MeetResult};

/// OAuth 2.0 credentials used to mint access tokens.
///
/// The refresh token is obtained once, out of band, by authorizing the
/// application for the calendar owner's account.
#[derive(Clone)]
pub struct OAuthCredentials {
    /// The OAuth 2.0 client ID from Google Cloud Console.
    pub client_id: String,
    /// The OAuth 2.0 client secret from Google Cloud Console.
    pub client_secret: String,
    /// Long-lived refresh token for the calendar owner.
    pub refresh_token: String,
}

impl OAuthCredentials {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            refresh_token: refresh_token.into(),
        }
    }

    /// Checks that no field is blank.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.client_id.trim().is_empty() {
            return Err("client_id is required");
        }
        if self.client_secret.trim().is_empty() {
            return Err("client_secret is required");
        }
        if self.refresh_token.trim().is_empty() {
            return Err("refresh_token is required");
        }
        Ok(())
    }
}

// Secrets stay out of logs and `{:?}` output.
impl fmt::Debug for OAuthCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// Configuration for [`GoogleMeetClient`](crate::GoogleMeetClient).
#[derive(Debug, Clone)]
pub struct MeetConfig {
    /// OAuth credentials for API access.
    pub credentials: OAuthCredentials,

    /// OAuth token endpoint.
    pub token_url: String,

    /// Base URL of the Calendar API v3, without a trailing slash.
    pub calendar_api_base: String,

    /// Calendar the incident events are inserted into.
    ///
    /// Defaults to `"primary"`.
    pub calendar_id: String,

    /// Per-request timeout.
    pub timeout: Duration,

    /// User agent string for API requests.
    pub user_agent: String,

    /// Redirect URI registered with the OAuth client.
    ///
    /// Only needed when the refresh token was minted through a web flow;
    /// the refresh exchange itself does not send it.
    pub redirect_uri: Option<String>,
}

impl MeetConfig {
    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Google's OAuth 2.0 token endpoint.
    pub const DEFAULT_TOKEN_URL: &'static str = "https://oauth2.googleapis.com/token";

    /// Base URL for Google Calendar API v3.
    pub const DEFAULT_CALENDAR_API_BASE: &'static str = "https://www.googleapis.com/calendar/v3";

    /// Creates a configuration pointing at Google's production endpoints.
    pub fn new(credentials: OAuthCredentials) -> Self {
        Self {
            credentials,
            token_url: Self::DEFAULT_TOKEN_URL.to_string(),
            calendar_api_base: Self::DEFAULT_CALENDAR_API_BASE.to_string(),
            calendar_id: "primary".to_string(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("incident-meet/{}", env!("CARGO_PKG_VERSION")),
            redirect_uri: None,
        }
    }

    /// Sets the token endpoint.
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Sets the Calendar API base URL. A trailing slash is stripped.
    pub fn with_calendar_api_base(mut self, base: impl Into<String>) -> Self {
        let base = base.into();
        self.calendar_api_base = base.trim_end_matches('/').to_string();
        self
    }

    /// Sets the target calendar.
    pub fn with_calendar_id(mut self, id: impl Into<String>) -> Self {
        self.calendar_id = id.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the registered redirect URI.
    pub fn with_redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(uri.into());
        self
    }

    /// Validates the whole configuration, credentials included.
    pub fn validate(&self) -> MeetResult<()> {
        self.credentials
            .validate()
            .map_err(|e| MeetError::configuration(format!("invalid credentials: {}", e)))?;
        self.validate_transport()
    }

    /// Validates what is needed to build a client: endpoints, calendar id
    /// and timeout. Credentials are left to the token endpoint to judge.
    pub fn validate_transport(&self) -> MeetResult<()> {
        Url::parse(&self.token_url).map_err(|e| {
            MeetError::configuration(format!("invalid token_url '{}'", self.token_url)).with_source(e)
        })?;
        Url::parse(&self.calendar_api_base).map_err(|e| {
            MeetError::configuration(format!(
                "invalid calendar_api_base '{}'",
                self.calendar_api_base
            ))
            .with_source(e)
        })?;
        if let Some(ref uri) = self.redirect_uri {
            Url::parse(uri).map_err(|e| {
                MeetError::configuration(format!("invalid redirect_uri '{}'", uri)).with_source(e)
            })?;
        }

        if self.calendar_id.is_empty() {
            return Err(MeetError::configuration("calendar_id must not be empty"));
        }
        if self.timeout.is_zero() {
            return Err(MeetError::configuration("timeout must be greater than zero"));
        }

        Ok(())
    }

    /// Builds the HTTP client shared by the token and calendar calls.
    pub fn http_client(&self) -> MeetResult<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .build()
            .map_err(|e| MeetError::configuration("failed to create HTTP client").with_source(e))
    }

    /// Returns the events.insert URL for the configured calendar.
    pub fn events_url(&self) -> String {
        format!(
            "{}/calendars/{}/events",
            self.calendar_api_base,
            urlencoding::encode(&self.calendar_id)
        )
    }
}
