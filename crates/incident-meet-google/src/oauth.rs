//! Refresh-token exchange against Google's OAuth 2.0 token endpoint.
//!
//! Only the `refresh_token` grant is implemented. The refresh token itself is
//! minted elsewhere and handed to us through configuration.

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::OAuthCredentials;
use crate::error::{MeetError, MeetResult};

/// OAuth client for the token endpoint.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    credentials: OAuthCredentials,
    token_url: String,
    http_client: reqwest::Client,
}

impl OAuthClient {
    pub fn new(
        credentials: OAuthCredentials,
        token_url: impl Into<String>,
        http_client: reqwest::Client,
    ) -> Self {
        Self {
            credentials,
            token_url: token_url.into(),
            http_client,
        }
    }

    /// Exchanges the configured refresh token for a fresh access token.
    ///
    /// Exactly one request is made. Any status other than 200 is an error, as
    /// is a 200 whose body carries no `access_token`.
    pub async fn refresh_access_token(&self) -> MeetResult<String> {
        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("refresh_token", self.credentials.refresh_token.as_str()),
        ];

        debug!(url = %self.token_url, "requesting access token");

        let response = self
            .http_client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| MeetError::network("token request failed").with_source(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| MeetError::network("failed to read token response").with_source(e))?;

        if status != StatusCode::OK {
            return Err(MeetError::http_status(
                status,
                format!("token endpoint refused the refresh token: {}", body.trim()),
            ));
        }

        let token_response: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            MeetError::invalid_response("token response is not valid JSON").with_source(e)
        })?;

        let access_token = token_response
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| MeetError::invalid_response("token response has no access_token"))?;

        info!(
            expires_in = token_response.expires_in,
            token_type = token_response.token_type.as_deref().unwrap_or("unknown"),
            "obtained access token"
        );
        Ok(access_token)
    }
}

/// Response from Google's token endpoint.
///
/// `access_token` is optional here so a 200 without it is reported as an
/// invalid response rather than a JSON error.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    token_type: Option<String>,
}
