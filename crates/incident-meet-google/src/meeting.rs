//! The incident meeting client.
//!
//! [`GoogleMeetClient`] exchanges the refresh token on first use, keeps the
//! resulting access token for its whole lifetime, and uses it to insert one
//! calendar event per [`create_meeting`](GoogleMeetClient::create_meeting)
//! call. The token is never refreshed or invalidated.

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use crate::calendar::{CalendarClient, EventRequest};
use crate::config::MeetConfig;
use crate::error::{MeetError, MeetResult};
use crate::oauth::OAuthClient;

/// Creates Google Meet rooms for incidents.
#[derive(Debug)]
pub struct GoogleMeetClient {
    oauth_client: OAuthClient,
    calendar_client: CalendarClient,
    access_token: RwLock<Option<String>>,
}

impl GoogleMeetClient {
    /// Creates a client from `config`. No request is made until a token is
    /// needed.
    ///
    /// Blank credentials are accepted here; they surface as a failed token
    /// exchange, so `test_auth` reports `false` and `create_meeting` `None`.
    pub fn new(config: MeetConfig) -> MeetResult<Self> {
        config.validate_transport()?;

        let http_client = config.http_client()?;
        let oauth_client = OAuthClient::new(
            config.credentials.clone(),
            config.token_url.clone(),
            http_client.clone(),
        );
        let calendar_client = CalendarClient::new(config.events_url(), http_client);

        Ok(Self {
            oauth_client,
            calendar_client,
            access_token: RwLock::new(None),
        })
    }

    /// Returns the cached access token, fetching it on first use.
    ///
    /// A failed exchange caches nothing, so the next call tries again.
    pub async fn try_access_token(&self) -> MeetResult<String> {
        if let Some(token) = self.access_token.read().await.as_ref() {
            return Ok(token.clone());
        }

        let mut cached = self.access_token.write().await;
        // Another task may have filled the cache while we waited.
        if let Some(token) = cached.as_ref() {
            return Ok(token.clone());
        }

        let token = self.oauth_client.refresh_access_token().await?;
        *cached = Some(token.clone());
        Ok(token)
    }

    /// Returns the access token, or `None` after logging why it could not
    /// be obtained.
    pub async fn access_token(&self) -> Option<String> {
        match self.try_access_token().await {
            Ok(token) => Some(token),
            Err(e) => {
                error!(error = %e, "failed to generate a valid Google OAuth token");
                None
            }
        }
    }

    /// Returns true if an access token is available.
    ///
    /// Reuses a previously obtained token without contacting the token
    /// endpoint again.
    pub async fn test_auth(&self) -> bool {
        self.access_token().await.is_some()
    }

    /// Creates a one-hour event for `incident` with a Meet room attached and
    /// returns the room's URL.
    ///
    /// The calendar endpoint is not called when no token can be obtained.
    pub async fn try_create_meeting(&self, incident: &str) -> MeetResult<String> {
        let token = self.try_access_token().await.map_err(|e| {
            MeetError::not_authenticated(format!(
                "no valid token available for creating the meeting: {}",
                e
            ))
            .with_source(e)
        })?;

        let event = EventRequest::for_incident(incident, Utc::now());
        debug!(incident, request_id = event.request_id(), "creating meeting");

        let url = self.calendar_client.insert_event(&token, &event).await?;
        info!(incident, url = %url, "created Google Meet meeting");
        Ok(url)
    }

    /// Creates a meeting for `incident`, or returns `None` after logging the
    /// failure.
    pub async fn create_meeting(&self, incident: &str) -> Option<String> {
        match self.try_create_meeting(incident).await {
            Ok(url) => Some(url),
            Err(e) => {
                error!(incident, error = %e, "error creating Google Meet meeting");
                None
            }
        }
    }
}
