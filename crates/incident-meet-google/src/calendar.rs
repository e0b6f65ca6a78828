//! Google Calendar `events.insert` with a Meet conference request.

use chrono::{DateTime, Duration, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{MeetError, MeetResult};

/// How long the placeholder calendar event lasts, in hours.
const MEETING_LENGTH_HOURS: i64 = 1;

/// Conference solution that yields a Google Meet room.
const HANGOUTS_MEET: &str = "hangoutsMeet";

/// Body of an events.insert request asking for a Meet room.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    pub summary: String,
    pub description: String,
    pub start: EventTime,
    pub end: EventTime,
    pub conference_data: ConferenceDataRequest,
}

impl EventRequest {
    /// Builds the event for `incident`, starting at `start` and lasting one
    /// hour. Each call gets a fresh conference request id.
    pub fn for_incident(incident: &str, start: DateTime<Utc>) -> Self {
        Self {
            summary: incident.to_string(),
            description: format!("Incident meeting for: {}", incident),
            start: EventTime::utc(start),
            end: EventTime::utc(start + Duration::hours(MEETING_LENGTH_HOURS)),
            conference_data: ConferenceDataRequest {
                create_request: CreateConferenceRequest {
                    request_id: format!("incident-{}", Uuid::new_v4()),
                    conference_solution_key: ConferenceSolutionKey {
                        solution_type: HANGOUTS_MEET.to_string(),
                    },
                },
            },
        }
    }

    pub fn request_id(&self) -> &str {
        &self.conference_data.create_request.request_id
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    pub date_time: DateTime<Utc>,
    pub time_zone: String,
}

impl EventTime {
    fn utc(date_time: DateTime<Utc>) -> Self {
        Self {
            date_time,
            time_zone: "UTC".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceDataRequest {
    pub create_request: CreateConferenceRequest,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConferenceRequest {
    pub request_id: String,
    pub conference_solution_key: ConferenceSolutionKey,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConferenceSolutionKey {
    #[serde(rename = "type")]
    pub solution_type: String,
}

/// Google Calendar API client.
#[derive(Debug, Clone)]
pub struct CalendarClient {
    http_client: reqwest::Client,
    events_url: String,
}

impl CalendarClient {
    /// Creates a client that inserts into the calendar at `events_url`.
    pub fn new(events_url: impl Into<String>, http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            events_url: events_url.into(),
        }
    }

    /// Inserts `event` and returns the URI of its first conference entry
    /// point.
    ///
    /// `conferenceDataVersion=1` is required for Google to honor the
    /// `createRequest`. Only a 200 response counts as success.
    pub async fn insert_event(&self, access_token: &str, event: &EventRequest) -> MeetResult<String> {
        debug!(
            url = %self.events_url,
            request_id = event.request_id(),
            "inserting incident event"
        );

        let response = self
            .http_client
            .post(&self.events_url)
            .bearer_auth(access_token)
            .query(&[("conferenceDataVersion", "1")])
            .json(event)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MeetError::network("calendar request timed out").with_source(e)
                } else {
                    MeetError::network("calendar request failed").with_source(e)
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| MeetError::network("failed to read calendar response").with_source(e))?;

        if status != StatusCode::OK {
            return Err(MeetError::http_status(
                status,
                format!("calendar API refused the event: {}", body.trim()),
            ));
        }

        let inserted: InsertedEvent = serde_json::from_str(&body).map_err(|e| {
            MeetError::invalid_response("calendar response is not valid JSON").with_source(e)
        })?;

        inserted.meeting_uri().ok_or_else(|| {
            MeetError::invalid_response("calendar response has no conference entry point")
        })
    }
}

/// The parts of an inserted event we read back.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsertedEvent {
    conference_data: Option<ConferenceData>,
}

impl InsertedEvent {
    fn meeting_uri(self) -> Option<String> {
        self.conference_data?
            .entry_points?
            .into_iter()
            .next()?
            .uri
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConferenceData {
    entry_points: Option<Vec<EntryPoint>>,
}

#[derive(Debug, Deserialize)]
struct EntryPoint {
    uri: Option<String>,
}
