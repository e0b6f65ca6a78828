//! Google Meet rooms for incidents.
//!
//! This crate wraps the two Google APIs needed to open a video call for an
//! incident:
//!
//! - [`OAuthClient`] - exchanges a refresh token for a bearer access token
//! - [`CalendarClient`] - inserts a calendar event that requests a Meet room
//! - [`GoogleMeetClient`] - ties both together and caches the access token
//! - [`MeetError`] - error type for the `try_*` operations
//!
//! # Flow
//!
//! ```text
//!  MeetConfig ──► GoogleMeetClient ──┬──► OAuthClient     POST /token
//!                  (token cache)     └──► CalendarClient  POST /calendars/{id}/events
//! ```
//!
//! # Example
//!
//! ```ignore
//! use incident_meet_google::{GoogleMeetClient, MeetConfig, OAuthCredentials};
//!
//! let credentials = OAuthCredentials::new("client-id", "client-secret", "refresh-token");
//! let client = GoogleMeetClient::new(MeetConfig::new(credentials))?;
//!
//! if let Some(url) = client.create_meeting("Database outage").await {
//!     println!("join at {url}");
//! }
//! ```

pub mod calendar;
pub mod config;
pub mod error;
pub mod meeting;
pub mod oauth;

pub use calendar::{CalendarClient, EventRequest};
pub use config::{MeetConfig, OAuthCredentials};
pub use error::{MeetError, MeetErrorCode, MeetResult};
pub use meeting::GoogleMeetClient;
pub use oauth::OAuthClient;
