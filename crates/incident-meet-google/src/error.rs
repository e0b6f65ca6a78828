//! Error types for the token exchange and the calendar call.
//!
//! The public `Option`/`bool` operations of [`GoogleMeetClient`] swallow these
//! after logging them; the `try_*` variants hand them to the caller.
//!
//! [`GoogleMeetClient`]: crate::GoogleMeetClient

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/// The category of a [`MeetError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeetErrorCode {
    /// The request never produced a response: connect, DNS, TLS, timeout.
    NetworkError,
    /// The server answered with a status other than 200.
    HttpStatus,
    /// The body was not JSON or lacked a required field.
    InvalidResponse,
    /// No access token could be obtained for the calendar call.
    NotAuthenticated,
    /// Missing or malformed configuration.
    ConfigurationError,
}

impl MeetErrorCode {
    /// Returns a stable snake_case name for this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NetworkError => "network_error",
            Self::HttpStatus => "http_status",
            Self::InvalidResponse => "invalid_response",
            Self::NotAuthenticated => "not_authenticated",
            Self::ConfigurationError => "configuration_error",
        }
    }
}

impl fmt::Display for MeetErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error raised while talking to the OAuth or Calendar endpoints.
#[derive(Debug, Error)]
pub struct MeetError {
    code: MeetErrorCode,
    message: String,
    /// Status of the response, when the failure happened after one arrived.
    status: Option<StatusCode>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl MeetError {
    /// Creates a new error with the given code and message.
    pub fn new(code: MeetErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
            source: None,
        }
    }

    /// Creates a transport error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(MeetErrorCode::NetworkError, message)
    }

    /// Creates an error for an unexpected response status.
    pub fn http_status(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(MeetErrorCode::HttpStatus, message).with_status(status)
    }

    /// Creates a malformed-response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(MeetErrorCode::InvalidResponse, message)
    }

    /// Creates a missing-token error.
    pub fn not_authenticated(message: impl Into<String>) -> Self {
        Self::new(MeetErrorCode::NotAuthenticated, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(MeetErrorCode::ConfigurationError, message)
    }

    /// Records the response status.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the underlying cause.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn code(&self) -> MeetErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }
}

impl fmt::Display for MeetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if let Some(status) = self.status {
            write!(f, " (HTTP {})", status.as_u16())?;
        }
        Ok(())
    }
}

/// A specialized Result type for meeting operations.
pub type MeetResult<T> = Result<T, MeetError>;
