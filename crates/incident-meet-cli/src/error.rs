//! CLI error types.

use incident_meet_google::MeetError;
use thiserror::Error;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that end a CLI run with a failure exit code.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file or value problem.
    #[error("configuration error: {0}")]
    Config(String),

    /// A `pass::` or `env::` reference could not be resolved.
    #[error("could not resolve {field}: {message}")]
    Secret { field: &'static str, message: String },

    /// The Google client failed.
    #[error(transparent)]
    Meet(#[from] MeetError),

    /// The authentication check did not obtain a token.
    #[error("authentication failed; check client id, client secret and refresh token")]
    AuthFailed,
}
