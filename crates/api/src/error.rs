//! Shared error type for backend requests.

use thiserror::Error;

/// Errors surfaced by the backend client.
///
/// `Display` on every variant is safe to show a user directly: the `Status`
/// variant carries the server's own `error` body field when one was sent,
/// never a raw response dump.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("{message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("backend response did not include a session state")]
    MissingSessionState,

    #[error(transparent)]
    InvalidUrl(#[from] url::ParseError),

    #[error("failed to decode backend response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl ApiError {
    /// True when the error came back as an HTTP status rather than a
    /// transport or decoding failure.
    #[must_use]
    pub fn is_status(&self) -> bool {
        matches!(self, ApiError::Status { .. })
    }
}
