//! Client error types

use reqwest::StatusCode;
use shared::EnvelopeError;
use thiserror::Error;

/// Client error type
///
/// Every variant ends a single fetch only; the sync loop logs it, reports it
/// to the display and carries on with the next tick.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connect, timeout, DNS or IO failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-2xx status
    #[error("Unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// Body is not valid JSON or does not match the schema
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Envelope carried `success: false` or no payload
    #[error("Envelope error: {0}")]
    Envelope(#[from] EnvelopeError),

    /// The underlying HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

impl ClientError {
    /// Whether the request ran into one of the configured timeouts
    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Http(e) if e.is_timeout())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
