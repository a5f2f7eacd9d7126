//! Failure taxonomy for one completion round trip.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompletionError {
    /// Connection, TLS, timeout or body-read failure.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Body is not JSON or does not match the response envelope.
    #[error("{0}")]
    Decode(#[from] serde_json::Error),

    /// Non-2xx status carrying the API's error envelope.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
}
