//! Error types for the resilient HTTP caller.

use thiserror::Error;

/// Result type for resilient HTTP calls.
pub type Result<T> = std::result::Result<T, HttpError>;

/// Terminal errors surfaced by [`crate::ResilientClient::call`].
#[derive(Debug, Error)]
pub enum HttpError {
    /// Every attempt failed (transport error or non-2xx status)
    #[error("{method} {url} failed after {attempts} attempts: {last_error}")]
    ExhaustedRetries {
        method: String,
        url: String,
        attempts: u32,
        last_error: String,
    },
}

/// Why a single attempt failed. Both variants are retried the same way.
#[derive(Debug, Error)]
pub(crate) enum AttemptFailure {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}
