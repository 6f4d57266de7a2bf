//! Error types for the Simply Plural client.

use resilient_http::HttpError;
use thiserror::Error;

/// Result type for Simply Plural client operations.
pub type Result<T> = std::result::Result<T, SimplyPluralError>;

/// Simply Plural client errors.
#[derive(Debug, Error)]
pub enum SimplyPluralError {
    /// Configuration error (token not usable as a header value)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request failed after every retry
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Response body was not the expected JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
