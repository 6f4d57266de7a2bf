//! HTTP caller with bounded exponential-backoff retry.
//!
//! A single request is attempted up to [`RetryPolicy::max_attempts`] times.
//! Network errors and non-2xx statuses are treated the same way: the caller
//! waits `base_delay * 2^attempt` and tries again. When every attempt fails the
//! call returns [`HttpError::ExhaustedRetries`].
//!
//! # Example
//!
//! ```rust,ignore
//! use resilient_http::{ResilientClient, Method};
//! use reqwest::header::HeaderMap;
//!
//! let client = ResilientClient::new();
//! let body = client
//!     .call(Method::GET, "https://example.org/members", &HeaderMap::new(), None)
//!     .await?;
//! ```

pub mod error;

pub use error::{HttpError, Result};
pub use bytes::Bytes;
pub use reqwest::header::{HeaderMap, HeaderValue};
pub use reqwest::Method;

use error::AttemptFailure;
use std::time::Duration;
use tracing::{debug, error, warn};

const DEFAULT_MAX_ATTEMPTS: u32 = 6;
const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Retry schedule: deterministic exponential backoff, no jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// One "time unit"; attempt `n` waits `base_delay * 2^n` after failing.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Backoff to wait after the attempt with the given zero-based index failed.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// HTTP client that retries failed requests.
#[derive(Clone)]
pub struct ResilientClient {
    http_client: reqwest::Client,
    policy: RetryPolicy,
}

impl Default for ResilientClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ResilientClient {
    /// Create a client with the default policy (6 attempts, 1s base delay).
    pub fn new() -> Self {
        Self {
            http_client: reqwest::Client::new(),
            policy: RetryPolicy::default(),
        }
    }

    /// Replace the retry policy.
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Issue one request, retrying until it succeeds or attempts run out.
    ///
    /// Returns the raw response body of the first successful attempt.
    pub async fn call(
        &self,
        method: Method,
        url: &str,
        headers: &HeaderMap,
        body: Option<&[u8]>,
    ) -> Result<Bytes> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut last_error = String::new();

        for attempt in 0..max_attempts {
            debug!(method = %method, url, attempt, "HTTP request");

            match self.send_once(method.clone(), url, headers, body).await {
                Ok(bytes) => return Ok(bytes),
                Err(failure) => {
                    last_error = failure.to_string();

                    if attempt + 1 < max_attempts {
                        let delay = self.policy.delay_for(attempt);
                        warn!(
                            method = %method,
                            url,
                            attempt,
                            error = %last_error,
                            delay_ms = delay.as_millis() as u64,
                            "Request failed, retrying"
                        );
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        error!(
            method = %method,
            url,
            attempts = max_attempts,
            error = %last_error,
            "Request failed after all retries"
        );

        Err(HttpError::ExhaustedRetries {
            method: method.to_string(),
            url: url.to_string(),
            attempts: max_attempts,
            last_error,
        })
    }

    async fn send_once(
        &self,
        method: Method,
        url: &str,
        headers: &HeaderMap,
        body: Option<&[u8]>,
    ) -> std::result::Result<Bytes, AttemptFailure> {
        let mut request = self
            .http_client
            .request(method, url)
            .headers(headers.clone());
        if let Some(body) = body {
            request = request.body(body.to_vec());
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AttemptFailure::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes().await?)
    }
}
