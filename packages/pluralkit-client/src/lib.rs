//! PluralKit v2 REST API client.
//!
//! PluralKit allows two requests per second, so the client sleeps a fixed
//! pacing delay before every request. Failed requests are retried by
//! [`resilient_http::ResilientClient`].
//!
//! # Example
//!
//! ```rust,ignore
//! use pluralkit_client::{MemberPatch, PluralKitClient};
//!
//! let client = PluralKitClient::new("pk-token");
//!
//! let member = &client.list_members().await?[0];
//! let mut patch = MemberPatch::for_member(member);
//! patch.pronouns = Some("they/them".into());
//! client.update_member(&patch).await?;
//!
//! client.set_fronters(&[member.id.clone()]).await?;
//! ```

pub mod error;
pub mod types;

pub use error::{PluralKitError, Result};
pub use types::{Member, MemberPatch};

use resilient_http::{Bytes, HeaderMap, HeaderValue, Method, ResilientClient, RetryPolicy};
use std::time::Duration;
use tokio::sync::OnceCell;
use types::{FrontersResponse, SwitchRequest};

const BASE_URL: &str = "https://api.pluralkit.me/v2";

/// Fixed delay before each request; keeps us under 2 requests per second.
const REQUEST_PACING: Duration = Duration::from_millis(550);

pub struct PluralKitClient {
    http: ResilientClient,
    token: String,
    base_url: String,
    pacing: Duration,
    members: OnceCell<Vec<Member>>,
}

impl PluralKitClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            http: ResilientClient::new(),
            token: token.into(),
            base_url: BASE_URL.to_string(),
            pacing: REQUEST_PACING,
            members: OnceCell::new(),
        }
    }

    /// Set a custom base URL (for proxies and tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.http = self.http.with_policy(policy);
        self
    }

    /// Override the per-request pacing delay.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// All members of the token's system. Only the first call hits the network.
    pub async fn list_members(&self) -> Result<&[Member]> {
        let members = self
            .members
            .get_or_try_init(|| async {
                let body = self.request(Method::GET, "/systems/@me/members", None).await?;
                let members: Vec<Member> = serde_json::from_slice(&body)?;
                tracing::info!(count = members.len(), "Fetched PluralKit members");
                Ok::<_, PluralKitError>(members)
            })
            .await?;

        Ok(members.as_slice())
    }

    /// Short ids of the current fronters, in reported order.
    ///
    /// A system with no recorded switch has no fronters.
    pub async fn list_current_fronters(&self) -> Result<Vec<String>> {
        let body = self
            .request(Method::GET, "/systems/@me/fronters", None)
            .await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let response: Option<FrontersResponse> = serde_json::from_slice(&body)?;
        let fronters: Vec<String> = response
            .unwrap_or_default()
            .members
            .into_iter()
            .map(|m| m.id)
            .collect();
        tracing::debug!(fronters = ?fronters, "Fetched PluralKit fronters");

        Ok(fronters)
    }

    /// Apply a partial update to the member named by `patch.id`.
    pub async fn update_member(&self, patch: &MemberPatch) -> Result<()> {
        let body = serde_json::to_vec(patch)?;
        let path = format!("/members/{}", patch.id);

        self.request(Method::PATCH, &path, Some(&body)).await?;
        tracing::info!(member_id = %patch.id, "Updated PluralKit member");

        Ok(())
    }

    /// Record a switch to exactly `member_ids`, effective now.
    pub async fn set_fronters(&self, member_ids: &[String]) -> Result<()> {
        let body = serde_json::to_vec(&SwitchRequest {
            members: member_ids,
        })?;

        self.request(Method::POST, "/systems/@me/switches", Some(&body))
            .await?;
        tracing::info!(fronters = ?member_ids, "Recorded PluralKit switch");

        Ok(())
    }

    async fn request(&self, method: Method, path: &str, body: Option<&[u8]>) -> Result<Bytes> {
        tokio::time::sleep(self.pacing).await;

        let url = format!("{}{}", self.base_url, path);
        let body = self
            .http
            .call(method, &url, &self.headers()?, body)
            .await?;
        Ok(body)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "Authorization",
            self.token
                .parse::<HeaderValue>()
                .map_err(|_| PluralKitError::Config("token is not a valid header value".into()))?,
        );
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}
