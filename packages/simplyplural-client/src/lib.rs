//! Read-only Simply Plural REST API client.
//!
//! Fetches the member roster of one system and the current fronters. The
//! roster is cached for the lifetime of the client; fronters are always
//! fetched fresh.
//!
//! # Example
//!
//! ```rust,ignore
//! use simplyplural_client::SimplyPluralClient;
//!
//! let client = SimplyPluralClient::new("sp-token", "user-id");
//!
//! for member in client.list_members().await? {
//!     println!("{}", member.name().unwrap_or("(unnamed)"));
//! }
//! let fronters = client.list_current_fronters().await?;
//! ```

pub mod error;
pub mod types;

pub use error::{Result, SimplyPluralError};
pub use types::{Member, MemberContent};

use resilient_http::{Bytes, HeaderMap, HeaderValue, Method, ResilientClient, RetryPolicy};
use tokio::sync::OnceCell;
use types::FrontEntry;

const BASE_URL: &str = "https://v2.apparyllis.com/v1";

pub struct SimplyPluralClient {
    http: ResilientClient,
    token: String,
    user_id: String,
    base_url: String,
    members: OnceCell<Vec<Member>>,
}

impl SimplyPluralClient {
    pub fn new(token: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            http: ResilientClient::new(),
            token: token.into(),
            user_id: user_id.into(),
            base_url: BASE_URL.to_string(),
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

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// All members of the configured system, in the order the service reports them.
    ///
    /// Only the first call hits the network.
    pub async fn list_members(&self) -> Result<&[Member]> {
        let members = self
            .members
            .get_or_try_init(|| async {
                let path = format!("/members/{}", self.user_id);
                let body = self.get(&path).await?;
                let members: Vec<Member> = serde_json::from_slice(&body)?;
                tracing::info!(count = members.len(), "Fetched Simply Plural members");
                Ok::<_, SimplyPluralError>(members)
            })
            .await?;

        Ok(members.as_slice())
    }

    /// Member ids of the current fronters, in reported order.
    pub async fn list_current_fronters(&self) -> Result<Vec<String>> {
        let body = self.get("/fronters").await?;
        let entries: Vec<FrontEntry> = serde_json::from_slice(&body)?;

        let fronters: Vec<String> = entries
            .into_iter()
            .filter_map(|entry| entry.content.member)
            .collect();
        tracing::debug!(fronters = ?fronters, "Fetched Simply Plural fronters");

        Ok(fronters)
    }

    async fn get(&self, path: &str) -> Result<Bytes> {
        let url = format!("{}{}", self.base_url, path);
        let body = self
            .http
            .call(Method::GET, &url, &self.headers()?, None)
            .await?;
        Ok(body)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "Authorization",
            self.token
                .parse::<HeaderValue>()
                .map_err(|_| SimplyPluralError::Config("token is not a valid header value".into()))?,
        );
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}
