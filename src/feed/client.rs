//! Outbound HTTP for the conversion API.
//!
//! [`HttpClient`] is the seam `FeedCache` fetches through; [`ReqwestClient`]
//! is the production implementation.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::error::TransportError;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }
}

/// Fetches a URL with GET.
///
/// Any status code is a successful exchange; only faults that prevent a
/// response (connect, TLS, timeout, body read) are errors.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

// == Reqwest Client ==
/// [`HttpClient`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Builds a client whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { inner })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let response = self.inner.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}

// == Feed Endpoint ==
/// The two resolved addresses a fetch needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEndpoint {
    /// Conversion API base, e.g. `https://api.rss2json.com/v1/api.json`
    pub api_url: String,
    /// Source feed, e.g. `https://medium.com/feed/@someone`
    pub feed_url: String,
}

impl FeedEndpoint {
    pub fn new(api_url: impl Into<String>, feed_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            feed_url: feed_url.into(),
        }
    }

    /// `{api_url}?rss_url={percent-encoded feed_url}`
    ///
    /// Falls back to plain concatenation when `api_url` is not an absolute URL,
    /// so a misconfiguration turns into a failed fetch rather than a panic.
    pub fn request_url(&self) -> String {
        match Url::parse_with_params(&self.api_url, &[("rss_url", &self.feed_url)]) {
            Ok(url) => url.to_string(),
            Err(_) => {
                let encoded: String =
                    url::form_urlencoded::byte_serialize(self.feed_url.as_bytes()).collect();
                format!("{}?rss_url={}", self.api_url, encoded)
            }
        }
    }
}
