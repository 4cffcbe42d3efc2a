//! Error types for the feed service
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

/// Message shown when the conversion API rate-limits us.
pub const RATE_LIMITED_MESSAGE: &str = "Too many requests. Please try again later.";

/// Generic message for every other fetch failure.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch blog posts";

// == Feed Error Enum ==
/// Errors surfaced to the caller of `FeedCache::load`.
///
/// The `Display` output of each variant is the user-facing message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// The conversion API answered 429
    #[error("{}", RATE_LIMITED_MESSAGE)]
    RateLimited,

    /// Transport fault, non-success status or undecodable body
    #[error("{}", FETCH_FAILED_MESSAGE)]
    FetchFailed,

    /// The conversion API reported `status: "error"` in its body
    #[error("{0}")]
    UpstreamReportedError(String),

    /// The fetch failed and there was no cached batch to fall back on
    #[error("{0}")]
    NoDataAvailable(Box<FeedError>),
}

impl FeedError {
    /// Builds an upstream error, falling back to the generic message when the
    /// body carried none or an empty one. Any other text is kept verbatim.
    pub fn upstream(message: Option<String>) -> Self {
        match message {
            Some(msg) if !msg.is_empty() => FeedError::UpstreamReportedError(msg),
            _ => FeedError::UpstreamReportedError(FETCH_FAILED_MESSAGE.to_string()),
        }
    }
}

// == Store Error Enum ==
/// Faults raised by a `KeyValueStore` backend.
///
/// These never reach the caller of `FeedCache::load`; they degrade to a cache
/// miss or a skipped write.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The storage medium cannot be reached at all
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// The value does not fit in the remaining quota
    #[error("Quota exceeded: {size} bytes (limit {limit})")]
    QuotaExceeded { size: usize, limit: usize },

    /// Underlying filesystem error
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Cached text could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// == Transport Error Enum ==
/// Faults raised by an `HttpClient` before any status code is available.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The request did not complete within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Connection, TLS or body read failure
    #[error("Request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Request(err.to_string())
        }
    }
}
