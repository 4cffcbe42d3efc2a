//! Conversion API response shapes.

use serde::Deserialize;

/// Top-level body returned by the RSS-to-JSON conversion API.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedResponse {
    /// `"ok"` or `"error"`
    #[serde(default)]
    pub status: String,
    /// Explanation accompanying `status: "error"`
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<RawFeedItem>>,
}

impl FeedResponse {
    pub fn is_error(&self) -> bool {
        self.status == "error"
    }
}

/// One item as the conversion API sends it, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawFeedItem {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "pubDate", default)]
    pub pub_date: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Full post HTML
    #[serde(default)]
    pub content: Option<String>,
    /// Summary HTML
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}
