//! Feed Item Module
//!
//! The normalized post shape returned to callers and persisted in the cache.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Number of categories shown on a post card.
pub const PREVIEW_CATEGORY_COUNT: usize = 2;

// == Feed Item ==
/// A single post after normalization.
///
/// Field names serialize in the conversion API's casing (`pubDate`) so that
/// cached batches keep the same shape the API produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    /// Post headline
    pub title: String,
    /// Publication timestamp as sent by the conversion API
    #[serde(rename = "pubDate")]
    pub pub_date: String,
    /// Absolute URL of the post
    pub link: String,
    /// Cover image URL, empty when none could be derived
    #[serde(default)]
    pub thumbnail: String,
    /// Tags in source order
    #[serde(default)]
    pub categories: Vec<String>,
}

impl FeedItem {
    /// Parses `pub_date` to a calendar date.
    ///
    /// Accepts the conversion API's `YYYY-MM-DD HH:MM:SS`, RFC 3339 and
    /// RFC 2822. Returns `None` for anything else.
    pub fn published_date(&self) -> Option<NaiveDate> {
        let raw = self.pub_date.trim();
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
            .map(|dt| dt.date())
            .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
            .or_else(|_| DateTime::parse_from_rfc2822(raw).map(|dt| dt.date_naive()))
            .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
            .ok()
    }

    /// Formats the publish date as `January 15, 2024`.
    ///
    /// Unparseable dates are shown verbatim.
    pub fn display_date(&self) -> String {
        match self.published_date() {
            Some(date) => date.format("%B %-d, %Y").to_string(),
            None => self.pub_date.clone(),
        }
    }

    /// The leading categories shown on a post card.
    pub fn preview_categories(&self) -> &[String] {
        let end = self.categories.len().min(PREVIEW_CATEGORY_COUNT);
        &self.categories[..end]
    }

    /// Whether a cover image is available.
    pub fn has_thumbnail(&self) -> bool {
        !self.thumbnail.is_empty()
    }
}
