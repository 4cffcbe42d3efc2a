//! Thumbnail derivation for raw feed items.
//!
//! The match is a plain regex over the HTML text: the first `<img ... src="...">`
//! wins. A `src` written with single quotes is not recognized.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::feed::{FeedItem, RawFeedItem};

static IMG_SRC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<img[^>]+src="([^">]+)""#).expect("valid img src pattern"));

/// Returns the `src` of the first `<img>` tag in `html`.
pub fn first_image_src(html: &str) -> Option<&str> {
    IMG_SRC
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Resolves the thumbnail for a raw item.
///
/// An explicit non-empty thumbnail is kept. Otherwise the content HTML is
/// scanned, then the description HTML. No match gives an empty string.
pub fn derive_thumbnail(raw: &RawFeedItem) -> String {
    if let Some(thumbnail) = raw.thumbnail.as_deref().filter(|t| !t.is_empty()) {
        return thumbnail.to_string();
    }

    raw.content
        .as_deref()
        .and_then(first_image_src)
        .or_else(|| raw.description.as_deref().and_then(first_image_src))
        .unwrap_or_default()
        .to_string()
}

/// Converts a raw item into a [`FeedItem`], filling in its thumbnail.
///
/// Title, link, publish date and categories pass through untouched.
pub fn normalize(raw: &RawFeedItem) -> FeedItem {
    FeedItem {
        title: raw.title.clone(),
        pub_date: raw.pub_date.clone(),
        link: raw.link.clone(),
        thumbnail: derive_thumbnail(raw),
        categories: raw.categories.clone(),
    }
}

/// Normalizes `raw` and keeps the first `limit` items in source order.
pub fn normalize_batch(raw: &[RawFeedItem], limit: usize) -> Vec<FeedItem> {
    raw.iter().take(limit).map(normalize).collect()
}
