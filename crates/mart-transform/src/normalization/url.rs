//! Category URL parsing.
//!
//! Category listing URLs look like
//! `https://site/dien-thoai-may-tinh-bang/c1789?page=2`: the numeric id
//! follows a `/c` segment and the slug before it is the url key.

use once_cell::sync::Lazy;
use regex::Regex;

static CATEGORY_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/c(\d+)").unwrap());

static URL_KEY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/([^/]+)/c\d+").unwrap());

/// Extracts the numeric category id from a listing URL.
pub fn extract_category_id(url: &str) -> Option<i64> {
    CATEGORY_ID_RE
        .captures(url)
        .and_then(|caps| caps[1].parse().ok())
}

/// Extracts the slug preceding the category id segment.
pub fn extract_url_key(url: &str) -> Option<String> {
    URL_KEY_RE
        .captures(url)
        .map(|caps| caps[1].to_string())
}
