//! URL handling module for Image-Spider
//!
//! This module builds paginated search URLs and decides which extracted
//! strings look like downloadable HTTP(S) resources.

mod search;

// Re-export main functions
pub use search::build_search_url;

/// Returns true if the string starts with an `http://` or `https://` scheme
///
/// Search feeds embed relative paths, obfuscated tokens and other non-URL
/// values in the same fields as real image links; only absolute HTTP(S)
/// references are worth a request.
///
/// # Examples
///
/// ```
/// use image_spider::url::is_http_url;
///
/// assert!(is_http_url("https://example.com/a.jpg"));
/// assert!(is_http_url("HTTP://example.com/a.jpg"));
/// assert!(!is_http_url("/relative/a.jpg"));
/// assert!(!is_http_url("ftp://example.com/a.jpg"));
/// ```
pub fn is_http_url(candidate: &str) -> bool {
    has_prefix_ignore_case(candidate, "http://") || has_prefix_ignore_case(candidate, "https://")
}

fn has_prefix_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .map(|head| head.eq_ignore_ascii_case(prefix))
        .unwrap_or(false)
}
