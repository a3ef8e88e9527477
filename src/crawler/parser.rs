//! Candidate extraction from search result pages
//!
//! Result pages embed image URLs inside inline JSON rather than in `<img>`
//! tags, so extraction is a pattern scan over the raw body instead of an HTML
//! parse. The first capture group of every match is a candidate.

use crate::config::SearchConfig;
use crate::url::is_http_url;
use crate::ConfigError;
use regex::Regex;

/// Extracts candidate image URLs from result page bodies
#[derive(Debug, Clone)]
pub struct CandidateExtractor {
    pattern: Regex,
}

impl CandidateExtractor {
    /// Compiles an extractor for the given marker pattern
    ///
    /// The pattern must contain a capture group; `.` matches newlines.
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let pattern = crate::config::compile_candidate_pattern(pattern)?;
        Ok(Self { pattern })
    }

    /// Compiles the extractor configured for a search feed
    pub fn from_config(config: &SearchConfig) -> Result<Self, ConfigError> {
        Self::new(&config.candidate_pattern)
    }

    /// Returns every HTTP(S) candidate in `body`, in order of appearance
    ///
    /// JSON-escaped slashes (`\/`) are unescaped before the scheme check.
    /// Duplicates are kept; the engine does not deduplicate.
    ///
    /// # Example
    ///
    /// ```
    /// use image_spider::crawler::CandidateExtractor;
    ///
    /// let extractor = CandidateExtractor::new(r#""objURL":"(.*?)""#).unwrap();
    /// let body = r#"{"objURL":"https://a.example/1.jpg"},{"objURL":"ippr_z2C$"}"#;
    /// assert_eq!(extractor.extract(body), vec!["https://a.example/1.jpg"]);
    /// ```
    pub fn extract(&self, body: &str) -> Vec<String> {
        self.pattern
            .captures_iter(body)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim().replace("\\/", "/"))
            .filter(|candidate| is_http_url(candidate))
            .collect()
    }
}
