//! Image-Spider: a keyword image crawler
//!
//! This crate pages through a search-engine result feed for a keyword, extracts
//! embedded image URLs, and downloads a bounded number of them into a target
//! directory using a deterministic `{keyword}_{n}.jpg` naming scheme.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod storage;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Image-Spider operations
///
/// Transport failures never appear here: they are absorbed by the fetcher and
/// the download retry loop. Only conditions that abort a crawl before it
/// starts are surfaced.
#[derive(Debug, Error)]
pub enum SpiderError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to prepare directory {}: {}", .path.display(), .source)]
    Filesystem {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid candidate pattern: {0}")]
    InvalidPattern(String),
}

/// Result type alias for Image-Spider operations
pub type Result<T> = std::result::Result<T, SpiderError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlOptions, CrawlRequest, CrawlResult, Crawler};
pub use output::{ProgressEvent, ProgressObserver};
pub use state::{PageCursor, StopReason};
