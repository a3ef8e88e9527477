//! Crawler module for search paging and image downloading
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching of result pages and image payloads
//! - Candidate URL extraction from result pages
//! - Per-image download with bounded retry
//! - Overall crawl coordination, progress and cancellation

mod coordinator;
mod download;
mod fetcher;
mod parser;

pub use coordinator::{
    run_crawl, spawn_crawl, CrawlHandle, CrawlOptions, CrawlRequest, CrawlResult, Crawler,
};
pub use download::{download_image, DownloadOutcome, RetryPolicy};
pub use fetcher::{build_http_client, Fetcher, HttpFetcher};
pub use parser::CandidateExtractor;
