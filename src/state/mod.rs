//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `PageCursor`: Pagination offset into the search feed, monotonic and capped
//! - `CrawlPhase`: Which step of the fetch/extract/download loop the engine is in
//! - `StopReason`: Why a crawl reached its terminal state

mod crawl_phase;
mod cursor;

// Re-export main types
pub use crawl_phase::{CrawlPhase, StopReason};
pub use cursor::PageCursor;
