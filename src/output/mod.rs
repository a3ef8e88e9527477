//! Output module for progress reporting and crawl summaries
//!
//! This module handles:
//! - The one-way progress observer interface the engine reports through
//! - Rendering progress events and final results for the command line

mod progress;
pub mod summary;

pub use progress::{ChannelObserver, NoopObserver, ProgressEvent, ProgressObserver};
pub use summary::{format_progress, print_summary};
