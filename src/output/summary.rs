//! Command-line rendering of progress and results

use crate::crawler::CrawlResult;
use crate::output::ProgressEvent;
use crate::state::StopReason;

/// Formats a progress event as a single status line
///
/// # Example
///
/// ```
/// use image_spider::output::{format_progress, ProgressEvent};
/// use std::path::PathBuf;
///
/// let event = ProgressEvent { current: 3, target: 4, destination: PathBuf::from("out/cats") };
/// assert_eq!(format_progress(&event), "Downloaded 3/4 images (75%) -> out/cats");
/// ```
pub fn format_progress(event: &ProgressEvent) -> String {
    format!(
        "Downloaded {}/{} images ({:.0}%) -> {}",
        event.current,
        event.target,
        event.percent(),
        event.destination.display()
    )
}

/// Prints the final result of a crawl to stdout
pub fn print_summary(result: &CrawlResult, target: usize) {
    println!();
    if result.stop_reason == StopReason::Cancelled {
        println!("=== Crawl Stopped ===");
    } else {
        println!("=== Crawl Complete ===");
    }
    println!(
        "  Images downloaded: {} / {}",
        result.total_downloaded, target
    );
    println!("  Saved to: {}", result.destination.display());
    println!("  Result pages fetched: {}", result.pages_fetched);
    println!("  Stopped because: {}", result.stop_reason.describe());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_progress_rounds_percentage() {
        let event = ProgressEvent {
            current: 1,
            target: 3,
            destination: PathBuf::from("downloads/cats"),
        };
        assert_eq!(
            format_progress(&event),
            "Downloaded 1/3 images (33%) -> downloads/cats"
        );
    }

    #[test]
    fn test_format_progress_complete() {
        let event = ProgressEvent {
            current: 5,
            target: 5,
            destination: PathBuf::from("d"),
        };
        assert!(format_progress(&event).contains("(100%)"));
    }
}
