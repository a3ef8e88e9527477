//! Per-image download with bounded retry
//!
//! # Retry Logic
//!
//! | Condition | Action |
//! |-----------|--------|
//! | URL without http(s) scheme | Immediate failure, no request |
//! | Fetch returns bytes | Write file, success |
//! | Fetch absent, attempts left | Sleep backoff, retry |
//! | Fetch absent, budget spent | Failure, no file |
//! | File write fails | Failure, no retry |

use crate::config::DownloadConfig;
use crate::crawler::Fetcher;
use crate::storage::write_image;
use crate::url::is_http_url;
use std::path::Path;
use std::time::Duration;

/// How many times to try an image and how long to wait between tries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub attempts: u32,

    /// Pause between consecutive attempts
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: u32, backoff: Duration) -> Self {
        Self { attempts, backoff }
    }

    pub fn from_config(config: &DownloadConfig) -> Self {
        Self::new(config.retry_attempts, config.retry_backoff())
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&DownloadConfig::default())
    }
}

/// Result of downloading one candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadOutcome {
    pub success: bool,

    /// Size of the written file, on success
    pub bytes_written: Option<u64>,

    /// Number of fetches issued
    pub attempts_used: u32,
}

impl DownloadOutcome {
    fn failed(attempts_used: u32) -> Self {
        Self {
            success: false,
            bytes_written: None,
            attempts_used,
        }
    }
}

/// Downloads `url` into `destination`, retrying failed fetches
///
/// The file is written only once the whole payload has been received, so a
/// failed download never leaves a file at `destination`.
///
/// # Arguments
///
/// * `fetcher` - Source of image bytes
/// * `url` - Candidate image URL
/// * `destination` - Full path of the file to create
/// * `policy` - Attempt budget and backoff
pub async fn download_image<F>(
    fetcher: &F,
    url: &str,
    destination: &Path,
    policy: &RetryPolicy,
) -> DownloadOutcome
where
    F: Fetcher + ?Sized,
{
    if !is_http_url(url) {
        tracing::warn!("Invalid image URL, skipping: {}", url);
        return DownloadOutcome::failed(0);
    }

    let attempts = policy.attempts.max(1);
    let mut attempts_used = 0;

    loop {
        attempts_used += 1;

        if let Some(bytes) = fetcher.fetch_resource(url).await {
            return match write_image(destination, &bytes).await {
                Ok(bytes_written) => {
                    tracing::debug!(
                        "Saved {} ({} bytes) from {}",
                        destination.display(),
                        bytes_written,
                        url
                    );
                    DownloadOutcome {
                        success: true,
                        bytes_written: Some(bytes_written),
                        attempts_used,
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to write {}: {}", destination.display(), e);
                    DownloadOutcome::failed(attempts_used)
                }
            };
        }

        if attempts_used >= attempts {
            tracing::warn!(
                "Download failed after {} attempts, giving up: {}",
                attempts_used,
                url
            );
            return DownloadOutcome::failed(attempts_used);
        }

        tracing::info!(
            "Download failed, retrying ({}/{}): {}",
            attempts_used + 1,
            attempts,
            url
        );
        tokio::time::sleep(policy.backoff).await;
    }
}
