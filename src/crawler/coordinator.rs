//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that coordinates:
//! - Input validation and destination preparation
//! - Paging through the search feed with a capped cursor
//! - Candidate extraction and strictly ordered downloads
//! - Progress notification, throttling, and cooperative cancellation

use crate::config::{validate, Config};
use crate::crawler::download::{download_image, RetryPolicy};
use crate::crawler::parser::CandidateExtractor;
use crate::crawler::{Fetcher, HttpFetcher};
use crate::output::{ChannelObserver, ProgressEvent, ProgressObserver};
use crate::state::{CrawlPhase, PageCursor, StopReason};
use crate::storage::{image_path, resolve_destination};
use crate::url::build_search_url;
use crate::{Result, SpiderError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Caller-supplied parameters of a crawl, before validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlOptions {
    pub keyword: String,
    pub target_count: usize,

    /// Pause after each successful download; the configured default if unset
    pub delay: Option<Duration>,

    /// Destination directory overriding `{root}/{keyword}`
    pub destination: Option<String>,
}

impl CrawlOptions {
    pub fn new(keyword: impl Into<String>, target_count: usize) -> Self {
        Self {
            keyword: keyword.into(),
            target_count,
            delay: None,
            destination: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }
}

/// A validated crawl with its destination directory already created
///
/// Immutable for the duration of the crawl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRequest {
    keyword: String,
    target_count: usize,
    delay: Duration,
    destination: PathBuf,
}

impl CrawlRequest {
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }
}

/// Outcome of one crawl invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlResult {
    /// Images written, never more than the target
    pub total_downloaded: usize,

    /// Directory the images were written to
    pub destination: PathBuf,

    /// Terminal condition that ended the crawl
    pub stop_reason: StopReason,

    /// Result pages successfully fetched
    pub pages_fetched: usize,
}

/// Main crawler structure
///
/// Holds the configuration and the fetcher for any number of sequential
/// crawls. Each crawl issues one request at a time.
pub struct Crawler<F = HttpFetcher> {
    config: Arc<Config>,
    fetcher: F,
    search_base: Url,
    extractor: CandidateExtractor,
    retry: RetryPolicy,
}

impl Crawler<HttpFetcher> {
    /// Creates a crawler that talks HTTP
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Configuration is valid and the client was built
    /// * `Err(SpiderError)` - Invalid configuration or client construction failure
    pub fn new(config: Config) -> Result<Self> {
        validate(&config)?;
        let fetcher = HttpFetcher::new(&config.http)?;
        Self::with_fetcher(config, fetcher)
    }
}

impl<F: Fetcher> Crawler<F> {
    /// Creates a crawler around an arbitrary fetcher
    pub fn with_fetcher(config: Config, fetcher: F) -> Result<Self> {
        validate(&config)?;
        let search_base = Url::parse(&config.search.base_url)?;
        let extractor = CandidateExtractor::from_config(&config.search)?;
        let retry = RetryPolicy::from_config(&config.download);

        Ok(Self {
            config: Arc::new(config),
            fetcher,
            search_base,
            extractor,
            retry,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Validates options and creates the destination directory
    ///
    /// Runs before any network activity, so invalid input and filesystem
    /// problems abort the crawl before a single request is made.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlRequest)` - Ready to run
    /// * `Err(SpiderError::InvalidInput)` - Blank keyword or zero target
    /// * `Err(SpiderError::Filesystem)` - Destination could not be created
    pub fn prepare(&self, options: CrawlOptions) -> Result<CrawlRequest> {
        let keyword = options.keyword.trim();
        if keyword.is_empty() {
            return Err(SpiderError::InvalidInput(
                "keyword cannot be empty".to_string(),
            ));
        }

        if options.target_count < 1 {
            return Err(SpiderError::InvalidInput(format!(
                "target count must be >= 1, got {}",
                options.target_count
            )));
        }

        let destination = resolve_destination(
            Path::new(&self.config.output.root),
            keyword,
            options.destination.as_deref(),
        )?;

        Ok(CrawlRequest {
            keyword: keyword.to_string(),
            target_count: options.target_count,
            delay: options.delay.unwrap_or_else(|| self.config.download.delay()),
            destination,
        })
    }

    /// Prepares and runs a crawl
    ///
    /// # Arguments
    ///
    /// * `options` - Keyword, target count, optional delay and destination
    /// * `observer` - Notified after every successful download
    /// * `cancel` - Checked before every page fetch and every download
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlResult)` - The crawl ran; it may have downloaded fewer images than requested
    /// * `Err(SpiderError)` - Invalid input or destination failure, before any request
    pub async fn crawl(
        &self,
        options: CrawlOptions,
        observer: &dyn ProgressObserver,
        cancel: &CancellationToken,
    ) -> Result<CrawlResult> {
        let request = self.prepare(options)?;
        Ok(self.run(&request, observer, cancel).await)
    }

    /// Runs the crawl loop for a prepared request
    ///
    /// FetchingPage → Extracting → Downloading repeats until the target is
    /// reached, a page is unavailable or empty, the cursor passes its cap, or
    /// the token is cancelled. Individual failures only reduce the count.
    pub async fn run(
        &self,
        request: &CrawlRequest,
        observer: &dyn ProgressObserver,
        cancel: &CancellationToken,
    ) -> CrawlResult {
        tracing::info!(
            "Starting crawl for '{}': {} images into {}",
            request.keyword(),
            request.target_count(),
            request.destination().display()
        );

        let search = &self.config.search;
        let mut cursor = PageCursor::new(search.page_step, search.max_offset);
        let mut phase = CrawlPhase::FetchingPage;
        let mut downloaded = 0;
        let mut pages_fetched = 0;

        let stop_reason = loop {
            if cancel.is_cancelled() {
                break StopReason::Cancelled;
            }

            let url = build_search_url(&self.search_base, request.keyword(), cursor.offset());
            tracing::info!("Fetching result page at offset {}", cursor.offset());

            let Some(body) = self.fetcher.fetch_page(url.as_str()).await else {
                tracing::info!("No result page at offset {}, stopping", cursor.offset());
                break StopReason::PageUnavailable;
            };
            pages_fetched += 1;
            transition(&mut phase, CrawlPhase::Extracting);

            let candidates = self.extractor.extract(&body);
            if candidates.is_empty() {
                tracing::info!("No candidates at offset {}, stopping", cursor.offset());
                break StopReason::NoCandidates;
            }
            tracing::debug!(
                "Extracted {} candidates at offset {}",
                candidates.len(),
                cursor.offset()
            );
            transition(&mut phase, CrawlPhase::Downloading);

            if let Some(reason) = self
                .download_candidates(request, &candidates, &mut downloaded, observer, cancel)
                .await
            {
                break reason;
            }
            transition(&mut phase, CrawlPhase::FetchingPage);

            if !cursor.advance() {
                tracing::info!("Page cursor passed offset cap, stopping");
                break StopReason::CursorExhausted;
            }
        };
        transition(&mut phase, CrawlPhase::Done(stop_reason));

        tracing::info!(
            "Crawl finished ({}): {}/{} images in {} pages",
            stop_reason,
            downloaded,
            request.target_count(),
            pages_fetched
        );

        CrawlResult {
            total_downloaded: downloaded,
            destination: request.destination().to_path_buf(),
            stop_reason,
            pages_fetched,
        }
    }

    /// Downloads one page's candidates in order
    ///
    /// Returns a stop reason if the crawl must end before the next page.
    async fn download_candidates(
        &self,
        request: &CrawlRequest,
        candidates: &[String],
        downloaded: &mut usize,
        observer: &dyn ProgressObserver,
        cancel: &CancellationToken,
    ) -> Option<StopReason> {
        for candidate in candidates {
            if *downloaded >= request.target_count() {
                return Some(StopReason::TargetReached);
            }
            if cancel.is_cancelled() {
                return Some(StopReason::Cancelled);
            }

            let path = image_path(request.destination(), request.keyword(), *downloaded + 1);
            let outcome = download_image(&self.fetcher, candidate, &path, &self.retry).await;
            if !outcome.success {
                continue;
            }

            *downloaded += 1;
            tracing::info!(
                "Downloaded {}/{}: {}",
                downloaded,
                request.target_count(),
                path.display()
            );
            observer.on_progress(&ProgressEvent {
                current: *downloaded,
                target: request.target_count(),
                destination: request.destination().to_path_buf(),
            });

            if *downloaded >= request.target_count() {
                return Some(StopReason::TargetReached);
            }
            if !pause(request.delay(), cancel).await {
                return Some(StopReason::Cancelled);
            }
        }

        None
    }
}

/// Moves the crawl to its next phase
fn transition(phase: &mut CrawlPhase, next: CrawlPhase) {
    debug_assert!(
        phase.can_transition_to(next),
        "invalid crawl phase transition: {} -> {}",
        phase,
        next
    );
    tracing::trace!("Crawl phase {} -> {}", phase, next);
    *phase = next;
}

/// Sleeps for `delay` unless cancelled first
///
/// Returns `false` if the token was cancelled.
async fn pause(delay: Duration, cancel: &CancellationToken) -> bool {
    if delay.is_zero() {
        return !cancel.is_cancelled();
    }

    tokio::select! {
        _ = tokio::time::sleep(delay) => true,
        _ = cancel.cancelled() => false,
    }
}

/// A crawl running on its own task
///
/// Progress events arrive on `progress`; the channel closes when the crawl
/// task finishes.
pub struct CrawlHandle {
    pub task: JoinHandle<Result<CrawlResult>>,
    pub progress: UnboundedReceiver<ProgressEvent>,
    cancel: CancellationToken,
}

impl CrawlHandle {
    /// Requests cooperative cancellation
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }
}

/// Spawns a crawl on a tokio task, isolating it from the progress consumer
///
/// # Example
///
/// ```no_run
/// use image_spider::config::Config;
/// use image_spider::crawler::{spawn_crawl, CrawlOptions, Crawler};
/// use std::sync::Arc;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let crawler = Arc::new(Crawler::new(Config::default())?);
/// let mut handle = spawn_crawl(crawler, CrawlOptions::new("cats", 10), CancellationToken::new());
///
/// while let Some(event) = handle.progress.recv().await {
///     println!("{}/{}", event.current, event.target);
/// }
/// let result = handle.task.await??;
/// println!("Downloaded {}", result.total_downloaded);
/// # Ok(())
/// # }
/// ```
pub fn spawn_crawl<F>(
    crawler: Arc<Crawler<F>>,
    options: CrawlOptions,
    cancel: CancellationToken,
) -> CrawlHandle
where
    F: Fetcher + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let observer = ChannelObserver::new(tx);
    let token = cancel.clone();

    let task = tokio::spawn(async move { crawler.crawl(options, &observer, &token).await });

    CrawlHandle {
        task,
        progress: rx,
        cancel,
    }
}

/// Runs a complete crawl with an HTTP fetcher
///
/// # Example
///
/// ```no_run
/// use image_spider::config::Config;
/// use image_spider::crawler::{run_crawl, CrawlOptions};
/// use image_spider::output::NoopObserver;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let options = CrawlOptions::new("cats", 5);
/// let result = run_crawl(Config::default(), options, &NoopObserver, &CancellationToken::new()).await?;
/// println!("Saved {} images to {}", result.total_downloaded, result.destination.display());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(
    config: Config,
    options: CrawlOptions,
    observer: &dyn ProgressObserver,
    cancel: &CancellationToken,
) -> Result<CrawlResult> {
    let crawler = Crawler::new(config)?;
    crawler.crawl(options, observer, cancel).await
}
