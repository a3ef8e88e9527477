//! Progress observer interface
//!
//! The engine never depends on what consumes progress. It only calls
//! [`ProgressObserver::on_progress`] after each successful download; observers
//! must return quickly and must not fail the crawl.

use std::path::PathBuf;
use tokio::sync::mpsc::UnboundedSender;

/// A single progress notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Number of images downloaded so far
    pub current: usize,

    /// Number of images requested
    pub target: usize,

    /// Directory the images are written to
    pub destination: PathBuf,
}

impl ProgressEvent {
    /// Completion percentage in `0.0..=100.0`
    pub fn percent(&self) -> f64 {
        if self.target == 0 {
            return 100.0;
        }
        (self.current as f64 / self.target as f64) * 100.0
    }
}

/// Receives progress notifications from a running crawl
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, event: &ProgressEvent);
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {
    fn on_progress(&self, _event: &ProgressEvent) {}
}

impl<F> ProgressObserver for F
where
    F: Fn(&ProgressEvent) + Send + Sync,
{
    fn on_progress(&self, event: &ProgressEvent) {
        self(event)
    }
}

/// Observer that forwards events to a channel
///
/// A dropped receiver is ignored; the crawl keeps going without a consumer.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: UnboundedSender<ProgressEvent>,
}

impl ChannelObserver {
    pub fn new(sender: UnboundedSender<ProgressEvent>) -> Self {
        Self { sender }
    }
}

impl ProgressObserver for ChannelObserver {
    fn on_progress(&self, event: &ProgressEvent) {
        if self.sender.send(event.clone()).is_err() {
            tracing::trace!("Progress receiver dropped, event discarded");
        }
    }
}
