/// Crawl phase definitions for the fetch/extract/download loop
use std::fmt;

/// The step of the crawl loop the engine is currently executing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Requesting the next result page
    FetchingPage,

    /// Scanning a page body for candidate image URLs
    Extracting,

    /// Downloading the candidates of the current page in order
    Downloading,

    /// Terminal state; no further requests are issued
    Done(StopReason),
}

impl CrawlPhase {
    /// Returns true if the crawl has stopped
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    /// Returns true if `next` is a legal successor of this phase
    ///
    /// The loop is FetchingPage → Extracting → Downloading → FetchingPage.
    /// Any non-terminal phase may end the crawl; `Done` has no successor.
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        match (self, next) {
            (Self::Done(_), _) => false,
            (_, Self::Done(_)) => true,
            (Self::FetchingPage, Self::Extracting) => true,
            (Self::Extracting, Self::Downloading) => true,
            (Self::Downloading, Self::FetchingPage) => true,
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FetchingPage => "fetching_page",
            Self::Extracting => "extracting",
            Self::Downloading => "downloading",
            Self::Done(_) => "done",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Done(reason) => write!(f, "done ({})", reason),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

/// Why a crawl stopped
///
/// None of these are errors: every variant ends the crawl normally with
/// whatever count had been reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// The requested number of images was downloaded
    TargetReached,

    /// A result page could not be fetched (unreachable or exhausted feed)
    PageUnavailable,

    /// A result page contained no usable candidates
    NoCandidates,

    /// The page cursor passed its hard cap
    CursorExhausted,

    /// The caller cancelled the crawl
    Cancelled,
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TargetReached => "target_reached",
            Self::PageUnavailable => "page_unavailable",
            Self::NoCandidates => "no_candidates",
            Self::CursorExhausted => "cursor_exhausted",
            Self::Cancelled => "cancelled",
        }
    }

    /// Human-readable description for summaries
    pub fn describe(&self) -> &'static str {
        match self {
            Self::TargetReached => "requested number of images downloaded",
            Self::PageUnavailable => "search results could not be fetched",
            Self::NoCandidates => "search results contained no more images",
            Self::CursorExhausted => "reached the last result page",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_transitions() {
        assert!(CrawlPhase::FetchingPage.can_transition_to(CrawlPhase::Extracting));
        assert!(CrawlPhase::Extracting.can_transition_to(CrawlPhase::Downloading));
        assert!(CrawlPhase::Downloading.can_transition_to(CrawlPhase::FetchingPage));
    }

    #[test]
    fn test_illegal_transitions() {
        assert!(!CrawlPhase::FetchingPage.can_transition_to(CrawlPhase::Downloading));
        assert!(!CrawlPhase::Extracting.can_transition_to(CrawlPhase::FetchingPage));
        assert!(!CrawlPhase::Downloading.can_transition_to(CrawlPhase::Extracting));
    }

    #[test]
    fn test_any_active_phase_can_finish() {
        let done = CrawlPhase::Done(StopReason::Cancelled);
        assert!(CrawlPhase::FetchingPage.can_transition_to(done));
        assert!(CrawlPhase::Extracting.can_transition_to(done));
        assert!(CrawlPhase::Downloading.can_transition_to(done));
    }

    #[test]
    fn test_done_is_final() {
        let done = CrawlPhase::Done(StopReason::TargetReached);
        assert!(done.is_done());
        assert!(!done.can_transition_to(CrawlPhase::FetchingPage));
        assert!(!done.can_transition_to(CrawlPhase::Done(StopReason::Cancelled)));
    }

    #[test]
    fn test_display() {
        assert_eq!(CrawlPhase::Extracting.to_string(), "extracting");
        assert_eq!(
            CrawlPhase::Done(StopReason::NoCandidates).to_string(),
            "done (no_candidates)"
        );
        assert_eq!(StopReason::CursorExhausted.to_string(), "cursor_exhausted");
    }
}
