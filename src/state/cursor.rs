/// Pagination cursor over the search feed
///
/// The offset only ever grows by `step`. Once it passes `max_offset` the
/// cursor is exhausted, which bounds the crawl even when the upstream feed
/// keeps returning results forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    offset: u64,
    step: u32,
    max_offset: u32,
}

impl PageCursor {
    /// Creates a cursor at offset zero
    ///
    /// A zero step is raised to one so the cursor always makes progress.
    pub fn new(step: u32, max_offset: u32) -> Self {
        Self {
            offset: 0,
            step: step.max(1),
            max_offset,
        }
    }

    /// Current offset to request
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    /// Moves to the next page
    ///
    /// Returns `false` once the new offset exceeds the hard cap.
    pub fn advance(&mut self) -> bool {
        self.offset += u64::from(self.step);
        !self.is_exhausted()
    }

    /// Returns true if the offset is past the hard cap
    pub fn is_exhausted(&self) -> bool {
        self.offset > u64::from(self.max_offset)
    }
}
