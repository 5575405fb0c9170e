//! View driver event stream payloads.

/// Events emitted from a view's single-writer loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent<I> {
    /// A fetch was started.
    LoadStarted {
        /// Load generation of the fetch.
        generation: u64,
    },
    /// Records were loaded and evaluated.
    Loaded {
        /// Records kept after normalization.
        count: usize,
    },
    /// The fetch failed; the view is retryable.
    LoadFailed {
        /// User-facing message.
        message: String,
    },
    /// A fetch result arrived for a stale load and was dropped.
    LoadDiscarded {
        /// Load generation of the dropped result.
        generation: u64,
    },
    /// The view was recomputed after a query change.
    Recomputed {
        /// Rows passing the filters.
        filtered: usize,
        /// Current page after clamping.
        page: usize,
        /// Total pages.
        total_pages: usize,
    },
    /// A record was deleted locally.
    Deleted {
        /// Deleted record id.
        id: I,
    },
    /// A record was patched locally.
    Updated {
        /// Patched record id.
        id: I,
    },
}
