use std::fmt;

/// Fetch lifecycle of a view: `Idle → Loading → {Loaded, Failed}`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Not yet activated.
    #[default]
    Idle,
    /// A fetch is outstanding.
    Loading,
    /// Records are loaded and queryable.
    Loaded,
    /// The last fetch failed; `retry` is allowed.
    Failed {
        /// User-facing message.
        message: String,
    },
}

impl LoadState {
    /// Short name used in errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Loaded => "loaded",
            Self::Failed { .. } => "failed",
        }
    }

    /// True while a fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Proof that a fetch was started; its result is only applied while the
/// ticket is still current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub(crate) generation: u64,
}

impl LoadTicket {
    /// Monotonic number of the load this ticket belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Records stored and evaluated.
    Loaded {
        /// Records kept after normalization.
        count: usize,
    },
    /// The fetch failed and the view moved to `Failed`.
    Failed,
    /// The result arrived for a stale ticket or a torn-down view and was dropped.
    Discarded,
}
