#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fixed-depth search settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchConfig {
    /// Plies to search; 0 is treated as 1
    pub depth: u32,
    /// Root moves are split across this many scoped threads when above 1
    pub threads: usize,
    /// Cache static evaluations by Zobrist key for the duration of one search
    pub eval_cache: bool,
}

/// Depth of the built-in opponent
pub const DEFAULT_DEPTH: u32 = 2;

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: DEFAULT_DEPTH,
            threads: 1,
            eval_cache: true,
        }
    }
}

impl SearchConfig {
    #[must_use]
    pub const fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    #[must_use]
    pub const fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    #[must_use]
    pub const fn with_eval_cache(mut self, enabled: bool) -> Self {
        self.eval_cache = enabled;
        self
    }

    /// Depth actually searched
    #[must_use]
    pub(crate) fn effective_depth(&self) -> u32 {
        self.depth.max(1)
    }
}
