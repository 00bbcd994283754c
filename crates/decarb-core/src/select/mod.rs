mod candidate;
pub mod engine;
mod frontier;
mod greedy;
pub mod outcome;

pub use engine::select;
pub use outcome::{Exclusion, ExclusionReason, SelectionMode, SelectionResult, SelectionStatus};

use serde::{Deserialize, Serialize};

/// Upper bound on the number of (investment, carbon) totals the search keeps.
pub const DEFAULT_MAX_FRONTIER_STATES: usize = 250_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorOptions {
    /// Exceeding this is a hard error, not an infeasible result.
    pub max_frontier_states: usize,
}

impl Default for SelectorOptions {
    fn default() -> Self {
        SelectorOptions {
            max_frontier_states: DEFAULT_MAX_FRONTIER_STATES,
        }
    }
}
