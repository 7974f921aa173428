use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{FasError, FasResult};

/// Search subsystem configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Largest conditioning-set size to try. `-1` means unbounded.
    pub depth: i64,
    /// Log every independence judgment at `info`.
    pub verbose: bool,
    /// Fan depth >= 1 passes out over rayon workers.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: defaults::DEFAULT_DEPTH,
            verbose: defaults::DEFAULT_VERBOSE,
            parallel: defaults::DEFAULT_PARALLEL,
        }
    }
}

impl SearchConfig {
    /// Reject depths below -1.
    pub fn check_depth(depth: i64) -> FasResult<i64> {
        if depth < defaults::UNBOUNDED_DEPTH {
            return Err(FasError::InvalidDepth { depth });
        }
        Ok(depth)
    }

    /// The effective bound: `-1` becomes [`defaults::DEFAULT_MAX_DEPTH`].
    pub fn max_depth(&self) -> usize {
        depth_bound(self.depth)
    }
}

/// Map a validated depth to the bound the search loop runs to.
pub fn depth_bound(depth: i64) -> usize {
    if depth < 0 {
        defaults::DEFAULT_MAX_DEPTH
    } else {
        usize::try_from(depth).unwrap_or(defaults::DEFAULT_MAX_DEPTH)
    }
}
