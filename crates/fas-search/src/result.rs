//! Search output.

use serde::{Deserialize, Serialize};

use crate::graph::SkeletonGraph;
use crate::sepset::SepsetMap;
use crate::stats::SearchStats;

/// Skeleton, separating sets, and counters from one search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkeletonResult {
    /// Every variable, with an edge for each surviving adjacency.
    pub graph: SkeletonGraph,
    /// Conditioning sets for pairs judged independent.
    pub sepsets: SepsetMap,
    pub stats: SearchStats,
}

impl SkeletonResult {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
