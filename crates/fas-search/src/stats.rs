//! Diagnostics returned alongside each search result.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Counters for one search invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// CI tests actually sent to the oracle.
    pub tests_performed: usize,
    pub independence_judgments: usize,
    /// Includes failed tests, which count as dependent.
    pub dependence_judgments: usize,
    pub failed_tests: usize,
    /// Tests skipped because the same fact was already tested in the pass.
    pub duplicate_tests_skipped: usize,
    /// Deepest level that ran; `None` when no level ran.
    pub max_depth_searched: Option<usize>,
    /// Adjacency count after each depth, index = depth.
    pub edges_after_depth: Vec<usize>,
    /// Neighbour count of each variable, in oracle order, after each depth.
    pub degrees_after_depth: Vec<Vec<usize>>,
    pub elapsed: Duration,
}

impl SearchStats {
    pub(crate) fn merge(&mut self, other: &SearchStats) {
        self.tests_performed += other.tests_performed;
        self.independence_judgments += other.independence_judgments;
        self.dependence_judgments += other.dependence_judgments;
        self.failed_tests += other.failed_tests;
        self.duplicate_tests_skipped += other.duplicate_tests_skipped;
    }

    /// Number of depth levels that ran.
    pub fn depths_searched(&self) -> usize {
        self.edges_after_depth.len()
    }
}
