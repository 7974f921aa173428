//! The two depth phases of the search.
//!
//! Phases borrow the per-search [`AdjacencyArena`], [`SepsetMap`] and
//! [`SearchStats`]; none of that state lives on the engine.

pub mod depth_n;
pub mod depth_zero;

use fas_core::{IndependenceTest, KnowledgeStore, Node, TestOutcome};
use tracing::{info, trace, warn};

use crate::adjacency::AdjacencyArena;
use crate::stats::SearchStats;

/// Collaborators shared by every phase of one search.
#[derive(Clone, Copy)]
pub(crate) struct PhaseContext<'a> {
    pub test: &'a dyn IndependenceTest,
    pub knowledge: &'a dyn KnowledgeStore,
    pub verbose: bool,
}

impl<'a> PhaseContext<'a> {
    /// Run one CI test and count it. A failed test is a dependence judgment.
    pub fn run_test(
        &self,
        x: &Node,
        y: &Node,
        z: &[Node],
        depth: usize,
        stats: &mut SearchStats,
    ) -> TestOutcome {
        stats.tests_performed += 1;
        let outcome = self.test.check(x, y, z);
        match &outcome {
            TestOutcome::Independent { p_value } => {
                stats.independence_judgments += 1;
                if self.verbose {
                    info!(%x, %y, given = ?z, p_value, depth, "independent");
                } else {
                    trace!(%x, %y, given = ?z, p_value, depth, "independent");
                }
            }
            TestOutcome::Dependent { p_value } => {
                stats.dependence_judgments += 1;
                trace!(%x, %y, given = ?z, p_value, depth, "dependent");
            }
            TestOutcome::Failed { reason } => {
                stats.failed_tests += 1;
                stats.dependence_judgments += 1;
                warn!(%x, %y, given = ?z, depth, %reason, "independence test failed; keeping adjacency");
            }
        }
        outcome
    }

    /// `z` may explain away an `x` adjacency unless knowledge forbids `z -> x`
    /// or requires `x -> z`.
    pub fn possible_parent(&self, z: &Node, x: &Node) -> bool {
        !self.knowledge.is_forbidden(z.name(), x.name())
            && !self.knowledge.is_required(x.name(), z.name())
    }

    /// Current neighbours of `x` other than `y` that pass the possible-parent rule.
    pub fn candidate_pool(&self, arena: &AdjacencyArena, x: usize, y: usize) -> Vec<usize> {
        let xn = arena.node(x);
        arena
            .neighbors(x)
            .iter()
            .copied()
            .filter(|&z| z != y && self.possible_parent(arena.node(z), xn))
            .collect()
    }
}
