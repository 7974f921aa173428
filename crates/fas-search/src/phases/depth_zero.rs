//! Depth 0: marginal tests over every candidate pair.

use tracing::debug;

use super::PhaseContext;
use crate::adjacency::AdjacencyArena;
use crate::graph::SkeletonGraph;
use crate::sepset::SepsetMap;
use crate::stats::SearchStats;

/// Populate `arena` from marginal tests. Returns whether a depth-1 pass
/// could test anything.
pub(crate) fn search(
    ctx: &PhaseContext<'_>,
    arena: &mut AdjacencyArena,
    seed: Option<&SkeletonGraph>,
    sepsets: &mut SepsetMap,
    stats: &mut SearchStats,
) -> bool {
    let n = arena.len();
    for i in 0..n {
        for j in i + 1..n {
            let x = arena.node(i).clone();
            let y = arena.node(j).clone();

            if let Some(seed) = seed {
                if !seed.is_adjacent(&x, &y) {
                    continue;
                }
            }

            let outcome = ctx.run_test(&x, &y, &[], 0, stats);
            let no_edge_required = ctx.knowledge.no_edge_required(x.name(), y.name());

            if outcome.is_independent() && no_edge_required {
                sepsets.set(&x, &y, Vec::new(), outcome.p_value());
            } else if !ctx.knowledge.edge_forbidden(x.name(), y.name()) {
                arena.connect(i, j);
            } else {
                // Left out without a sepset, unlike an independence finding.
                debug!(%x, %y, "edge forbidden by background knowledge");
            }
        }
    }

    arena.free_degree() > 0
}
