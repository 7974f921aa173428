//! Depth d >= 1: prune adjacencies with conditioning sets of size d.

use fas_core::Node;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use super::PhaseContext;
use crate::adjacency::AdjacencyArena;
use crate::choice::ChoiceGenerator;
use crate::fact::IndependenceFact;
use crate::sepset::SepsetMap;
use crate::stats::SearchStats;

/// A pair found independent, ready to be removed.
struct Separation {
    x: usize,
    y: usize,
    z: Vec<Node>,
    p_value: Option<f64>,
}

/// Sequential pass. Removals take effect immediately, so later pairs in
/// the same pass see the smaller pools. Returns whether depth `d + 1` could
/// test anything.
pub(crate) fn search(
    ctx: &PhaseContext<'_>,
    arena: &mut AdjacencyArena,
    depth: usize,
    sepsets: &mut SepsetMap,
    stats: &mut SearchStats,
) -> bool {
    let mut tested: FxHashSet<IndependenceFact> = FxHashSet::default();

    for x in 0..arena.len() {
        let snapshot: Vec<usize> = arena.neighbors(x).iter().copied().collect();
        for y in snapshot {
            debug_assert!(arena.is_adjacent(x, y));
            if let Some(sep) = separate(ctx, arena, x, y, depth, &mut tested, stats) {
                apply(arena, sepsets, sep);
            }
        }
    }

    arena.free_degree() > depth
}

/// Parallel pass over `x`. Every worker reads the adjacency as it stood at
/// the start of the pass; removals are applied after all workers finish, in
/// ascending `x`, the first proposal for a pair winning.
pub(crate) fn search_parallel(
    ctx: &PhaseContext<'_>,
    arena: &mut AdjacencyArena,
    depth: usize,
    sepsets: &mut SepsetMap,
    stats: &mut SearchStats,
) -> bool {
    let snapshot: &AdjacencyArena = arena;
    let proposals: Vec<(Vec<Separation>, SearchStats)> = (0..snapshot.len())
        .into_par_iter()
        .map(|x| {
            let mut local = SearchStats::default();
            let mut tested: FxHashSet<IndependenceFact> = FxHashSet::default();
            let found: Vec<Separation> = snapshot
                .neighbors(x)
                .iter()
                .filter_map(|&y| separate(ctx, snapshot, x, y, depth, &mut tested, &mut local))
                .collect();
            (found, local)
        })
        .collect();

    for (found, local) in proposals {
        stats.merge(&local);
        for sep in found {
            apply(arena, sepsets, sep);
        }
    }

    arena.free_degree() > depth
}

/// Try every size-`depth` subset of the candidate pool for `x -- y`.
/// Stops at the first independence the knowledge allows acting on.
fn separate(
    ctx: &PhaseContext<'_>,
    arena: &AdjacencyArena,
    x: usize,
    y: usize,
    depth: usize,
    tested: &mut FxHashSet<IndependenceFact>,
    stats: &mut SearchStats,
) -> Option<Separation> {
    let pool = ctx.candidate_pool(arena, x, y);
    if pool.len() < depth {
        return None;
    }

    let (xn, yn) = (arena.node(x), arena.node(y));
    let no_edge_required = ctx.knowledge.no_edge_required(xn.name(), yn.name());

    for choice in ChoiceGenerator::new(pool.len(), depth) {
        let z_idx: SmallVec<[usize; 4]> = choice.iter().map(|&i| pool[i]).collect();
        if !tested.insert(IndependenceFact::new(x, y, &z_idx)) {
            stats.duplicate_tests_skipped += 1;
            continue;
        }

        let z: Vec<Node> = z_idx.iter().map(|&i| arena.node(i).clone()).collect();
        let outcome = ctx.run_test(xn, yn, &z, depth, stats);
        if outcome.is_independent() && no_edge_required {
            return Some(Separation {
                x,
                y,
                z,
                p_value: outcome.p_value(),
            });
        }
    }
    None
}

/// Remove the pair and record its sepset, unless another proposal got there first.
fn apply(arena: &mut AdjacencyArena, sepsets: &mut SepsetMap, sep: Separation) {
    if arena.disconnect(sep.x, sep.y) {
        let x = arena.node(sep.x).clone();
        let y = arena.node(sep.y).clone();
        sepsets.set(&x, &y, sep.z, sep.p_value);
    }
}
