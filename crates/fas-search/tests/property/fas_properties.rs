//! Property tests for fas-search over random DAGs with a d-separation oracle.

use std::collections::BTreeSet;

use proptest::prelude::*;

use fas_core::{IndependenceTest, Knowledge, Node};
use fas_search::{DSeparationOracle, Fas, SkeletonGraph, SkeletonResult};

/// Build a DAG over `n{i}` with edges only from lower to higher index.
fn build_random_dag(n: usize, edges: &[(usize, usize)]) -> (DSeparationOracle, BTreeSet<(usize, usize)>) {
    let names: Vec<String> = (0..n).map(|i| format!("n{i}")).collect();
    let mut truth = BTreeSet::new();
    for &(a, b) in edges {
        if a < n && b < n && a != b {
            truth.insert((a.min(b), a.max(b)));
        }
    }
    let directed: Vec<(Node, Node)> = truth
        .iter()
        .map(|&(a, b)| (Node::new(&names[a]), Node::new(&names[b])))
        .collect();
    let oracle = DSeparationOracle::new(fas_core::node::nodes(&names), &directed).unwrap();
    (oracle, truth)
}

fn edge_indices(result: &SkeletonResult) -> BTreeSet<(usize, usize)> {
    result
        .graph
        .edges()
        .into_iter()
        .map(|(a, b)| {
            let a: usize = a.name()[1..].parse().unwrap();
            let b: usize = b.name()[1..].parse().unwrap();
            (a.min(b), a.max(b))
        })
        .collect()
}

fn dag_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (2usize..8).prop_flat_map(|n| (Just(n), prop::collection::vec((0..n, 0..n), 0..n * 2)))
}

fn search(oracle: &DSeparationOracle, parallel: bool) -> SkeletonResult {
    let mut fas = Fas::new(oracle);
    fas.set_parallel(parallel);
    fas.search()
}

// =============================================================================
// Perfect oracle recovers the true skeleton
// =============================================================================
proptest! {
    #[test]
    fn recovers_true_skeleton((n, edges) in dag_strategy()) {
        let (oracle, truth) = build_random_dag(n, &edges);
        let sequential = search(&oracle, false);
        prop_assert_eq!(edge_indices(&sequential), truth.clone());
        let parallel = search(&oracle, true);
        prop_assert_eq!(edge_indices(&parallel), truth);
    }
}

// =============================================================================
// Adjacency symmetry and completeness of the node set
// =============================================================================
proptest! {
    #[test]
    fn adjacencies_are_symmetric((n, edges) in dag_strategy()) {
        let (oracle, _) = build_random_dag(n, &edges);
        let map = Fas::new(&oracle).search_adjacencies_only();
        prop_assert_eq!(map.len(), n);
        for (x, neighbours) in &map {
            prop_assert!(!neighbours.contains(x));
            for y in neighbours {
                prop_assert!(map[y].contains(x), "{} -> {} not mirrored", x, y);
            }
        }
    }
}

// =============================================================================
// Every recorded sepset separates a non-adjacent pair
// =============================================================================
proptest! {
    #[test]
    fn sepsets_are_consistent((n, edges) in dag_strategy(), parallel in any::<bool>()) {
        let (oracle, _) = build_random_dag(n, &edges);
        let result = search(&oracle, parallel);
        for (x, y, entry) in result.sepsets.iter() {
            prop_assert!(!result.graph.is_adjacent(x, y));
            prop_assert!(!entry.conditioning.contains(x) && !entry.conditioning.contains(y));
            prop_assert!(oracle.is_independent(x, y, &entry.conditioning));
        }
    }
}

// =============================================================================
// Pruning is monotonic and terminates within min(max depth, N - 2) + 1 levels
// =============================================================================
proptest! {
    #[test]
    fn pruning_is_monotonic_and_bounded(
        (n, edges) in dag_strategy(),
        depth in -1i64..4,
    ) {
        let (oracle, _) = build_random_dag(n, &edges);
        let mut fas = Fas::new(&oracle);
        fas.set_depth(depth).unwrap();
        let stats = fas.search().stats;

        prop_assert!(stats.edges_after_depth.windows(2).all(|w| w[1] <= w[0]));
        prop_assert_eq!(stats.degrees_after_depth.len(), stats.depths_searched());
        for level in &stats.degrees_after_depth {
            prop_assert_eq!(level.len(), n);
        }
        for node in 0..n {
            for pair in stats.degrees_after_depth.windows(2) {
                prop_assert!(
                    pair[1][node] <= pair[0][node],
                    "n{} gained a neighbour between depths",
                    node
                );
            }
        }

        let structural = n - 2;
        let cap = if depth < 0 { structural } else { structural.min(depth as usize) };
        prop_assert!(stats.depths_searched() >= 1);
        prop_assert!(stats.depths_searched() <= cap + 1);
        prop_assert_eq!(
            stats.tests_performed,
            stats.independence_judgments + stats.dependence_judgments
        );
    }
}

// =============================================================================
// Required edges always survive
// =============================================================================
proptest! {
    #[test]
    fn required_edges_survive(
        (n, edges) in dag_strategy(),
        required in prop::collection::vec((0usize..8, 0usize..8), 0..4),
    ) {
        let (oracle, _) = build_random_dag(n, &edges);
        let mut knowledge = Knowledge::new();
        let mut kept = Vec::new();
        for (a, b) in required {
            if a < n && b < n && a != b {
                knowledge.set_required(&format!("n{a}"), &format!("n{b}")).unwrap();
                kept.push((a.min(b), a.max(b)));
            }
        }

        let mut fas = Fas::new(&oracle);
        fas.set_knowledge(&knowledge);
        let result = fas.search();
        let found = edge_indices(&result);
        for pair in kept {
            prop_assert!(found.contains(&pair), "required {:?} was removed", pair);
        }
    }
}

// =============================================================================
// Seed graph bounds the result
// =============================================================================
proptest! {
    #[test]
    fn result_is_subgraph_of_seed(
        (n, edges) in dag_strategy(),
        seed_edges in prop::collection::vec((0usize..8, 0usize..8), 0..10),
    ) {
        let (oracle, _) = build_random_dag(n, &edges);
        let mut seed = SkeletonGraph::with_nodes(oracle.variables());
        let mut allowed = BTreeSet::new();
        for (a, b) in seed_edges {
            if a < n && b < n && a != b {
                seed.add_edge(&Node::new(format!("n{a}")), &Node::new(format!("n{b}")));
                allowed.insert((a.min(b), a.max(b)));
            }
        }

        let mut fas = Fas::new(&oracle);
        fas.set_initial_graph(Some(&seed));
        let result = fas.search();
        prop_assert!(edge_indices(&result).is_subset(&allowed));
        prop_assert!(result.stats.edges_after_depth[0] <= allowed.len());
    }
}
