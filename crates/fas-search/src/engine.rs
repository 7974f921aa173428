//! Fas: depth-tiered adjacency search over a conditional-independence oracle.

use std::time::Instant;

use fas_core::config::search_config::depth_bound;
use fas_core::config::SearchConfig;
use fas_core::knowledge::EmptyKnowledge;
use fas_core::{FasResult, IndependenceTest, KnowledgeStore, Node};
use tracing::{debug, info, instrument};

use crate::adjacency::{AdjacencyArena, AdjacencyMap};
use crate::graph::SkeletonGraph;
use crate::phases::{depth_n, depth_zero, PhaseContext};
use crate::result::SkeletonResult;
use crate::sepset::SepsetMap;
use crate::stats::SearchStats;

static NO_KNOWLEDGE: EmptyKnowledge = EmptyKnowledge;

/// The Fast Adjacency Search.
///
/// Holds configuration and collaborators only. Each call to
/// [`Fas::search`] builds its own adjacency, sepset and counter state, so a
/// search can be repeated and shared across threads.
pub struct Fas<'a> {
    test: &'a dyn IndependenceTest,
    knowledge: &'a dyn KnowledgeStore,
    initial_graph: Option<&'a SkeletonGraph>,
    depth: i64,
    verbose: bool,
    parallel: bool,
}

impl<'a> Fas<'a> {
    /// Unbounded depth, no knowledge, no seed graph.
    pub fn new(test: &'a dyn IndependenceTest) -> Self {
        let defaults = SearchConfig::default();
        Self {
            test,
            knowledge: &NO_KNOWLEDGE,
            initial_graph: None,
            depth: defaults.depth,
            verbose: defaults.verbose,
            parallel: defaults.parallel,
        }
    }

    /// Create from the `[search]` config section.
    pub fn with_config(test: &'a dyn IndependenceTest, config: &SearchConfig) -> FasResult<Self> {
        let mut fas = Self::new(test);
        fas.set_depth(config.depth)?;
        fas.verbose = config.verbose;
        fas.parallel = config.parallel;
        Ok(fas)
    }

    /// Bound the conditioning-set size. `-1` means unbounded; below that is an error.
    pub fn set_depth(&mut self, depth: i64) -> FasResult<()> {
        self.depth = SearchConfig::check_depth(depth)?;
        Ok(())
    }

    pub fn set_knowledge(&mut self, knowledge: &'a dyn KnowledgeStore) {
        self.knowledge = knowledge;
    }

    /// Restrict depth 0 to pairs adjacent in `graph`.
    pub fn set_initial_graph(&mut self, graph: Option<&'a SkeletonGraph>) {
        self.initial_graph = graph;
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }

    pub fn depth(&self) -> i64 {
        self.depth
    }

    pub fn knowledge(&self) -> &dyn KnowledgeStore {
        self.knowledge
    }

    pub fn nodes(&self) -> &[Node] {
        self.test.variables()
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Run the search and materialize the skeleton.
    pub fn search(&self) -> SkeletonResult {
        let (arena, sepsets, stats) = self.run();

        let mut graph = SkeletonGraph::with_nodes(arena.nodes());
        for (a, b) in arena.edges() {
            graph.add_edge(arena.node(a), arena.node(b));
        }

        SkeletonResult {
            graph,
            sepsets,
            stats,
        }
    }

    /// Run the search and return only the adjacency sets.
    pub fn search_adjacencies_only(&self) -> AdjacencyMap {
        self.run().0.to_map()
    }

    #[instrument(skip_all, fields(variables = self.test.variables().len(), depth = self.depth))]
    fn run(&self) -> (AdjacencyArena, SepsetMap, SearchStats) {
        let start = Instant::now();
        let max_depth = depth_bound(self.depth);
        let ctx = PhaseContext {
            test: self.test,
            knowledge: self.knowledge,
            verbose: self.verbose,
        };

        let mut arena = AdjacencyArena::new(self.test.variables().to_vec());
        let mut sepsets = SepsetMap::new();
        let mut stats = SearchStats::default();

        info!(
            variables = arena.len(),
            max_depth,
            seeded = self.initial_graph.is_some(),
            knowledge = !self.knowledge.is_empty(),
            parallel = self.parallel,
            "starting adjacency search"
        );

        for depth in 0..=max_depth {
            let more = if depth == 0 {
                depth_zero::search(&ctx, &mut arena, self.initial_graph, &mut sepsets, &mut stats)
            } else if self.parallel {
                depth_n::search_parallel(&ctx, &mut arena, depth, &mut sepsets, &mut stats)
            } else {
                depth_n::search(&ctx, &mut arena, depth, &mut sepsets, &mut stats)
            };
            debug_assert!(arena.is_symmetric());

            stats.max_depth_searched = Some(depth);
            stats.edges_after_depth.push(arena.edge_count());
            stats
                .degrees_after_depth
                .push((0..arena.len()).map(|i| arena.degree(i)).collect());
            debug!(
                depth,
                edges = arena.edge_count(),
                free_degree = arena.free_degree(),
                tests = stats.tests_performed,
                "depth complete"
            );

            if !more {
                break;
            }
        }

        stats.elapsed = start.elapsed();
        info!(
            edges = arena.edge_count(),
            sepsets = sepsets.len(),
            tests = stats.tests_performed,
            failed = stats.failed_tests,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "adjacency search finished"
        );

        (arena, sepsets, stats)
    }
}
