//! Per-search adjacency state: node index -> ordered neighbour indices.
//!
//! Owned by a single search invocation and passed by reference into the
//! depth phases. Every mutation touches both directions.

use std::collections::BTreeSet;

use fas_core::Node;
use rustc_hash::FxHashMap;

/// Adjacencies keyed by node, as returned by
/// [`crate::Fas::search_adjacencies_only`].
pub type AdjacencyMap = FxHashMap<Node, BTreeSet<Node>>;

/// Arena of adjacency sets indexed by variable position.
#[derive(Debug, Clone)]
pub struct AdjacencyArena {
    nodes: Vec<Node>,
    adj: Vec<BTreeSet<usize>>,
}

impl AdjacencyArena {
    /// Empty adjacency over `nodes`.
    pub fn new(nodes: Vec<Node>) -> Self {
        let adj = vec![BTreeSet::new(); nodes.len()];
        Self { nodes, adj }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, i: usize) -> &Node {
        &self.nodes[i]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add `a -- b`. Self pairs are ignored.
    pub fn connect(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.adj[a].insert(b);
        self.adj[b].insert(a);
    }

    /// Remove `a -- b`; returns whether the edge was present.
    pub fn disconnect(&mut self, a: usize, b: usize) -> bool {
        let removed = self.adj[a].remove(&b);
        self.adj[b].remove(&a);
        removed
    }

    pub fn is_adjacent(&self, a: usize, b: usize) -> bool {
        self.adj[a].contains(&b)
    }

    pub fn neighbors(&self, a: usize) -> &BTreeSet<usize> {
        &self.adj[a]
    }

    pub fn degree(&self, a: usize) -> usize {
        self.adj[a].len()
    }

    pub fn edge_count(&self) -> usize {
        self.adj.iter().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Max over `x` and `y ∈ adj(x)` of `|adj(x) \ {y}|`.
    ///
    /// A depth-`d` pass can only test something if this exceeds `d - 1`.
    pub fn free_degree(&self) -> usize {
        self.adj
            .iter()
            .filter(|set| !set.is_empty())
            .map(|set| set.len() - 1)
            .max()
            .unwrap_or(0)
    }

    /// Every `(a, b)` with `a < b` that is adjacent, in index order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adj
            .iter()
            .enumerate()
            .flat_map(|(a, set)| set.range(a + 1..).map(move |&b| (a, b)))
    }

    /// Whether `y ∈ adj(x) ⇔ x ∈ adj(y)` holds everywhere.
    pub fn is_symmetric(&self) -> bool {
        self.adj
            .iter()
            .enumerate()
            .all(|(a, set)| set.iter().all(|&b| self.adj[b].contains(&a)))
    }

    /// Node-keyed copy of the adjacencies. Every node gets an entry.
    pub fn to_map(&self) -> AdjacencyMap {
        self.adj
            .iter()
            .enumerate()
            .map(|(a, set)| {
                let neighbours = set.iter().map(|&b| self.nodes[b].clone()).collect();
                (self.nodes[a].clone(), neighbours)
            })
            .collect()
    }
}
