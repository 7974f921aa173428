//! petgraph::StableUnGraph wrapper indexed by variable name.

use fas_core::Node;
use petgraph::stable_graph::{NodeIndex, StableUnGraph};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// The underlying undirected graph type.
pub type UndirectedStableGraph = StableUnGraph<Node, ()>;

/// Undirected graph over variables with O(1) node lookup.
#[derive(Debug, Clone, Default)]
pub struct SkeletonGraph {
    /// The petgraph stable graph.
    pub graph: UndirectedStableGraph,
    /// Map from node → NodeIndex.
    pub node_index: FxHashMap<Node, NodeIndex>,
}

impl SkeletonGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph with the given nodes and no edges.
    pub fn with_nodes(nodes: &[Node]) -> Self {
        let mut graph = Self::new();
        for node in nodes {
            graph.add_node(node.clone());
        }
        graph
    }

    /// Graph with an edge between every pair of distinct nodes.
    pub fn complete(nodes: &[Node]) -> Self {
        let mut graph = Self::with_nodes(nodes);
        for (i, a) in nodes.iter().enumerate() {
            for b in &nodes[i + 1..] {
                graph.add_edge(a, b);
            }
        }
        graph
    }

    /// Get or create the index for `node`.
    pub fn add_node(&mut self, node: Node) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(&node) {
            return idx;
        }
        let idx = self.graph.add_node(node.clone());
        self.node_index.insert(node, idx);
        idx
    }

    /// Add `a -- b`, creating missing nodes. Returns `false` for self loops
    /// and edges that already exist.
    pub fn add_edge(&mut self, a: &Node, b: &Node) -> bool {
        if a == b {
            return false;
        }
        let ia = self.add_node(a.clone());
        let ib = self.add_node(b.clone());
        if self.graph.find_edge(ia, ib).is_some() {
            return false;
        }
        self.graph.add_edge(ia, ib, ());
        true
    }

    /// Remove `a -- b`; returns whether it existed.
    pub fn remove_edge(&mut self, a: &Node, b: &Node) -> bool {
        let (Some(&ia), Some(&ib)) = (self.node_index.get(a), self.node_index.get(b)) else {
            return false;
        };
        match self.graph.find_edge(ia, ib) {
            Some(e) => self.graph.remove_edge(e).is_some(),
            None => false,
        }
    }

    pub fn is_adjacent(&self, a: &Node, b: &Node) -> bool {
        match (self.node_index.get(a), self.node_index.get(b)) {
            (Some(&ia), Some(&ib)) => self.graph.find_edge(ia, ib).is_some(),
            _ => false,
        }
    }

    /// Neighbours of `node`, sorted by name.
    pub fn neighbors(&self, node: &Node) -> Vec<Node> {
        let Some(&idx) = self.node_index.get(node) else {
            return Vec::new();
        };
        let mut out: Vec<Node> = self
            .graph
            .neighbors(idx)
            .filter_map(|n| self.graph.node_weight(n).cloned())
            .collect();
        out.sort();
        out
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> Vec<Node> {
        self.graph
            .node_indices()
            .filter_map(|i| self.graph.node_weight(i).cloned())
            .collect()
    }

    /// All edges as name-ordered pairs, sorted.
    pub fn edges(&self) -> Vec<(Node, Node)> {
        let mut out: Vec<(Node, Node)> = self
            .graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
            .filter_map(|(a, b)| {
                let a = self.graph.node_weight(a)?.clone();
                let b = self.graph.node_weight(b)?.clone();
                Some(if a <= b { (a, b) } else { (b, a) })
            })
            .collect();
        out.sort();
        out
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Plain form for JSON: node names plus edge name pairs.
    pub fn to_document(&self) -> SkeletonDocument {
        SkeletonDocument {
            nodes: self.nodes(),
            edges: self.edges(),
        }
    }

    pub fn from_document(doc: &SkeletonDocument) -> Self {
        let mut graph = Self::with_nodes(&doc.nodes);
        for (a, b) in &doc.edges {
            graph.add_edge(a, b);
        }
        graph
    }
}

/// Serializable form of a [`SkeletonGraph`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkeletonDocument {
    pub nodes: Vec<Node>,
    pub edges: Vec<(Node, Node)>,
}

impl Serialize for SkeletonGraph {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_document().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SkeletonGraph {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        SkeletonDocument::deserialize(deserializer).map(|doc| Self::from_document(&doc))
    }
}
