//! Conditional independence as d-separation in a known DAG.

use std::collections::VecDeque;

use fas_core::{FasError, FasResult, IndependenceTest, Node, TestOutcome};
use petgraph::algo::is_cyclic_directed;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::Direction;
use rustc_hash::{FxHashMap, FxHashSet};

use super::{DEPENDENT_P_VALUE, INDEPENDENT_P_VALUE};

/// Oracle that answers `x _||_ y | z` by d-separation.
///
/// Variables outside [`IndependenceTest::variables`] act as latents: they
/// take part in d-separation but are never handed to the search.
#[derive(Debug, Clone)]
pub struct DSeparationOracle {
    dag: StableDiGraph<Node, ()>,
    index: FxHashMap<Node, NodeIndex>,
    observed: Vec<Node>,
}

impl DSeparationOracle {
    /// Build from variables and directed `(from, to)` edges.
    pub fn new(variables: Vec<Node>, edges: &[(Node, Node)]) -> FasResult<Self> {
        let mut dag = StableDiGraph::default();
        let mut index = FxHashMap::default();
        for v in &variables {
            if index.contains_key(v) {
                return Err(FasError::InvalidGraph {
                    details: format!("duplicate variable {v}"),
                });
            }
            index.insert(v.clone(), dag.add_node(v.clone()));
        }
        for (from, to) in edges {
            let a = *index.get(from).ok_or_else(|| unknown(from))?;
            let b = *index.get(to).ok_or_else(|| unknown(to))?;
            if a == b {
                return Err(FasError::InvalidGraph {
                    details: format!("self loop on {from}"),
                });
            }
            if dag.find_edge(a, b).is_none() {
                dag.add_edge(a, b, ());
            }
        }
        if is_cyclic_directed(&dag) {
            return Err(FasError::InvalidGraph {
                details: "graph contains a directed cycle".to_string(),
            });
        }
        Ok(Self {
            dag,
            index,
            observed: variables,
        })
    }

    /// Convenience constructor from names.
    pub fn from_names(variables: &[&str], edges: &[(&str, &str)]) -> FasResult<Self> {
        let vars = fas_core::node::nodes(variables.iter().copied());
        let edges: Vec<(Node, Node)> = edges
            .iter()
            .map(|&(a, b)| (Node::new(a), Node::new(b)))
            .collect();
        Self::new(vars, &edges)
    }

    /// Restrict the variables exposed to the search; the rest become latent.
    pub fn with_observed(mut self, observed: Vec<Node>) -> FasResult<Self> {
        if let Some(missing) = observed.iter().find(|v| !self.index.contains_key(*v)) {
            return Err(unknown(missing));
        }
        self.observed = observed;
        Ok(self)
    }

    /// Whether every path between `x` and `y` is blocked by `z`.
    pub fn is_d_separated(&self, x: &Node, y: &Node, z: &[Node]) -> FasResult<bool> {
        let xi = self.lookup(x)?;
        let yi = self.lookup(y)?;
        let zs = z
            .iter()
            .map(|n| self.lookup(n))
            .collect::<FasResult<FxHashSet<NodeIndex>>>()?;
        Ok(!self.reachable(xi, yi, &zs))
    }

    fn lookup(&self, node: &Node) -> FasResult<NodeIndex> {
        self.index.get(node).copied().ok_or_else(|| unknown(node))
    }

    /// Ancestors of `z`, including `z` itself.
    fn ancestors(&self, z: &FxHashSet<NodeIndex>) -> FxHashSet<NodeIndex> {
        let mut seen: FxHashSet<NodeIndex> = z.clone();
        let mut stack: Vec<NodeIndex> = z.iter().copied().collect();
        while let Some(n) = stack.pop() {
            for p in self.dag.neighbors_directed(n, Direction::Incoming) {
                if seen.insert(p) {
                    stack.push(p);
                }
            }
        }
        seen
    }

    /// Active-trail reachability from `x` to `y` given `z` (Bayes ball).
    fn reachable(&self, x: NodeIndex, y: NodeIndex, z: &FxHashSet<NodeIndex>) -> bool {
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        enum Dir {
            // Arrived from a child, moving against the arrows.
            Up,
            // Arrived from a parent, moving along the arrows.
            Down,
        }

        let anc = self.ancestors(z);
        let mut visited: FxHashSet<(NodeIndex, Dir)> = FxHashSet::default();
        let mut queue: VecDeque<(NodeIndex, Dir)> = VecDeque::from([(x, Dir::Up)]);

        while let Some((n, dir)) = queue.pop_front() {
            if !visited.insert((n, dir)) {
                continue;
            }
            let blocked = z.contains(&n);
            if n == y && !blocked {
                return true;
            }
            match dir {
                Dir::Up if !blocked => {
                    for p in self.dag.neighbors_directed(n, Direction::Incoming) {
                        queue.push_back((p, Dir::Up));
                    }
                    for c in self.dag.neighbors_directed(n, Direction::Outgoing) {
                        queue.push_back((c, Dir::Down));
                    }
                }
                Dir::Up => {}
                Dir::Down => {
                    if !blocked {
                        for c in self.dag.neighbors_directed(n, Direction::Outgoing) {
                            queue.push_back((c, Dir::Down));
                        }
                    }
                    // Collider opened by a conditioned descendant.
                    if anc.contains(&n) {
                        for p in self.dag.neighbors_directed(n, Direction::Incoming) {
                            queue.push_back((p, Dir::Up));
                        }
                    }
                }
            }
        }
        false
    }
}

impl IndependenceTest for DSeparationOracle {
    fn variables(&self) -> &[Node] {
        &self.observed
    }

    fn check(&self, x: &Node, y: &Node, z: &[Node]) -> TestOutcome {
        if z.contains(x) || z.contains(y) {
            return TestOutcome::Failed {
                reason: format!("{x} or {y} appears in its own conditioning set"),
            };
        }
        match self.is_d_separated(x, y, z) {
            Ok(true) => TestOutcome::Independent {
                p_value: INDEPENDENT_P_VALUE,
            },
            Ok(false) => TestOutcome::Dependent {
                p_value: DEPENDENT_P_VALUE,
            },
            Err(e) => TestOutcome::Failed {
                reason: e.to_string(),
            },
        }
    }
}

fn unknown(node: &Node) -> FasError {
    FasError::UnknownVariable {
        name: node.name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(name: &str) -> Node {
        Node::new(name)
    }

    #[test]
    fn chain_is_separated_by_middle() {
        let o = DSeparationOracle::from_names(&["X", "Z", "Y"], &[("X", "Z"), ("Z", "Y")]).unwrap();
        assert!(!o.is_d_separated(&n("X"), &n("Y"), &[]).unwrap());
        assert!(o.is_d_separated(&n("X"), &n("Y"), &[n("Z")]).unwrap());
    }

    #[test]
    fn fork_is_separated_by_common_cause() {
        let o = DSeparationOracle::from_names(&["X", "Z", "Y"], &[("Z", "X"), ("Z", "Y")]).unwrap();
        assert!(!o.is_d_separated(&n("X"), &n("Y"), &[]).unwrap());
        assert!(o.is_d_separated(&n("X"), &n("Y"), &[n("Z")]).unwrap());
    }

    #[test]
    fn collider_opens_when_conditioned() {
        let o = DSeparationOracle::from_names(
            &["X", "Y", "C", "D"],
            &[("X", "C"), ("Y", "C"), ("C", "D")],
        )
        .unwrap();
        assert!(o.is_d_separated(&n("X"), &n("Y"), &[]).unwrap());
        assert!(!o.is_d_separated(&n("X"), &n("Y"), &[n("C")]).unwrap());
        // Conditioning on a descendant of the collider also opens it.
        assert!(!o.is_d_separated(&n("X"), &n("Y"), &[n("D")]).unwrap());
    }

    #[test]
    fn cycles_and_unknown_variables_are_rejected() {
        let cyclic = DSeparationOracle::from_names(&["A", "B"], &[("A", "B"), ("B", "A")]);
        assert!(matches!(cyclic, Err(FasError::InvalidGraph { .. })));

        let unknown = DSeparationOracle::from_names(&["A"], &[("A", "B")]);
        assert!(matches!(unknown, Err(FasError::UnknownVariable { .. })));
    }

    #[test]
    fn latent_common_cause_keeps_observed_pair_dependent() {
        let o = DSeparationOracle::from_names(&["L", "X", "Y"], &[("L", "X"), ("L", "Y")])
            .unwrap()
            .with_observed(vec![n("X"), n("Y")])
            .unwrap();
        assert_eq!(o.variables().len(), 2);
        assert!(!o.is_independent(&n("X"), &n("Y"), &[]));
    }

    #[test]
    fn check_reports_failure_for_unknown_variable() {
        let o = DSeparationOracle::from_names(&["A", "B"], &[]).unwrap();
        assert!(o.check(&n("A"), &n("Q"), &[]).is_failed());
        assert_eq!(
            o.check(&n("A"), &n("B"), &[]),
            TestOutcome::Independent { p_value: 1.0 }
        );
    }
}
