//! Background-knowledge contract, keyed by variable name.

/// Read-only edge constraints consulted by the search.
///
/// `is_forbidden` and `is_required` are directed: `(from, to)` talks about
/// the edge `from -> to`.
pub trait KnowledgeStore: Send + Sync {
    fn is_forbidden(&self, from: &str, to: &str) -> bool;

    fn is_required(&self, from: &str, to: &str) -> bool;

    /// The undirected edge `a -- b` is ruled out: forbidden both ways.
    fn edge_forbidden(&self, a: &str, b: &str) -> bool {
        self.is_forbidden(a, b) && self.is_forbidden(b, a)
    }

    /// Neither orientation of `a -- b` is required.
    fn no_edge_required(&self, a: &str, b: &str) -> bool {
        !(self.is_required(a, b) || self.is_required(b, a))
    }

    fn is_empty(&self) -> bool {
        false
    }
}
