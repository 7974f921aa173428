//! Conditional-independence oracle contract.

use serde::{Deserialize, Serialize};

use crate::node::Node;

/// Outcome of a single conditional-independence test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TestOutcome {
    /// The oracle judged `x _||_ y | z`.
    Independent { p_value: f64 },
    /// The oracle judged `x` and `y` dependent given `z`.
    Dependent { p_value: f64 },
    /// The test could not be evaluated (singular data, missing variable, ...).
    Failed { reason: String },
}

impl TestOutcome {
    /// Failed tests count as dependent, which keeps the edge.
    pub fn is_independent(&self) -> bool {
        matches!(self, TestOutcome::Independent { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, TestOutcome::Failed { .. })
    }

    pub fn p_value(&self) -> Option<f64> {
        match self {
            TestOutcome::Independent { p_value } | TestOutcome::Dependent { p_value } => {
                Some(*p_value)
            }
            TestOutcome::Failed { .. } => None,
        }
    }
}

/// A conditional-independence oracle over a fixed variable universe.
///
/// Implementations must tolerate arbitrary interleaving of queries and be
/// shareable across threads; a test with state must use interior mutability.
pub trait IndependenceTest: Send + Sync {
    /// The variable universe, in the order the search iterates it.
    fn variables(&self) -> &[Node];

    /// Is `x` independent of `y` given `z`?
    fn check(&self, x: &Node, y: &Node, z: &[Node]) -> TestOutcome;

    /// Convenience wrapper over [`IndependenceTest::check`].
    fn is_independent(&self, x: &Node, y: &Node, z: &[Node]) -> bool {
        self.check(x, y, z).is_independent()
    }
}
