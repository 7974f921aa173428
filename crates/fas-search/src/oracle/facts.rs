//! Oracle answering from an explicit list of independence facts.

use std::collections::BTreeSet;

use fas_core::{FasError, FasResult, IndependenceTest, Node, TestOutcome};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::{DEPENDENT_P_VALUE, INDEPENDENT_P_VALUE};

/// One asserted fact `x _||_ y | given`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactSpec {
    pub x: String,
    pub y: String,
    #[serde(default)]
    pub given: Vec<String>,
}

/// Serializable oracle definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactsDocument {
    pub variables: Vec<String>,
    #[serde(default)]
    pub independencies: Vec<FactSpec>,
    /// Variables whose tests cannot be evaluated.
    #[serde(default)]
    pub unevaluable: Vec<String>,
}

type FactKey = (Node, Node, BTreeSet<Node>);

/// Every query not listed as independent is dependent. Any query touching
/// an unevaluable variable fails.
#[derive(Debug, Clone, Default)]
pub struct IndependenceFacts {
    variables: Vec<Node>,
    known: FxHashSet<Node>,
    facts: FxHashSet<FactKey>,
    unevaluable: FxHashSet<Node>,
}

impl IndependenceFacts {
    /// Oracle over `variables` with no facts yet. Names must be unique.
    pub fn new(variables: Vec<Node>) -> FasResult<Self> {
        let mut known = FxHashSet::default();
        for v in &variables {
            if !known.insert(v.clone()) {
                return Err(FasError::InvalidGraph {
                    details: format!("duplicate variable {v}"),
                });
            }
        }
        Ok(Self {
            variables,
            known,
            ..Default::default()
        })
    }

    pub fn from_document(doc: &FactsDocument) -> FasResult<Self> {
        let mut oracle = Self::new(fas_core::node::nodes(&doc.variables))?;
        for fact in &doc.independencies {
            let given = fas_core::node::nodes(&fact.given);
            oracle.add_fact(&Node::new(&fact.x), &Node::new(&fact.y), &given)?;
        }
        for name in &doc.unevaluable {
            oracle.mark_unevaluable(&Node::new(name))?;
        }
        Ok(oracle)
    }

    /// Assert `x _||_ y | given`.
    pub fn add_fact(&mut self, x: &Node, y: &Node, given: &[Node]) -> FasResult<()> {
        for node in [x, y].into_iter().chain(given) {
            self.require_known(node)?;
        }
        self.facts.insert(key(x, y, given));
        Ok(())
    }

    /// Make every test involving `node` fail.
    pub fn mark_unevaluable(&mut self, node: &Node) -> FasResult<()> {
        self.require_known(node)?;
        self.unevaluable.insert(node.clone());
        Ok(())
    }

    pub fn fact_count(&self) -> usize {
        self.facts.len()
    }

    fn require_known(&self, node: &Node) -> FasResult<()> {
        if self.known.contains(node) {
            Ok(())
        } else {
            Err(FasError::UnknownVariable {
                name: node.name().to_string(),
            })
        }
    }
}

impl IndependenceTest for IndependenceFacts {
    fn variables(&self) -> &[Node] {
        &self.variables
    }

    fn check(&self, x: &Node, y: &Node, z: &[Node]) -> TestOutcome {
        if let Some(bad) = [x, y]
            .into_iter()
            .chain(z)
            .find(|n| self.unevaluable.contains(*n))
        {
            return TestOutcome::Failed {
                reason: format!("test involving {bad} cannot be evaluated"),
            };
        }
        if self.facts.contains(&key(x, y, z)) {
            TestOutcome::Independent {
                p_value: INDEPENDENT_P_VALUE,
            }
        } else {
            TestOutcome::Dependent {
                p_value: DEPENDENT_P_VALUE,
            }
        }
    }
}

fn key(x: &Node, y: &Node, z: &[Node]) -> FactKey {
    let (a, b) = if x <= y { (x, y) } else { (y, x) };
    (a.clone(), b.clone(), z.iter().cloned().collect())
}
