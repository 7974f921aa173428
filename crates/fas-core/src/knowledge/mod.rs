//! Background knowledge: explicit forbidden/required edges and temporal tiers.
//!
//! A variable in a later tier may not cause one in an earlier tier, so
//! `is_forbidden(later, earlier)` holds for every such pair. A tier flagged
//! "forbidden within" additionally rules out every edge between its members.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::KnowledgeConfig;
use crate::errors::KnowledgeError;
use crate::traits::KnowledgeStore;

type DirectedEdge = (String, String);

/// In-memory knowledge store.
#[derive(Debug, Clone, Default)]
pub struct Knowledge {
    forbidden: FxHashSet<DirectedEdge>,
    required: FxHashSet<DirectedEdge>,
    tiers: Vec<Vec<String>>,
    tier_of: FxHashMap<String, usize>,
    forbidden_within: FxHashSet<usize>,
}

impl Knowledge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the `[knowledge]` config section.
    pub fn from_config(config: &KnowledgeConfig) -> Result<Self, KnowledgeError> {
        let mut knowledge = Self::new();
        for (tier, members) in config.tiers.iter().enumerate() {
            for name in members {
                knowledge.add_to_tier(tier, name)?;
            }
        }
        for &tier in &config.forbidden_within_tiers {
            knowledge.set_tier_forbidden_within(tier, true)?;
        }
        for (from, to) in &config.forbidden {
            knowledge.set_forbidden(from, to)?;
        }
        for (from, to) in &config.required {
            knowledge.set_required(from, to)?;
        }
        Ok(knowledge)
    }

    /// Forbid `from -> to`.
    pub fn set_forbidden(&mut self, from: &str, to: &str) -> Result<(), KnowledgeError> {
        if self.required.contains(&edge(from, to)) {
            return Err(conflict(from, to));
        }
        self.forbidden.insert(edge(from, to));
        Ok(())
    }

    /// Require `from -> to`.
    pub fn set_required(&mut self, from: &str, to: &str) -> Result<(), KnowledgeError> {
        if self.is_forbidden(from, to) {
            return Err(conflict(from, to));
        }
        self.required.insert(edge(from, to));
        Ok(())
    }

    pub fn remove_forbidden(&mut self, from: &str, to: &str) -> bool {
        self.forbidden.remove(&edge(from, to))
    }

    /// Place `name` in `tier`, moving it out of any previous tier.
    /// Tiers up to `tier` are created as needed.
    pub fn add_to_tier(&mut self, tier: usize, name: &str) -> Result<(), KnowledgeError> {
        let previous = self.tier_of.get(name).copied();
        self.place(tier, name);

        if let Err(err) = self.check_required() {
            match previous {
                Some(prev) => self.place(prev, name),
                None => self.unplace(name),
            }
            return Err(err);
        }
        Ok(())
    }

    /// Flag (or unflag) a tier so its members may not be adjacent.
    pub fn set_tier_forbidden_within(
        &mut self,
        tier: usize,
        forbidden: bool,
    ) -> Result<(), KnowledgeError> {
        if tier >= self.tiers.len() {
            return Err(KnowledgeError::UnknownTier {
                tier,
                tier_count: self.tiers.len(),
            });
        }
        if !forbidden {
            self.forbidden_within.remove(&tier);
            return Ok(());
        }
        self.forbidden_within.insert(tier);
        if let Err(err) = self.check_required() {
            self.forbidden_within.remove(&tier);
            return Err(err);
        }
        Ok(())
    }

    pub fn tier_of(&self, name: &str) -> Option<usize> {
        self.tier_of.get(name).copied()
    }

    pub fn tiers(&self) -> &[Vec<String>] {
        &self.tiers
    }

    fn place(&mut self, tier: usize, name: &str) {
        self.unplace(name);
        if self.tiers.len() <= tier {
            self.tiers.resize_with(tier + 1, Vec::new);
        }
        self.tiers[tier].push(name.to_string());
        self.tier_of.insert(name.to_string(), tier);
    }

    fn unplace(&mut self, name: &str) {
        if let Some(old) = self.tier_of.remove(name) {
            self.tiers[old].retain(|n| n != name);
        }
    }

    fn forbidden_by_tiers(&self, from: &str, to: &str) -> bool {
        match (self.tier_of.get(from), self.tier_of.get(to)) {
            (Some(&f), Some(&t)) if f > t => true,
            (Some(&f), Some(&t)) if f == t => from != to && self.forbidden_within.contains(&f),
            _ => false,
        }
    }

    fn check_required(&self) -> Result<(), KnowledgeError> {
        match self
            .required
            .iter()
            .find(|(from, to)| self.is_forbidden(from, to))
        {
            Some((from, to)) => Err(conflict(from, to)),
            None => Ok(()),
        }
    }
}

impl KnowledgeStore for Knowledge {
    fn is_forbidden(&self, from: &str, to: &str) -> bool {
        self.forbidden.contains(&edge(from, to)) || self.forbidden_by_tiers(from, to)
    }

    fn is_required(&self, from: &str, to: &str) -> bool {
        self.required.contains(&edge(from, to))
    }

    fn is_empty(&self) -> bool {
        self.forbidden.is_empty() && self.required.is_empty() && self.tier_of.is_empty()
    }
}

/// Knowledge that permits every edge and requires none.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyKnowledge;

impl KnowledgeStore for EmptyKnowledge {
    fn is_forbidden(&self, _from: &str, _to: &str) -> bool {
        false
    }

    fn is_required(&self, _from: &str, _to: &str) -> bool {
        false
    }

    fn is_empty(&self) -> bool {
        true
    }
}

fn edge(from: &str, to: &str) -> DirectedEdge {
    (from.to_string(), to.to_string())
}

fn conflict(from: &str, to: &str) -> KnowledgeError {
    KnowledgeError::Conflict {
        from: from.to_string(),
        to: to.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_forbidden_is_directed() {
        let mut k = Knowledge::new();
        k.set_forbidden("A", "B").unwrap();
        assert!(k.is_forbidden("A", "B"));
        assert!(!k.is_forbidden("B", "A"));
        assert!(!k.edge_forbidden("A", "B"));

        k.set_forbidden("B", "A").unwrap();
        assert!(k.edge_forbidden("A", "B"));
    }

    #[test]
    fn later_tier_cannot_cause_earlier() {
        let mut k = Knowledge::new();
        k.add_to_tier(0, "Age").unwrap();
        k.add_to_tier(1, "Income").unwrap();
        assert!(k.is_forbidden("Income", "Age"));
        assert!(!k.is_forbidden("Age", "Income"));
    }

    #[test]
    fn forbidden_within_tier_blocks_both_directions() {
        let mut k = Knowledge::new();
        k.add_to_tier(0, "A").unwrap();
        k.add_to_tier(0, "B").unwrap();
        k.set_tier_forbidden_within(0, true).unwrap();
        assert!(k.edge_forbidden("A", "B"));
        assert!(!k.is_forbidden("A", "A"));
    }

    #[test]
    fn required_conflicting_with_tiers_is_rolled_back() {
        let mut k = Knowledge::new();
        k.set_required("B", "A").unwrap();
        k.add_to_tier(0, "A").unwrap();
        let err = k.add_to_tier(1, "B").unwrap_err();
        assert!(matches!(err, KnowledgeError::Conflict { .. }));
        assert_eq!(k.tier_of("B"), None);
        assert!(!k.is_forbidden("B", "A"));
    }

    #[test]
    fn moving_a_variable_between_tiers() {
        let mut k = Knowledge::new();
        k.add_to_tier(0, "X").unwrap();
        k.add_to_tier(2, "X").unwrap();
        assert_eq!(k.tier_of("X"), Some(2));
        assert!(k.tiers()[0].is_empty());
        assert_eq!(k.tiers().len(), 3);
    }

    #[test]
    fn unknown_tier_is_rejected() {
        let mut k = Knowledge::new();
        let err = k.set_tier_forbidden_within(3, true).unwrap_err();
        assert!(matches!(
            err,
            KnowledgeError::UnknownTier {
                tier: 3,
                tier_count: 0
            }
        ));
    }
}
