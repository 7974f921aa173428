/// Background-knowledge errors.
#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    #[error("edge {from} -> {to} is both required and forbidden")]
    Conflict { from: String, to: String },

    #[error("tier {tier} does not exist (knowledge has {tier_count} tiers)")]
    UnknownTier { tier: usize, tier_count: usize },
}
