use super::{ConfigError, KnowledgeError};

/// Errors surfaced by search configuration and oracle construction.
///
/// The search itself never fails: a CI test that cannot be evaluated is a
/// [`crate::TestOutcome::Failed`] value, not an error.
#[derive(Debug, thiserror::Error)]
pub enum FasError {
    #[error("invalid depth {depth}: must be -1 (unbounded) or >= 0")]
    InvalidDepth { depth: i64 },

    #[error("unknown variable: {name}")]
    UnknownVariable { name: String },

    #[error("invalid graph: {details}")]
    InvalidGraph { details: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Knowledge(#[from] KnowledgeError),
}

pub type FasResult<T> = Result<T, FasError>;
