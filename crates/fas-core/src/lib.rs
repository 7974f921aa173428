//! # fas-core
//!
//! Foundation crate for the Fast Adjacency Search workspace.
//! Defines variables, the oracle and knowledge contracts, errors, config,
//! defaults, and tracing setup. Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod knowledge;
pub mod node;
pub mod traits;
pub mod tracing;

// Re-export the most commonly used types at the crate root.
pub use config::FasConfig;
pub use errors::{FasError, FasResult};
pub use knowledge::{EmptyKnowledge, Knowledge};
pub use node::Node;
pub use traits::{IndependenceTest, KnowledgeStore, TestOutcome};
