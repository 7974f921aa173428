//! Error handling for the search workspace.
//! One error enum per concern, `thiserror` only.

pub mod config_error;
pub mod fas_error;
pub mod knowledge_error;

pub use config_error::ConfigError;
pub use fas_error::{FasError, FasResult};
pub use knowledge_error::KnowledgeError;
