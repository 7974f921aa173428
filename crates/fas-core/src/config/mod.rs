//! Configuration system for the search.
//! TOML-based, 3-layer resolution: env > file > defaults.

pub mod defaults;
pub mod fas_config;
pub mod knowledge_config;
pub mod observability_config;
pub mod search_config;

pub use fas_config::FasConfig;
pub use knowledge_config::KnowledgeConfig;
pub use observability_config::ObservabilityConfig;
pub use search_config::SearchConfig;
