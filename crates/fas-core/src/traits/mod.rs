pub mod independence_test;
pub mod knowledge_store;

pub use independence_test::{IndependenceTest, TestOutcome};
pub use knowledge_store::KnowledgeStore;
