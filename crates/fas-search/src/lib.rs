//! # fas-search
//!
//! Fast Adjacency Search. Finds the undirected skeleton of a causal graph by
//! conditional-independence testing with conditioning sets of increasing
//! size, recording the set that separated each removed pair.

pub mod adjacency;
pub mod choice;
pub mod engine;
pub mod fact;
pub mod graph;
pub mod oracle;
mod phases;
pub mod result;
pub mod sepset;
pub mod stats;

pub use adjacency::AdjacencyMap;
pub use choice::ChoiceGenerator;
pub use engine::Fas;
pub use graph::SkeletonGraph;
pub use oracle::{DSeparationOracle, IndependenceFacts};
pub use result::SkeletonResult;
pub use sepset::SepsetMap;
pub use stats::SearchStats;
