//! Undirected graph store for seeds and results.

pub mod skeleton_graph;

pub use skeleton_graph::SkeletonGraph;
