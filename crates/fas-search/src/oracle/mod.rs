//! Reference oracles that answer CI queries without data.
//!
//! Useful for checking the search against a known truth: with a perfect
//! oracle the search must recover the exact skeleton.

pub mod dsep;
pub mod facts;

pub use dsep::DSeparationOracle;
pub use facts::{FactSpec, FactsDocument, IndependenceFacts};

/// p-value reported for an independence judgment from a perfect oracle.
pub const INDEPENDENT_P_VALUE: f64 = 1.0;
/// p-value reported for a dependence judgment from a perfect oracle.
pub const DEPENDENT_P_VALUE: f64 = 0.0;
