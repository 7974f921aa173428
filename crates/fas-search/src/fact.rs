//! Deduplication key for CI tests within one depth pass.

use smallvec::SmallVec;

/// `(x, y, z)` over arena indices; unordered in `x`/`y` and in `z`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndependenceFact {
    x: usize,
    y: usize,
    z: SmallVec<[usize; 4]>,
}

impl IndependenceFact {
    pub fn new(x: usize, y: usize, z: &[usize]) -> Self {
        let (x, y) = if x <= y { (x, y) } else { (y, x) };
        let mut z: SmallVec<[usize; 4]> = SmallVec::from_slice(z);
        z.sort_unstable();
        Self { x, y, z }
    }
}
