//! k-subsets of `0..n` in lexicographic order.

/// Iterator over all `k`-element subsets of `0..n`, lexicographic.
///
/// Holds only the current choice, so a clone restarts from the same point.
/// `k == 0` yields a single empty subset; `k > n` yields nothing.
#[derive(Debug, Clone)]
pub struct ChoiceGenerator {
    n: usize,
    k: usize,
    current: Option<Vec<usize>>,
}

impl ChoiceGenerator {
    pub fn new(n: usize, k: usize) -> Self {
        let current = (k <= n).then(|| (0..k).collect());
        Self { n, k, current }
    }

    fn advance(&mut self) {
        let Some(choice) = self.current.as_mut() else {
            return;
        };
        // Rightmost position that can still move right.
        let mut i = self.k;
        while i > 0 {
            i -= 1;
            if choice[i] < self.n - self.k + i {
                choice[i] += 1;
                for j in i + 1..self.k {
                    choice[j] = choice[j - 1] + 1;
                }
                return;
            }
        }
        self.current = None;
    }
}

impl Iterator for ChoiceGenerator {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let out = self.current.clone()?;
        self.advance();
        Some(out)
    }
}
