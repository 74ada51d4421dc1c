//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct wraps a seedable `StdRng` and provides the
//! handful of draws the selectors and mutation operators need.
//!
//! ## Example
//!
//! ```rust
//! use assemblage::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let index = rng.pick_index(10).unwrap();
//! assert!(index < 10);
//! ```

use rand::{rngs::StdRng, Rng, SeedableRng};

/// A wrapper around the `rand` crate's `StdRng`.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible runs and tests.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Derives an independent generator from this one.
    ///
    /// Each call to a selector gets its own child generator so the lazy selection
    /// sequence can own its randomness.
    pub fn fork(&mut self) -> Self {
        Self {
            rng: StdRng::seed_from_u64(self.rng.gen()),
        }
    }

    /// Draws a float uniformly from `[from, to)`.
    pub fn uniform(&mut self, from: f64, to: f64) -> f64 {
        self.rng.gen_range(from..to)
    }

    /// Picks an index in `0..len` uniformly, or `None` when `len` is zero.
    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.rng.gen_range(0..len))
    }

    /// Picks an index in `0..len` that differs from `excluded`.
    ///
    /// Returns `None` when no such index exists.
    pub fn pick_index_except(&mut self, len: usize, excluded: usize) -> Option<usize> {
        if excluded >= len {
            return self.pick_index(len);
        }
        let idx = self.pick_index(len - 1)?;
        Some(if idx >= excluded { idx + 1 } else { idx })
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_stays_in_range() {
        let mut rng = RandomNumberGenerator::from_seed(3);
        for _ in 0..100 {
            let x = rng.uniform(-1.0, 1.0);
            assert!((-1.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_pick_index_empty() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        assert_eq!(rng.pick_index(0), None);
    }

    #[test]
    fn test_pick_index_except_never_returns_excluded() {
        let mut rng = RandomNumberGenerator::from_seed(42);
        for _ in 0..200 {
            let idx = rng.pick_index_except(4, 2).unwrap();
            assert!(idx < 4);
            assert_ne!(idx, 2);
        }
        assert_eq!(rng.pick_index_except(1, 0), None);
    }

    #[test]
    fn test_clone() {
        let mut rng1 = RandomNumberGenerator::from_seed(42);
        let mut rng2 = rng1.clone();

        let nums1: Vec<f64> = (0..5).map(|_| rng1.uniform(0.0, 1.0)).collect();
        let nums2: Vec<f64> = (0..5).map(|_| rng2.uniform(0.0, 1.0)).collect();

        assert_eq!(nums1, nums2);
    }

    #[test]
    fn test_fork_is_deterministic_for_seeded_parent() {
        let mut a = RandomNumberGenerator::from_seed(9);
        let mut b = RandomNumberGenerator::from_seed(9);

        let mut child_a = a.fork();
        let mut child_b = b.fork();

        assert_eq!(child_a.pick_index(1000), child_b.pick_index(1000));
    }
}
