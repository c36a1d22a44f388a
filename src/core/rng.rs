//! Seeded randomness for the stochastic algorithms.
//!
//! Every stochastic algorithm owns a `SearchRng` built from the seed in its
//! configuration. Random restarts give each run its own [`fork`], so adding
//! or removing a run never shifts the draws of the runs before it.
//!
//! ```
//! use sealgo::core::SearchRng;
//!
//! let mut a = SearchRng::new(7);
//! let mut b = SearchRng::new(7);
//! assert_eq!(a.gen_range(0..100), b.gen_range(0..100));
//!
//! let mut run = a.fork();
//! assert_ne!(run.seed(), a.seed());
//! ```
//!
//! [`fork`]: SearchRng::fork

use std::ops::Range;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Golden-ratio increment spreading fork seeds apart.
const FORK_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// ChaCha8 stream with deterministic forking.
#[derive(Clone, Debug)]
pub struct SearchRng {
    inner: ChaCha8Rng,
    seed: u64,
    forks: u64,
}

impl SearchRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            forks: 0,
        }
    }

    /// A new independent stream. The n-th fork of a given seed is always the
    /// same stream, whatever was drawn from the parent in between.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.forks += 1;
        Self::new(self.seed.wrapping_add(self.forks.wrapping_mul(FORK_STRIDE)))
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform index in `range`. The range must not be empty.
    pub fn gen_range(&mut self, range: Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// True with probability `p`, clamped into `[0, 1]`. NaN counts as 0.
    pub fn gen_bool(&mut self, p: f64) -> bool {
        if p.is_nan() || p <= 0.0 {
            false
        } else if p >= 1.0 {
            true
        } else {
            self.inner.gen_bool(p)
        }
    }

    /// Uniformly chosen element, or `None` for an empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.inner)
    }

    /// Index drawn proportionally to `weights` (roulette wheel).
    ///
    /// Returns `None` when there is no positive, finite total weight.
    /// Negative weights are treated as zero.
    pub fn choose_weighted(&mut self, weights: &[f64]) -> Option<usize> {
        let total: f64 = weights.iter().map(|w| w.max(0.0)).sum();
        if !(total > 0.0 && total.is_finite()) {
            return None;
        }

        let mut spin = self.inner.gen::<f64>() * total;
        for (i, w) in weights.iter().enumerate() {
            let w = w.max(0.0);
            if w > 0.0 && spin < w {
                return Some(i);
            }
            spin -= w;
        }
        // Rounding left the spin past the last slot
        weights.iter().rposition(|&w| w > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_draws() {
        let mut a = SearchRng::new(42);
        let mut b = SearchRng::new(42);
        let xs: Vec<usize> = (0..50).map(|_| a.gen_range(0..1000)).collect();
        let ys: Vec<usize> = (0..50).map(|_| b.gen_range(0..1000)).collect();
        assert_eq!(xs, ys);

        let mut c = SearchRng::new(43);
        let zs: Vec<usize> = (0..50).map(|_| c.gen_range(0..1000)).collect();
        assert_ne!(xs, zs);
    }

    #[test]
    fn test_forks_ignore_parent_draws() {
        let mut quiet = SearchRng::new(5);
        let mut busy = SearchRng::new(5);
        for _ in 0..10 {
            busy.gen_range(0..10);
        }

        let first = quiet.fork();
        assert_eq!(first.seed(), busy.fork().seed());
        assert_ne!(first.seed(), quiet.fork().seed());
    }

    #[test]
    fn test_gen_bool_clamps() {
        let mut rng = SearchRng::new(7);
        for _ in 0..20 {
            assert!(!rng.gen_bool(0.0));
            assert!(!rng.gen_bool(-1.0));
            assert!(!rng.gen_bool(f64::NAN));
            assert!(rng.gen_bool(1.0));
            assert!(rng.gen_bool(3.0));
        }
    }

    #[test]
    fn test_choose() {
        let mut rng = SearchRng::new(1);
        let empty: [u8; 0] = [];
        assert_eq!(rng.choose(&empty), None);
        assert_eq!(rng.choose(&[9]), Some(&9));
    }

    #[test]
    fn test_choose_weighted() {
        let mut rng = SearchRng::new(3);
        for _ in 0..20 {
            assert_eq!(rng.choose_weighted(&[0.0, 2.0, 0.0]), Some(1));
        }
        assert_eq!(rng.choose_weighted(&[]), None);
        assert_eq!(rng.choose_weighted(&[0.0, -1.0]), None);
        assert_eq!(rng.choose_weighted(&[f64::INFINITY, 1.0]), None);
    }

    #[test]
    fn test_choose_weighted_follows_weights() {
        let mut rng = SearchRng::new(11);
        let mut counts = [0u32; 2];
        for _ in 0..2000 {
            if let Some(i) = rng.choose_weighted(&[1.0, 3.0]) {
                counts[i] += 1;
            }
        }
        assert!(counts[1] > 2 * counts[0]);
    }
}
