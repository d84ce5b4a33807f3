//! Random number generator abstraction for determinism.
//!
//! Pacing jitter and prompt selection draw from a [`DeterministicRng`]. In
//! production this wraps an OS-seeded `StdRng`; in tests a fixed or
//! sequenced implementation is injected.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `u32` in the range `[min, max]` inclusive.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;

    /// Generate a random `f64` in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64;

    /// Returns `true` with the given probability.
    fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }
}

/// Production RNG seeded from the operating system.
#[derive(Debug)]
pub struct SystemRng(StdRng);

impl SystemRng {
    /// Creates an RNG seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self(StdRng::from_os_rng())
    }

    /// Creates a reproducible RNG from a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl DeterministicRng for SystemRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.0.random_range(min..=max)
    }

    fn next_f64(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_u32_range_stays_within_bounds() {
        let mut rng = SystemRng::seeded(7);
        for _ in 0..500 {
            let value = rng.next_u32_range(10, 20);
            assert!((10..=20).contains(&value));
        }
    }

    #[test]
    fn test_next_u32_range_with_collapsed_range_returns_min() {
        let mut rng = SystemRng::seeded(7);
        assert_eq!(rng.next_u32_range(42, 42), 42);
        assert_eq!(rng.next_u32_range(9, 3), 9);
    }

    #[test]
    fn test_seeded_rngs_are_reproducible() {
        let mut a = SystemRng::seeded(1234);
        let mut b = SystemRng::seeded(1234);
        for _ in 0..20 {
            assert_eq!(a.next_u32_range(0, 1000), b.next_u32_range(0, 1000));
        }
    }

    #[test]
    fn test_chance_edges() {
        let mut rng = SystemRng::seeded(99);
        for _ in 0..100 {
            assert!(!rng.chance(0.0));
            assert!(rng.chance(1.0));
        }
    }
}
