//! Test RNG — deterministic `DeterministicRng` implementations for tests.

use orenda_core::rng::DeterministicRng;

/// A no-op RNG that always returns `min` for `next_u32_range` and `0.0` for
/// `next_f64`. Every `chance(p)` with `p > 0` therefore succeeds.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }

    fn next_f64(&mut self) -> f64 {
        0.0
    }
}

/// An RNG that returns values from predetermined sequences, wrapping around
/// when a sequence is exhausted. Used where tests need specific pause
/// lengths or prompt picks.
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<u32>,
    index: usize,
    fractions: Vec<f64>,
    fraction_index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` with the given integer values. `next_f64`
    /// returns `0.0` until fractions are supplied.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty.
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        assert!(!values.is_empty(), "SequenceRng needs at least one value");
        Self {
            values,
            index: 0,
            fractions: Vec::new(),
            fraction_index: 0,
        }
    }

    /// Supplies the sequence returned by `next_f64`.
    #[must_use]
    pub fn with_fractions(mut self, fractions: Vec<f64>) -> Self {
        self.fractions = fractions;
        self.fraction_index = 0;
        self
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, _min: u32, _max: u32) -> u32 {
        let val = self.values[self.index % self.values.len()];
        self.index += 1;
        val
    }

    fn next_f64(&mut self) -> f64 {
        if self.fractions.is_empty() {
            return 0.0;
        }
        let val = self.fractions[self.fraction_index % self.fractions.len()];
        self.fraction_index += 1;
        val
    }
}
