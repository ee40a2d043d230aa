//! Active-user sampling
//!
//! The generator does not track real activity; it derives an active-user
//! figure from the total through an [`ActiveSampler`]. The source is a
//! trait so tests can substitute a deterministic sequence for the default
//! random draw.

use rand::Rng;

/// Source of active-user counts
pub trait ActiveSampler: Send + 'static {
    /// Pick an active-user count for the given total
    ///
    /// Implementations should return a value in `0..=total`; the generator
    /// clamps out-of-range values.
    fn sample(&mut self, total: u64) -> u64;
}

/// Uniform random sampler over `0..=total`
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSampler;

impl ActiveSampler for RandomSampler {
    fn sample(&mut self, total: u64) -> u64 {
        rand::thread_rng().gen_range(0..=total)
    }
}

/// Deterministic sampler cycling through a fixed sequence
///
/// Intended for tests. An empty sequence always samples 0.
#[derive(Debug, Clone)]
pub struct SequenceSampler {
    values: Vec<u64>,
    next: usize,
}

impl SequenceSampler {
    /// Create a sampler that cycles through `values`
    pub fn new(values: impl Into<Vec<u64>>) -> Self {
        Self {
            values: values.into(),
            next: 0,
        }
    }
}

impl ActiveSampler for SequenceSampler {
    fn sample(&mut self, _total: u64) -> u64 {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }
}
