//! The simulation-wide deterministic RNG.
//!
//! # Determinism strategy
//!
//! Every random draw in a run comes from one `SimRng` owned by the
//! simulation and threaded through the phases by `&mut`.  Draws therefore
//! happen in exactly the phase / creation order the tick loop visits agents,
//! and a fixed seed reproduces the run bit for bit.
//!
//! Batch jobs that run side by side each own an independent `SimRng` seeded
//! from the job's own seed.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seeded simulation RNG.
///
/// Not `Sync`: a stream must never be shared between threads.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Draw `u ~ U[0, 1)` and return `u < p`.
    ///
    /// Always consumes exactly one draw, even when `p` is 0 or 1, so the
    /// stream stays aligned no matter how probabilities are configured.
    #[inline]
    pub fn chance(&mut self, p: f64) -> bool {
        self.random::<f64>() < p
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }

    /// `amount` distinct indices from `0..len`, in sampling order.
    ///
    /// # Panics
    /// Panics if `amount > len`.
    pub fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.0, len, amount).into_vec()
    }
}
