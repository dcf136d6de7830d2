//! Category sampling.
//!
//! Epistemic foundation:
//! - K_i: Output is exactly k distinct ids drawn from the pool
//! - K_i: Every permutation of the pool is equally likely (Fisher–Yates)
//! - B_i: The pool holds at least k distinct ids → Result
//! - I^R: Randomness is injected so rounds can be replayed from a seed

use crate::models::{CategoryId, QuizError, Result};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// Draws the categories for a round.
#[derive(Debug, Clone)]
pub struct Sampler<R = SmallRng> {
    rng: R,
}

impl Sampler<SmallRng> {
    /// Sampler seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_os_rng())
    }

    /// Deterministic sampler for replays and tests.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Sampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn select(&mut self, pool: &[CategoryId], k: usize) -> Result<Vec<CategoryId>> {
        select_category_ids(pool, k, &mut self.rng)
    }
}

/// Pick `k` distinct ids from `pool` in random order.
///
/// Repeated ids in `pool` count once.
pub fn select_category_ids<R: Rng + ?Sized>(
    pool: &[CategoryId],
    k: usize,
    rng: &mut R,
) -> Result<Vec<CategoryId>> {
    let mut seen = HashSet::with_capacity(pool.len());
    let mut ids: Vec<CategoryId> = pool.iter().copied().filter(|id| seen.insert(*id)).collect();

    if ids.len() < k {
        return Err(QuizError::InsufficientPool {
            required: k,
            available: ids.len(),
        });
    }

    shuffle(&mut ids, rng);
    ids.truncate(k);
    Ok(ids)
}

/// In-place Fisher–Yates shuffle.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        // j ∈ [0, i], never [0, len)
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}
