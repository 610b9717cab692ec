//! Precomputed pool of random turn offsets.
//!
//! Ants do not carry RNG state. Each heading pass looks its offset up in a
//! pool filled once at startup, at a slot derived from the pass counter and
//! the ant's index, so the same `(tick, index)` always turns the same way.

use crate::error::{ensure_angle_range, ConfigError, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, PartialEq)]
pub struct RandomAngleSource {
    pool: Vec<f32>,
}

impl RandomAngleSource {
    /// Fills `count` uniform samples from `[min, max]` using `rng`.
    pub fn generate<R: Rng>(count: usize, range: (f32, f32), rng: &mut R) -> Result<Self> {
        let (min, max) = range;
        if count == 0 {
            return Err(ConfigError::EmptyRandomPool);
        }
        ensure_angle_range(min, max)?;

        let pool = if min == max {
            vec![min; count]
        } else {
            (0..count).map(|_| rng.gen_range(min..=max)).collect()
        };
        tracing::debug!(count, min, max, "Generated random angle pool");
        Ok(Self { pool })
    }

    /// Same as [`RandomAngleSource::generate`] with a `ChaCha8Rng` seeded from `seed`.
    pub fn from_seed(count: usize, range: (f32, f32), seed: u64) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::generate(count, range, &mut rng)
    }

    /// Pool slot for ant `agent_index` on heading pass `tick`.
    #[inline]
    #[must_use]
    pub fn slot(&self, tick: u64, agent_index: usize) -> usize {
        let mangled = tick.wrapping_mul(13) ^ (tick >> 2).wrapping_mul(agent_index as u64);
        (mangled % self.pool.len() as u64) as usize
    }

    #[inline]
    #[must_use]
    pub fn angle_for(&self, tick: u64, agent_index: usize) -> f32 {
        self.pool[self.slot(tick, agent_index)]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    #[must_use]
    pub fn pool(&self) -> &[f32] {
        &self.pool
    }
}
