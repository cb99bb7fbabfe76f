//! Uniform random sources

use crate::error::SceneError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Independent uniform draws over a closed range
pub trait RandomSource {
    /// Draw a value in `[min, max]`
    fn uniform(&mut self, min: f32, max: f32) -> Result<f32, SceneError>;
}

/// Unbounded source backed by any `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R: Rng = StdRng> {
    rng: R,
}

impl RngSource<StdRng> {
    /// Reproducible source for a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Source seeded from the operating system
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RngSource<R> {
    /// Wrap an existing generator
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn uniform(&mut self, min: f32, max: f32) -> Result<f32, SceneError> {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        if lo == hi {
            return Ok(lo);
        }
        Ok(self.rng.gen_range(lo..=hi))
    }
}

/// Bounded source replaying unit samples from a list
///
/// Each stored sample `u` in `[0, 1]` maps to `min + (max - min) * u`. Once
/// the list is used up every draw fails with
/// [`SceneError::RandomSourceExhausted`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    samples: VecDeque<f32>,
    draws: u64,
}

impl ScriptedSource {
    /// Create a source from unit samples; values are clamped to `[0, 1]`
    pub fn new<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = f32>,
    {
        Self {
            samples: samples.into_iter().map(|u| u.clamp(0.0, 1.0)).collect(),
            draws: 0,
        }
    }

    /// Samples left before exhaustion
    pub fn remaining(&self) -> usize {
        self.samples.len()
    }
}

impl RandomSource for ScriptedSource {
    fn uniform(&mut self, min: f32, max: f32) -> Result<f32, SceneError> {
        let unit = self
            .samples
            .pop_front()
            .ok_or(SceneError::RandomSourceExhausted { draws: self.draws })?;
        self.draws += 1;
        Ok((max - min).mul_add(unit, min))
    }
}
