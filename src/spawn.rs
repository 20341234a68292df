//! Random sampling for particle (re)spawning.
//!
//! Wraps a small RNG with the handful of helpers the simulator needs when it
//! places a particle: uniform ranges, angles and area-uniform disk points.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;
use std::ops::Range;

/// Random source owned by a simulator.
///
/// ```ignore
/// let mut ctx = SpawnContext::seeded(7);
/// let xz = ctx.random_in_disk(0.04);
/// let speed = ctx.random_range(0.04..0.09);
/// ```
#[derive(Debug, Clone)]
pub struct SpawnContext {
    rng: SmallRng,
}

impl SpawnContext {
    /// Deterministic context, reproducible across runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Context seeded from the system clock, different each program execution.
    pub fn from_clock() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::seeded(seed)
    }

    /// Use `seed` when given, the clock otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_clock(),
        }
    }

    /// Random f32 in `[0, 1)`.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in the given range.
    ///
    /// Empty or inverted ranges return `range.start` instead of panicking.
    #[inline]
    pub fn random_range(&mut self, range: Range<f32>) -> f32 {
        if range.start < range.end {
            self.rng.gen_range(range)
        } else {
            range.start
        }
    }

    /// Random angle in `[0, TAU)`.
    #[inline]
    pub fn random_angle(&mut self) -> f32 {
        self.rng.gen_range(0.0..TAU)
    }

    /// Random point inside a disk of given radius, centered at origin.
    ///
    /// Distribution is uniform over the disk's area. Radii `<= 0` give the origin.
    pub fn random_in_disk(&mut self, radius: f32) -> Vec2 {
        if radius <= 0.0 {
            return Vec2::ZERO;
        }
        let theta = self.random_angle();
        // sqrt for uniform area
        let r = radius * self.rng.gen::<f32>().sqrt();
        Vec2::new(r * theta.cos(), r * theta.sin())
    }
}
