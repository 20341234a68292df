//! Particle group configuration.
//!
//! A [`ParticleConfig`] is built once per particle group and handed to
//! [`ParticleSimulator::new`](crate::ParticleSimulator::new), which validates it.
//!
//! # Presets
//!
//! | Preset | Variant | Description |
//! |--------|---------|-------------|
//! | [`ParticleConfig::bubbles`] | Bubble | Gentle carbonation rising through the column |
//! | [`ParticleConfig::sparkling`] | Bubble | Dense, fast, fine bubbles |
//! | [`ParticleConfig::foam`] | Foam | Froth spawning at the surface and popping above it |
//!
//! # Example
//!
//! ```ignore
//! let config = ParticleConfig::bubbles()
//!     .with_count(120)
//!     .with_rise_speed(0.05..0.1)
//!     .with_seed(7);
//! ```
//!
//! Lengths are in the same units as the [`RadiusProfile`](crate::RadiusProfile)
//! handed to the simulator; times are in seconds.

use crate::error::ConfigError;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which behavior a particle group follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Variant {
    /// Rises from the bottom band of the column, fades near the surface.
    #[default]
    Bubble,
    /// Spawns at the surface, floats above it, grows, then shrinks away.
    Foam,
}

/// Numeric knobs for one particle group.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParticleConfig {
    /// Bubble or foam behavior.
    pub variant: Variant,
    /// Number of particles in the pool. Fixed for the simulator's lifetime.
    pub count: u32,
    /// Fraction of the column particles (re)spawn in.
    /// Bottom band for bubbles, band just under the surface for foam.
    pub spawn_band: f32,
    /// Top fraction of the column over which bubbles fade out.
    pub top_fade: f32,
    /// Fraction of the wall radius kept clear, in `[0, 1)`.
    pub wall_margin: f32,
    /// Absolute distance kept from the glass.
    pub inner_shrink: f32,
    /// How many particle radii are subtracted from the allowed radius.
    pub size_factor: f32,
    /// Vertical speed, drawn once per particle.
    pub rise_speed: Range<f32>,
    /// Lateral wobble speed drawn at spawn, in length units per second.
    pub drift: Range<f32>,
    /// Particle size as a fraction of the allowed radius at spawn height.
    pub size: Range<f32>,
    /// Radians per second the drift oscillator advances.
    pub angular_rate: f32,
    /// Drift speed pushed particles are damped toward.
    pub drift_floor: f32,
    /// Fraction of excess drift kept per 1/60 s of wall contact, in `[0, 1]`.
    pub drift_damping: f32,
    /// Rate (per second) at which drift relaxes back when clear of the wall.
    pub drift_recovery: f32,
    /// Foam only: height above the surface where foam recycles. Growth stops
    /// and shrinking starts at [`FOAM_SHRINK_START`](crate::FOAM_SHRINK_START)
    /// of it.
    pub exit_height: f32,
    /// Foam only: size growth above the surface, in base sizes per second.
    pub foam_growth: f32,
    /// Foam only: exponential shrink rate near `exit_height`, per second.
    pub foam_shrink: f32,
    /// Smallest size a foam particle may shrink to before recycling.
    pub min_size: f32,
    /// RNG seed. `None` seeds from the clock.
    pub seed: Option<u64>,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self::bubbles()
    }
}

impl ParticleConfig {
    // =========================================================================
    // PRESETS
    // =========================================================================

    /// Gentle carbonation rising through the column.
    pub fn bubbles() -> Self {
        Self {
            variant: Variant::Bubble,
            count: 60,
            spawn_band: 0.18,
            top_fade: 0.12,
            wall_margin: 0.1,
            inner_shrink: 0.002,
            size_factor: 1.0,
            rise_speed: 0.04..0.09,
            drift: 0.004..0.012,
            size: 0.04..0.09,
            angular_rate: 2.2,
            drift_floor: 0.001,
            drift_damping: 0.85,
            drift_recovery: 0.6,
            exit_height: 0.0,
            foam_growth: 0.0,
            foam_shrink: 0.0,
            min_size: 0.0005,
            seed: None,
        }
    }

    /// Dense, fast, fine bubbles.
    pub fn sparkling() -> Self {
        Self {
            count: 160,
            rise_speed: 0.07..0.14,
            size: 0.025..0.05,
            drift: 0.002..0.008,
            angular_rate: 3.0,
            ..Self::bubbles()
        }
    }

    /// Froth spawning at the surface and popping above it.
    pub fn foam() -> Self {
        Self {
            variant: Variant::Foam,
            count: 80,
            spawn_band: 0.05,
            top_fade: 0.0,
            rise_speed: 0.008..0.02,
            drift: 0.002..0.006,
            size: 0.05..0.12,
            angular_rate: 1.4,
            exit_height: 0.015,
            foam_growth: 0.6,
            foam_shrink: 4.0,
            min_size: 0.0008,
            ..Self::bubbles()
        }
    }

    // =========================================================================
    // BUILDER METHODS
    // =========================================================================

    /// Set the behavior variant.
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the number of particles.
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Set the spawn band fraction.
    pub fn with_spawn_band(mut self, spawn_band: f32) -> Self {
        self.spawn_band = spawn_band;
        self
    }

    /// Set the top fade fraction.
    pub fn with_top_fade(mut self, top_fade: f32) -> Self {
        self.top_fade = top_fade;
        self
    }

    /// Set the wall margin fraction.
    pub fn with_wall_margin(mut self, wall_margin: f32) -> Self {
        self.wall_margin = wall_margin;
        self
    }

    /// Set the absolute inner shrink.
    pub fn with_inner_shrink(mut self, inner_shrink: f32) -> Self {
        self.inner_shrink = inner_shrink;
        self
    }

    /// Set the rise speed range.
    pub fn with_rise_speed(mut self, rise_speed: Range<f32>) -> Self {
        self.rise_speed = rise_speed;
        self
    }

    /// Set the drift amplitude range.
    pub fn with_drift(mut self, drift: Range<f32>) -> Self {
        self.drift = drift;
        self
    }

    /// Set the size range (fraction of the local allowed radius).
    pub fn with_size(mut self, size: Range<f32>) -> Self {
        self.size = size;
        self
    }

    /// Set the foam exit height above the surface.
    pub fn with_exit_height(mut self, exit_height: f32) -> Self {
        self.exit_height = exit_height;
        self
    }

    /// Fix the RNG seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    /// Reject knobs that can only come from an integration mistake.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fraction("spawn_band", self.spawn_band)?;
        fraction("top_fade", self.top_fade)?;
        fraction("drift_damping", self.drift_damping)?;
        fraction("wall_margin", self.wall_margin)?;
        if self.wall_margin >= 1.0 {
            return Err(ConfigError::FractionOutOfRange {
                name: "wall_margin",
                value: self.wall_margin,
            });
        }

        non_negative("inner_shrink", self.inner_shrink)?;
        non_negative("size_factor", self.size_factor)?;
        non_negative("angular_rate", self.angular_rate)?;
        non_negative("drift_floor", self.drift_floor)?;
        non_negative("drift_recovery", self.drift_recovery)?;
        non_negative("exit_height", self.exit_height)?;
        non_negative("foam_growth", self.foam_growth)?;
        non_negative("foam_shrink", self.foam_shrink)?;
        non_negative("min_size", self.min_size)?;

        range("rise_speed", &self.rise_speed)?;
        range("drift", &self.drift)?;
        range("size", &self.size)?;

        Ok(())
    }
}

fn finite(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { name })
    }
}

fn fraction(name: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(name, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::FractionOutOfRange { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

fn range(name: &'static str, value: &Range<f32>) -> Result<(), ConfigError> {
    finite(name, value.start)?;
    finite(name, value.end)?;
    if value.start < 0.0 || value.start > value.end {
        return Err(ConfigError::InvalidRange {
            name,
            start: value.start,
            end: value.end,
        });
    }
    Ok(())
}
