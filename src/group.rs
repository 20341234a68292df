//! A particle group as the host loop sees it.
//!
//! Bundles a simulator, its instance emitter and an enabled flag. While
//! disabled the group neither steps nor emits, but keeps its pool, so turning
//! the effect back on resumes motion where it stopped instead of respawning.
//!
//! ```ignore
//! let mut bubbles = ParticleGroup::new(ParticleConfig::bubbles(), &profile, center)?;
//!
//! // Every frame
//! bubbles.update(dt, &profile, center);
//! renderer.upload(bubbles.instances());
//!
//! // Effect toggled off by the UI
//! bubbles.set_enabled(false);
//! ```

use crate::config::ParticleConfig;
use crate::emitter::{InstanceEmitter, InstanceTransform};
use crate::error::ConfigError;
use crate::profile::RadiusProfile;
use crate::simulation::ParticleSimulator;
use glam::Vec3;

/// Simulator + emitter + enabled flag.
#[derive(Debug, Clone)]
pub struct ParticleGroup {
    enabled: bool,
    simulator: ParticleSimulator,
    emitter: InstanceEmitter,
}

impl ParticleGroup {
    /// Build an enabled group and emit its initial transforms.
    pub fn new(
        config: ParticleConfig,
        profile: &RadiusProfile,
        center: Vec3,
    ) -> Result<Self, ConfigError> {
        let simulator = ParticleSimulator::new(config, profile, center)?;
        let mut emitter = InstanceEmitter::with_capacity(simulator.len());
        emitter.write(&simulator);
        Ok(Self {
            enabled: true,
            simulator,
            emitter,
        })
    }

    /// Whether the group is stepping and emitting.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn the group on or off. The particle pool is kept either way.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            log::debug!(
                "{:?} group {}",
                self.simulator.variant(),
                if enabled { "enabled" } else { "disabled" }
            );
        }
        self.enabled = enabled;
    }

    /// Step and re-emit. Does nothing while disabled.
    pub fn update(&mut self, dt: f32, profile: &RadiusProfile, center: Vec3) {
        if !self.enabled {
            return;
        }
        self.simulator.step(dt, profile, center);
        self.emitter.write(&self.simulator);
    }

    /// Transforms to draw this frame; empty while disabled.
    pub fn instances(&self) -> &[InstanceTransform] {
        if self.enabled {
            self.emitter.as_slice()
        } else {
            &[]
        }
    }

    /// The underlying simulator.
    #[inline]
    pub fn simulator(&self) -> &ParticleSimulator {
        &self.simulator
    }
}
