//! # fizz - bubbles and foam inside a vessel
//!
//! Simulates small particles (rising bubbles, surface foam) that stay inside a
//! liquid-filled vessel whose cross-section varies with height, and emits one
//! transform per particle per frame for instanced rendering.
//!
//! ## Quick Start
//!
//! ```ignore
//! use fizz::prelude::*;
//!
//! // Vessel geometry hands over the liquid column as radius samples.
//! let profile = RadiusProfile::new(0.0, 0.2, vec![0.0, 0.05, 0.09, 0.09]);
//! let center = Vec3::new(0.0, 0.1, 0.0);
//!
//! let mut bubbles = ParticleGroup::new(ParticleConfig::bubbles(), &profile, center)?;
//! let mut foam = ParticleGroup::new(ParticleConfig::foam(), &profile, center)?;
//! let mut clock = FrameClock::new();
//!
//! loop {
//!     let dt = clock.tick();
//!     bubbles.update(dt, &profile, center);
//!     foam.update(dt, &profile, center);
//!     // upload bubbles.instances() / foam.instances() to the renderer
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Radius profiles
//!
//! A [`RadiusProfile`] is the liquid column: a base height, a height span and
//! radius samples from bottom to surface. It is immutable; when the fill level
//! changes, pass the new profile to the next step.
//!
//! ### Containment
//!
//! Every step projects particles back into the disk allowed at their height
//! (see [`containment`]). Particles near the wall wobble less, particles in
//! the middle of the column wobble more.
//!
//! ### Variants
//!
//! | Variant | Spawns | Leaves |
//! |---------|--------|--------|
//! | [`Variant::Bubble`] | bottom band of the column | at the surface, after fading |
//! | [`Variant::Foam`] | just under the surface | above the surface, after shrinking |
//!
//! ### Errors
//!
//! Only configuration can be rejected ([`ConfigError`]). Degenerate geometry
//! collapses particles onto the vessel axis instead of failing.

pub mod config;
pub mod containment;
mod emitter;
mod error;
mod group;
mod particle;
pub mod profile;
mod simulation;
mod spawn;
pub mod time;

pub use bytemuck;
pub use config::{ParticleConfig, Variant};
pub use containment::Containment;
pub use emitter::{InstanceEmitter, InstanceTransform};
pub use error::ConfigError;
pub use glam::{Vec2, Vec3};
pub use group::ParticleGroup;
pub use particle::{Particle, ParticleState};
pub use profile::RadiusProfile;
pub use simulation::{
    fade_factor, faded_size, frame_origin, ParticleSimulator, FOAM_SHRINK_START,
    MIN_RENDER_SIZE,
};
pub use spawn::SpawnContext;
pub use time::FrameClock;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use fizz::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{ParticleConfig, Variant};
    pub use crate::emitter::{InstanceEmitter, InstanceTransform};
    pub use crate::error::ConfigError;
    pub use crate::group::ParticleGroup;
    pub use crate::particle::{Particle, ParticleState};
    pub use crate::profile::RadiusProfile;
    pub use crate::simulation::ParticleSimulator;
    pub use crate::time::FrameClock;
    pub use crate::{Vec2, Vec3};
}
