//! Instance transforms for the rendering backend.
//!
//! The [`InstanceEmitter`] owns one flat, pre-allocated buffer of
//! [`InstanceTransform`]s indexed by particle id. Each frame it overwrites the
//! buffer in place from the simulator's state; the renderer uploads
//! [`as_bytes`](InstanceEmitter::as_bytes) straight into its instance buffer.
//!
//! # Layout
//!
//! | Offset | Field | Type |
//! |--------|-------|------|
//! | 0 | `translation` | `vec3<f32>` |
//! | 12 | `scale` | `f32` |
//!
//! 16 bytes per instance, no padding.

use crate::simulation::ParticleSimulator;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

/// Per-particle transform: absolute position plus uniform scale.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct InstanceTransform {
    /// Absolute position.
    pub translation: [f32; 3],
    /// Uniform scale (the particle's current render radius).
    pub scale: f32,
}

impl InstanceTransform {
    /// Build from a position and scale.
    #[inline]
    pub fn new(translation: Vec3, scale: f32) -> Self {
        Self {
            translation: translation.to_array(),
            scale,
        }
    }

    /// Position as a glam vector.
    #[inline]
    pub fn translation(&self) -> Vec3 {
        Vec3::from_array(self.translation)
    }

    /// Model matrix for renderers that want one.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::IDENTITY,
            self.translation(),
        )
    }
}

/// Sole writer of the per-frame instance buffer.
#[derive(Debug, Clone, Default)]
pub struct InstanceEmitter {
    instances: Vec<InstanceTransform>,
}

impl InstanceEmitter {
    /// Emitter with room for `capacity` instances.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: vec![InstanceTransform::default(); capacity],
        }
    }

    /// Overwrite the buffer from the simulator's current state.
    ///
    /// The buffer only reallocates if the pool size differs from the last write.
    pub fn write(&mut self, sim: &ParticleSimulator) {
        let particles = sim.particles();
        if self.instances.len() != particles.len() {
            self.instances
                .resize(particles.len(), InstanceTransform::default());
        }

        let origin = sim.frame_origin();
        for (slot, p) in self.instances.iter_mut().zip(particles) {
            *slot = InstanceTransform::new(origin + p.position, p.size);
        }
    }

    /// Transforms in particle index order.
    #[inline]
    pub fn as_slice(&self) -> &[InstanceTransform] {
        &self.instances
    }

    /// Raw bytes ready for a GPU instance buffer.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Number of instances.
    #[inline]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether there are no instances.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ParticleConfig, RadiusProfile};

    #[test]
    fn test_instance_layout() {
        assert_eq!(std::mem::size_of::<InstanceTransform>(), 16);
    }

    #[test]
    fn test_to_matrix() {
        let t = InstanceTransform::new(Vec3::new(1.0, 2.0, 3.0), 0.5);
        let m = t.to_matrix();
        let p = m.transform_point3(Vec3::new(2.0, 0.0, 0.0));
        assert!(p.abs_diff_eq(Vec3::new(2.0, 2.0, 3.0), 1e-6));
    }

    #[test]
    fn test_write_matches_particles() {
        let profile = RadiusProfile::uniform(0.0, 0.2, 0.08);
        let center = Vec3::new(3.0, 0.1, -2.0);
        let config = ParticleConfig::bubbles().with_count(10).with_seed(21);
        let sim = ParticleSimulator::new(config, &profile, center).unwrap();

        let mut emitter = InstanceEmitter::with_capacity(10);
        emitter.write(&sim);

        assert_eq!(emitter.len(), 10);
        for (t, p) in emitter.as_slice().iter().zip(sim.particles()) {
            assert!(t.translation().abs_diff_eq(center + p.position, 1e-6));
            assert_eq!(t.scale, p.size);
        }
        assert_eq!(emitter.as_bytes().len(), 10 * 16);
    }

    #[test]
    fn test_write_reuses_buffer() {
        let profile = RadiusProfile::uniform(0.0, 0.2, 0.08);
        let config = ParticleConfig::bubbles().with_count(32).with_seed(22);
        let mut sim = ParticleSimulator::new(config, &profile, Vec3::ZERO).unwrap();

        let mut emitter = InstanceEmitter::with_capacity(32);
        emitter.write(&sim);
        let ptr = emitter.as_slice().as_ptr();
        for _ in 0..10 {
            sim.step(1.0 / 60.0, &profile, Vec3::ZERO);
            emitter.write(&sim);
        }
        assert_eq!(emitter.as_slice().as_ptr(), ptr);
    }

    #[test]
    fn test_empty_emitter_grows_on_first_write() {
        let profile = RadiusProfile::uniform(0.0, 0.2, 0.08);
        let config = ParticleConfig::foam().with_count(4).with_seed(23);
        let sim = ParticleSimulator::new(config, &profile, Vec3::ZERO).unwrap();

        let mut emitter = InstanceEmitter::default();
        assert!(emitter.is_empty());
        emitter.write(&sim);
        assert_eq!(emitter.len(), 4);
    }
}
