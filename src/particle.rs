//! Per-particle simulation state.

use glam::Vec3;

/// Where a particle is in its cycle.
///
/// Bubbles go `Rising -> FadingNearTop -> (recycled) -> Rising`.
/// Foam goes `Submerged -> AboveSurface -> Shrinking -> (recycled) -> Submerged`.
/// Recycling happens inside a single step and is never observed as a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleState {
    /// Bubble below the fade band.
    Rising,
    /// Bubble inside the top fade band, shrinking toward the surface.
    FadingNearTop,
    /// Foam still under the liquid surface, wall constrained.
    Submerged,
    /// Foam floating freely above the surface, growing.
    AboveSurface,
    /// Foam past the exit height, shrinking until it recycles.
    Shrinking,
}

/// One bubble or foam element.
///
/// Owned by the [`ParticleSimulator`](crate::ParticleSimulator); renderers only
/// ever see the [`InstanceTransform`](crate::InstanceTransform) derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position relative to the simulator's frame origin.
    ///
    /// Bubbles are measured from the container center, foam from the center of
    /// the liquid surface.
    pub position: Vec3,
    /// Current render radius.
    pub size: f32,
    /// Radius assigned at the last (re)spawn.
    pub base_size: f32,
    /// Random fraction of the local allowed radius drawn once; `base_size`
    /// is recomputed from it at every respawn.
    pub size_scale: f32,
    /// Drift oscillator phase, radians. Only ever increases between respawns.
    pub phase: f32,
    /// Current lateral wobble speed, length units per second.
    pub drift_amplitude: f32,
    /// Wobble speed drift relaxes back to when clear of the wall.
    pub base_drift: f32,
    /// Vertical speed, constant for the particle's lifetime.
    pub rise_speed: f32,
    /// Current cycle state.
    pub state: ParticleState,
}

impl Particle {
    /// Distance from the vessel's vertical axis.
    #[inline]
    pub fn planar_distance(&self) -> f32 {
        self.position.x.hypot(self.position.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planar_distance_ignores_height() {
        let p = Particle {
            position: Vec3::new(0.03, 5.0, 0.04),
            size: 0.01,
            base_size: 0.01,
            size_scale: 0.5,
            phase: 0.0,
            drift_amplitude: 0.0,
            base_drift: 0.0,
            rise_speed: 0.1,
            state: ParticleState::Rising,
        };
        assert!((p.planar_distance() - 0.05).abs() < 1e-6);
    }
}
