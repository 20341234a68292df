//! Wall containment against a sampled radius profile.
//!
//! Particles live inside a solid of revolution. At any height the free disk is
//! the wall radius minus a fixed shrink, a margin proportional to the wall
//! radius and a term proportional to the particle's own size. A particle
//! outside that disk is projected radially back onto it.
//!
//! | Term | Knob | Meaning |
//! |------|------|---------|
//! | fixed | `inner_shrink` | keeps particles off the glass |
//! | relative | `wall_margin` | fraction of the wall radius kept clear |
//! | size | `size_factor` | larger particles stay further from the wall |

use crate::config::ParticleConfig;
use glam::Vec2;

/// Extra inward scaling applied after a projection so a particle does not sit
/// exactly on the boundary and flicker across it.
pub const PUSH_DAMPING: f32 = 0.98;

/// Frame rate `drift_damping` is expressed against. Damping per second is
/// `drift_damping.powf(DRIFT_REFERENCE_RATE)`.
pub const DRIFT_REFERENCE_RATE: f32 = 60.0;

/// Radial projection and drift adaptation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Containment {
    /// Absolute distance kept from the glass.
    pub inner_shrink: f32,
    /// Fraction of the wall radius kept clear.
    pub wall_margin: f32,
    /// Multiplier on particle size subtracted from the radius.
    pub size_factor: f32,
    /// Drift amplitude pushed particles are damped toward.
    pub drift_floor: f32,
    /// Fraction of excess drift kept per 1/60 s of wall contact.
    pub drift_damping: f32,
    /// Relaxation rate toward the ceiling, per second.
    pub drift_recovery: f32,
}

impl Containment {
    /// Pull the containment knobs out of a config.
    pub fn from_config(config: &ParticleConfig) -> Self {
        Self {
            inner_shrink: config.inner_shrink,
            wall_margin: config.wall_margin,
            size_factor: config.size_factor,
            drift_floor: config.drift_floor,
            drift_damping: config.drift_damping,
            drift_recovery: config.drift_recovery,
        }
    }

    /// Free radius at a height whose wall radius is `wall_radius`, for a
    /// particle of radius `size`. Never negative.
    #[inline]
    pub fn allowed_radius(&self, wall_radius: f32, size: f32) -> f32 {
        let wall = wall_radius.max(0.0);
        (wall - self.inner_shrink - self.wall_margin * wall - self.size_factor * size).max(0.0)
    }

    /// Project a lateral position into the disk of radius `allowed`.
    ///
    /// Returns the new position and whether a push happened. A pinched disk
    /// (`allowed <= 0`) sends the particle to the axis.
    pub fn constrain(&self, xz: Vec2, allowed: f32) -> (Vec2, bool) {
        if allowed.is_nan() || allowed <= 0.0 {
            return (Vec2::ZERO, xz != Vec2::ZERO);
        }

        let distance = xz.length();
        if distance <= allowed {
            return (xz, false);
        }

        (xz * (allowed / distance * PUSH_DAMPING), true)
    }

    /// Adapt a drift amplitude after a containment pass.
    ///
    /// Pushed particles lose excess wobble above the floor; free ones relax
    /// exponentially back toward `ceiling`. Both depend only on elapsed time,
    /// not on how many steps it was split into.
    pub fn adapt_drift(&self, amplitude: f32, ceiling: f32, pushed: bool, dt: f32) -> f32 {
        if pushed {
            let floor = self.drift_floor.min(amplitude);
            let kept = self.drift_damping.powf(dt * DRIFT_REFERENCE_RATE);
            floor + (amplitude - floor) * kept
        } else {
            let blend = 1.0 - (-self.drift_recovery * dt).exp();
            amplitude + (ceiling - amplitude) * blend
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn solver() -> Containment {
        Containment::from_config(&ParticleConfig::bubbles())
    }

    #[test]
    fn test_allowed_radius_terms() {
        let c = Containment {
            inner_shrink: 0.01,
            wall_margin: 0.1,
            size_factor: 1.0,
            drift_floor: 0.0,
            drift_damping: 0.5,
            drift_recovery: 1.0,
        };
        // 0.1 - 0.01 - 0.01 - 0.02
        assert!((c.allowed_radius(0.1, 0.02) - 0.06).abs() < 1e-6);
        assert_eq!(c.allowed_radius(0.0, 0.02), 0.0);
        assert_eq!(c.allowed_radius(-1.0, 0.0), 0.0);
    }

    #[test]
    fn test_inside_is_untouched() {
        let (p, pushed) = solver().constrain(Vec2::new(0.01, 0.02), 0.05);
        assert_eq!(p, Vec2::new(0.01, 0.02));
        assert!(!pushed);
    }

    #[test]
    fn test_outside_is_projected_radially() {
        let start = Vec2::new(0.3, 0.4);
        let (p, pushed) = solver().constrain(start, 0.1);
        assert!(pushed);
        assert!((p.length() - 0.1 * PUSH_DAMPING).abs() < 1e-6);
        // Same direction
        assert!(p.normalize().abs_diff_eq(start.normalize(), 1e-6));
    }

    #[test]
    fn test_pinched_disk_sends_to_axis() {
        let (p, pushed) = solver().constrain(Vec2::new(0.3, 0.4), 0.0);
        assert_eq!(p, Vec2::ZERO);
        assert!(pushed);

        let (p, _) = solver().constrain(Vec2::new(0.3, 0.4), -2.0);
        assert_eq!(p, Vec2::ZERO);

        let (p, _) = solver().constrain(Vec2::new(0.3, 0.4), f32::NAN);
        assert_eq!(p, Vec2::ZERO);
    }

    #[test]
    fn test_drift_damped_when_pushed() {
        let c = solver();
        let amp = c.adapt_drift(0.01, 0.01, true, 1.0 / 60.0);
        assert!(amp < 0.01);
        assert!(amp >= c.drift_floor);
    }

    #[test]
    fn test_drift_damping_ignores_frame_rate() {
        let c = solver();
        let coarse = c.adapt_drift(0.01, 0.01, true, 1.0 / 30.0);

        let mut fine = 0.01;
        for _ in 0..5 {
            fine = c.adapt_drift(fine, 0.01, true, 1.0 / 150.0);
        }
        assert!((coarse - fine).abs() < 1e-6, "{} vs {}", coarse, fine);

        // No time passed, nothing lost.
        assert!((c.adapt_drift(0.01, 0.01, true, 0.0) - 0.01).abs() < 1e-7);
    }

    #[test]
    fn test_drift_recovers_when_clear() {
        let c = solver();
        let mut amp = c.drift_floor;
        for _ in 0..600 {
            amp = c.adapt_drift(amp, 0.01, false, 1.0 / 60.0);
        }
        assert!((amp - 0.01).abs() < 1e-4);
    }

    #[test]
    fn test_drift_recovery_is_gradual() {
        let c = solver();
        let amp = c.adapt_drift(0.001, 0.01, false, 1.0 / 60.0);
        assert!(amp > 0.001 && amp < 0.002);
    }

    proptest! {
        #[test]
        fn test_constrain_stays_inside(
            x in -1.0f32..1.0,
            z in -1.0f32..1.0,
            allowed in -0.1f32..0.5,
        ) {
            let (p, _) = solver().constrain(Vec2::new(x, z), allowed);
            prop_assert!(p.is_finite());
            prop_assert!(p.length() <= allowed.max(0.0) + 1e-6);
        }
    }
}
