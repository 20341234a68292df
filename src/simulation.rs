//! Frame-driven particle simulator.
//!
//! One [`ParticleSimulator`] owns a fixed pool of particles and advances all of
//! them once per rendered frame. Each step reads the current
//! [`RadiusProfile`]; nothing derived from a previous profile is cached, so a
//! profile swapped in between frames (fill level changed) takes effect on the
//! very next step.
//!
//! # Per-frame update
//!
//! | Stage | Bubble | Foam |
//! |-------|--------|------|
//! | rise | `y += rise_speed * dt` | same, `y` measured from the surface |
//! | drift | two-sinusoid wobble scaled by drift amplitude | same |
//! | contain | always, at the new height | only while under the surface |
//! | size | fades over the top `top_fade` of the column | grows above surface, shrinks over the top of `(0, exit_height]` |
//! | recycle | past the surface | past `exit_height`, or shrunk below `min_size` |
//!
//! Particles never read each other's state, so the order in which the pool is
//! walked does not matter.

use crate::config::{ParticleConfig, Variant};
use crate::containment::Containment;
use crate::error::ConfigError;
use crate::particle::{Particle, ParticleState};
use crate::profile::{RadiusProfile, HEIGHT_EPSILON};
use crate::spawn::SpawnContext;
use glam::{Vec2, Vec3};

/// Smallest size a bubble is ever rendered at, even fully faded.
pub const MIN_RENDER_SIZE: f32 = 1e-5;

/// Fraction of `exit_height` above the surface where foam stops growing and
/// starts shrinking.
pub const FOAM_SHRINK_START: f32 = 0.5;

/// Fade factor in `[0, 1]` for a bubble at normalized height `y_norm`.
///
/// Zero below the fade band, ramping linearly to one at the surface.
#[inline]
pub fn fade_factor(y_norm: f32, top_fade: f32) -> f32 {
    if top_fade <= 0.0 {
        return 0.0;
    }
    ((y_norm - (1.0 - top_fade)) / top_fade).clamp(0.0, 1.0)
}

/// Rendered size after fading. Always strictly positive.
#[inline]
pub fn faded_size(base_size: f32, fade: f32) -> f32 {
    (base_size * (1.0 - fade)).max(MIN_RENDER_SIZE)
}

/// Lateral wobble direction for a drift phase.
///
/// Two incommensurate sinusoids per axis so paths never close into circles.
#[inline]
fn drift_offset(phase: f32) -> Vec2 {
    Vec2::new(
        phase.sin() + 0.5 * (2.3 * phase + 1.1).sin(),
        (1.3 * phase).cos() + 0.5 * (3.1 * phase + 0.7).cos(),
    )
}

/// Absolute point that local particle positions are measured from.
///
/// The container center for bubbles, the center of the liquid surface for foam.
#[inline]
pub fn frame_origin(variant: Variant, profile: &RadiusProfile, center: Vec3) -> Vec3 {
    match variant {
        Variant::Bubble => center,
        Variant::Foam => Vec3::new(center.x, profile.top(), center.z),
    }
}

/// Everything a single step needs besides the particle and the RNG.
struct Frame<'a> {
    config: &'a ParticleConfig,
    containment: &'a Containment,
    profile: &'a RadiusProfile,
    center: Vec3,
}

impl Frame<'_> {
    /// Normalized profile height of a particle, unclamped.
    fn normalized_height(&self, p: &Particle) -> f32 {
        match self.config.variant {
            Variant::Bubble => self.profile.normalized_height(p.position.y, self.center.y),
            Variant::Foam => {
                1.0 + p.position.y / self.profile.height_span().max(HEIGHT_EPSILON)
            }
        }
    }

    /// Local height for a normalized profile height.
    fn local_height(&self, y_norm: f32) -> f32 {
        match self.config.variant {
            Variant::Bubble => self.profile.local_height(y_norm, self.center.y),
            Variant::Foam => (y_norm - 1.0) * self.profile.height_span(),
        }
    }

    /// Draw the per-lifetime constants and place a brand new particle.
    fn seed(&self, rng: &mut SpawnContext) -> Particle {
        let mut p = Particle {
            position: Vec3::ZERO,
            size: 0.0,
            base_size: 0.0,
            size_scale: rng.random_range(self.config.size.clone()),
            phase: 0.0,
            drift_amplitude: 0.0,
            base_drift: rng.random_range(self.config.drift.clone()),
            rise_speed: rng.random_range(self.config.rise_speed.clone()),
            state: ParticleState::Rising,
        };
        self.respawn(&mut p, rng);
        p
    }

    /// Put a particle back at a fresh spawn point.
    ///
    /// Height is uniform over the spawn band, the lateral position is uniform
    /// over the area of the allowed disk at that height, and the size scales
    /// with the local free radius so narrow necks never get oversized bubbles.
    fn respawn(&self, p: &mut Particle, rng: &mut SpawnContext) {
        let band = rng.random_range(0.0..self.config.spawn_band);
        let (y_norm, state) = match self.config.variant {
            Variant::Bubble => (band, ParticleState::Rising),
            Variant::Foam => (1.0 - band, ParticleState::Submerged),
        };

        let wall = self.profile.sample_radius(y_norm);
        let free = self.containment.allowed_radius(wall, 0.0);
        p.base_size = (p.size_scale * free).max(MIN_RENDER_SIZE);
        p.size = p.base_size;

        let allowed = self.containment.allowed_radius(wall, p.base_size);
        let xz = rng.random_in_disk(allowed);
        p.position = Vec3::new(xz.x, self.local_height(y_norm), xz.y);

        p.phase = rng.random_angle();
        p.drift_amplitude = p.base_drift;
        p.state = state;
    }

    /// Advance the drift oscillator and return the drifted lateral position.
    ///
    /// The wobble is a lateral velocity: `drift_amplitude` is in length units
    /// per second and is integrated over `dt`.
    fn drift(&self, p: &mut Particle, dt: f32) -> Vec2 {
        p.phase += dt * self.config.angular_rate;
        let wobble = drift_offset(p.phase) * p.drift_amplitude;
        Vec2::new(p.position.x, p.position.z) + wobble * dt
    }

    /// Clamp `xz` into the allowed disk at `y_norm` and adapt the drift.
    fn contain(&self, p: &mut Particle, xz: Vec2, y_norm: f32, dt: f32) {
        let wall = self.profile.sample_radius(y_norm);
        let allowed = self.containment.allowed_radius(wall, p.base_size.max(p.size));
        let (xz, pushed) = self.containment.constrain(xz, allowed);
        p.drift_amplitude = self
            .containment
            .adapt_drift(p.drift_amplitude, p.base_drift, pushed, dt);
        p.position.x = xz.x;
        p.position.z = xz.y;
    }

    /// Move lateral position freely, letting drift relax.
    fn release(&self, p: &mut Particle, xz: Vec2, dt: f32) {
        p.drift_amplitude = self
            .containment
            .adapt_drift(p.drift_amplitude, p.base_drift, false, dt);
        p.position.x = xz.x;
        p.position.z = xz.y;
    }

    /// One bubble step. Returns `true` if the bubble was recycled.
    fn advance_bubble(&self, p: &mut Particle, rng: &mut SpawnContext, dt: f32) -> bool {
        p.position.y += p.rise_speed * dt;

        let mut y_norm = self.normalized_height(p);
        if y_norm >= 1.0 {
            self.respawn(p, rng);
            return true;
        }
        if y_norm < 0.0 {
            // The column's bottom moved up under this bubble.
            p.position.y = self.local_height(0.0);
            y_norm = 0.0;
        }

        let xz = self.drift(p, dt);
        self.contain(p, xz, y_norm, dt);

        let fade = fade_factor(y_norm, self.config.top_fade);
        p.size = faded_size(p.base_size, fade);
        p.state = if fade > 0.0 {
            ParticleState::FadingNearTop
        } else {
            ParticleState::Rising
        };
        false
    }

    /// One foam step. Returns `true` if the foam particle was recycled.
    ///
    /// Foam never stays above `exit_height`: it recycles on the update that
    /// carries it past.
    fn advance_foam(&self, p: &mut Particle, rng: &mut SpawnContext, dt: f32) -> bool {
        let exit = self.config.exit_height;
        p.position.y += p.rise_speed * dt;

        if p.position.y > exit {
            self.respawn(p, rng);
            return true;
        }

        let xz = self.drift(p, dt);

        if p.position.y <= 0.0 {
            let mut y_norm = self.normalized_height(p);
            if y_norm < 0.0 {
                p.position.y = self.local_height(0.0);
                y_norm = 0.0;
            }
            self.contain(p, xz, y_norm, dt);
            p.state = ParticleState::Submerged;
        } else if p.position.y <= exit * FOAM_SHRINK_START {
            self.release(p, xz, dt);
            p.size += p.base_size * self.config.foam_growth * dt;
            p.state = ParticleState::AboveSurface;
        } else {
            self.release(p, xz, dt);
            p.size *= (-self.config.foam_shrink * dt).exp();
            p.state = ParticleState::Shrinking;
            if p.size < self.config.min_size {
                self.respawn(p, rng);
                return true;
            }
        }
        false
    }
}

/// Bounded-volume particle simulator for one particle group.
///
/// # Example
///
/// ```ignore
/// let profile = RadiusProfile::new(0.0, 0.2, vec![0.0, 0.05, 0.09, 0.09]);
/// let center = Vec3::new(0.0, 0.1, 0.0);
/// let mut sim = ParticleSimulator::new(ParticleConfig::bubbles(), &profile, center)?;
///
/// // Host loop
/// sim.step(1.0 / 60.0, &profile, center);
/// for p in sim.particles() {
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ParticleSimulator {
    config: ParticleConfig,
    containment: Containment,
    particles: Vec<Particle>,
    rng: SpawnContext,
    origin: Vec3,
    last_recycled: usize,
}

impl ParticleSimulator {
    /// Validate `config` and pre-seed the full particle pool against `profile`.
    pub fn new(
        config: ParticleConfig,
        profile: &RadiusProfile,
        center: Vec3,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let containment = Containment::from_config(&config);
        let mut rng = SpawnContext::new(config.seed);
        let particles = {
            let frame = Frame {
                config: &config,
                containment: &containment,
                profile,
                center,
            };
            (0..config.count).map(|_| frame.seed(&mut rng)).collect()
        };

        log::debug!(
            "seeded {:?} simulator with {} particles (span {}, {} profile samples)",
            config.variant,
            config.count,
            profile.height_span(),
            profile.radii().len()
        );

        Ok(Self {
            origin: frame_origin(config.variant, profile, center),
            config,
            containment,
            particles,
            rng,
            last_recycled: 0,
        })
    }

    /// Advance every particle by `dt` seconds against the current profile.
    ///
    /// Negative or non-finite `dt` is treated as zero.
    pub fn step(&mut self, dt: f32, profile: &RadiusProfile, center: Vec3) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        let frame = Frame {
            config: &self.config,
            containment: &self.containment,
            profile,
            center,
        };

        let mut recycled = 0;
        for p in &mut self.particles {
            let was_recycled = match self.config.variant {
                Variant::Bubble => frame.advance_bubble(p, &mut self.rng, dt),
                Variant::Foam => frame.advance_foam(p, &mut self.rng, dt),
            };
            if was_recycled {
                recycled += 1;
            }
        }

        self.origin = frame_origin(self.config.variant, profile, center);
        self.last_recycled = recycled;
        log::trace!(
            "{:?} step dt={:.4}: {} particles, {} recycled",
            self.config.variant,
            dt,
            self.particles.len(),
            recycled
        );
    }

    /// Respawn the whole pool, discarding current motion.
    pub fn respawn_all(&mut self, profile: &RadiusProfile, center: Vec3) {
        let frame = Frame {
            config: &self.config,
            containment: &self.containment,
            profile,
            center,
        };
        for p in &mut self.particles {
            frame.respawn(p, &mut self.rng);
        }
        self.origin = frame_origin(self.config.variant, profile, center);
    }

    /// The particle pool, in stable index order.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of particles in the pool.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the pool is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Configuration this simulator was built with.
    #[inline]
    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    /// Bubble or foam.
    #[inline]
    pub fn variant(&self) -> Variant {
        self.config.variant
    }

    /// Absolute point local positions were measured from during the last step.
    #[inline]
    pub fn frame_origin(&self) -> Vec3 {
        self.origin
    }

    /// How many particles recycled during the last step.
    #[inline]
    pub fn last_recycled(&self) -> usize {
        self.last_recycled
    }

    /// Normalized profile height of a particle, unclamped.
    pub fn normalized_height_of(
        &self,
        particle: &Particle,
        profile: &RadiusProfile,
        center: Vec3,
    ) -> f32 {
        let frame = Frame {
            config: &self.config,
            containment: &self.containment,
            profile,
            center,
        };
        frame.normalized_height(particle)
    }

    /// Allowed planar radius for a particle at its current height, or `None`
    /// when it is rising freely above the surface.
    pub fn allowed_radius_for(
        &self,
        particle: &Particle,
        profile: &RadiusProfile,
        center: Vec3,
    ) -> Option<f32> {
        if self.config.variant == Variant::Foam && particle.position.y > 0.0 {
            return None;
        }
        let y_norm = self.normalized_height_of(particle, profile, center);
        let wall = profile.sample_radius(y_norm);
        Some(
            self.containment
                .allowed_radius(wall, particle.base_size.max(particle.size)),
        )
    }
}
