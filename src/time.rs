//! Frame clock for host loops.
//!
//! The simulator only needs a `dt` per frame. [`FrameClock`] produces one from
//! wall-clock time with the usual knobs: pausing, a fixed step for
//! deterministic playback, a time scale and a ceiling that stops one long
//! hitch (window drag, breakpoint) from launching every bubble past the surface.
//!
//! ```ignore
//! let mut clock = FrameClock::new();
//! loop {
//!     let dt = clock.tick();
//!     bubbles.update(dt, &profile, center);
//! }
//! ```

use std::time::Instant;

/// Default ceiling on a single frame's delta, in seconds.
pub const DEFAULT_MAX_DELTA: f32 = 0.1;

/// Produces per-frame deltas for [`ParticleSimulator::step`](crate::ParticleSimulator::step).
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_tick: Instant,
    elapsed: f32,
    delta: f32,
    frame: u64,
    paused: bool,
    fixed_delta: Option<f32>,
    time_scale: f32,
    max_delta: f32,
}

impl FrameClock {
    /// Clock starting now.
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            elapsed: 0.0,
            delta: 0.0,
            frame: 0,
            paused: false,
            fixed_delta: None,
            time_scale: 1.0,
            max_delta: DEFAULT_MAX_DELTA,
        }
    }

    /// Measure the time since the previous tick and return the frame's delta.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let raw = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        self.tick_with(raw)
    }

    /// Advance using an externally measured raw delta.
    ///
    /// Returns zero while paused. Otherwise the fixed delta (if any) replaces
    /// `raw`, the result is clamped to `max_delta`, then scaled.
    pub fn tick_with(&mut self, raw: f32) -> f32 {
        if self.paused {
            self.delta = 0.0;
            return 0.0;
        }

        let raw = if raw.is_finite() { raw.max(0.0) } else { 0.0 };
        let step = self.fixed_delta.unwrap_or(raw).min(self.max_delta);
        self.delta = step * self.time_scale;
        self.elapsed += self.delta;
        self.frame += 1;
        self.delta
    }

    /// Delta returned by the last tick.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Simulated seconds so far (sum of returned deltas).
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Ticks taken while running.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Whether the clock is paused.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stop producing deltas.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume without counting the paused wall time.
    pub fn resume(&mut self) {
        if self.paused {
            self.last_tick = Instant::now();
            self.paused = false;
        }
    }

    /// Use a fixed step instead of measured time. `None` goes back to real time.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta.map(|d| d.max(0.0));
    }

    /// Multiplier applied to every delta. Negative values clamp to zero.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Current time scale.
    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Largest unscaled delta a single tick may return.
    pub fn set_max_delta(&mut self, max_delta: f32) {
        self.max_delta = max_delta.max(0.0);
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
