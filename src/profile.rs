//! Vessel radius profiles.
//!
//! A [`RadiusProfile`] describes the liquid column inside a vessel as a list of
//! radius samples taken at evenly spaced normalized heights, from the column's
//! bottom (`0.0`) to the liquid surface (`1.0`).
//!
//! Profiles are immutable. When the fill level or the vessel shape changes the
//! geometry side builds a new profile and the simulator simply receives the new
//! value on its next step.
//!
//! ```ignore
//! // A flute that narrows towards the rim
//! let profile = RadiusProfile::new(0.0, 0.2, vec![0.0, 0.05, 0.09, 0.09]);
//! let r = profile.sample_radius(0.5);
//! ```

use std::sync::Arc;

/// Smallest height span ever divided by.
pub const HEIGHT_EPSILON: f32 = 1e-5;

/// Piecewise-linear radius of a liquid column as a function of height.
#[derive(Debug, Clone, PartialEq)]
pub struct RadiusProfile {
    bottom: f32,
    height_span: f32,
    radii: Arc<[f32]>,
}

impl RadiusProfile {
    /// Build a profile from radius samples ordered bottom to top.
    ///
    /// Never fails. Negative or non-finite radii become `0.0`, an empty list
    /// becomes a pinched column `[0.0, 0.0]` and a single sample `r` becomes
    /// the constant column `[r, r]`.
    pub fn new(bottom: f32, height_span: f32, radii: Vec<f32>) -> Self {
        let mut sanitized = false;
        let mut radii: Vec<f32> = radii
            .into_iter()
            .map(|r| {
                if r.is_finite() && r >= 0.0 {
                    r
                } else {
                    sanitized = true;
                    0.0
                }
            })
            .collect();

        match radii.len() {
            0 => {
                sanitized = true;
                radii = vec![0.0, 0.0];
            }
            1 => {
                let only = radii[0];
                radii.push(only);
            }
            _ => {}
        }

        let bottom = if bottom.is_finite() {
            bottom
        } else {
            sanitized = true;
            0.0
        };
        let height_span = if height_span.is_finite() && height_span >= 0.0 {
            height_span
        } else {
            sanitized = true;
            0.0
        };

        if sanitized {
            log::warn!(
                "radius profile sanitized: bottom={}, span={}, {} samples",
                bottom,
                height_span,
                radii.len()
            );
        }

        Self {
            bottom,
            height_span,
            radii: radii.into(),
        }
    }

    /// A straight-walled column of constant radius.
    pub fn uniform(bottom: f32, height_span: f32, radius: f32) -> Self {
        Self::new(bottom, height_span, vec![radius])
    }

    /// Sample a radius function `f(y_normalized)` at `samples` evenly spaced heights.
    ///
    /// `samples` is raised to at least 2.
    pub fn from_fn<F>(bottom: f32, height_span: f32, samples: usize, f: F) -> Self
    where
        F: Fn(f32) -> f32,
    {
        let samples = samples.max(2);
        let last = (samples - 1) as f32;
        let radii = (0..samples).map(|i| f(i as f32 / last)).collect();
        Self::new(bottom, height_span, radii)
    }

    /// Absolute height of the column's base.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    /// Vertical extent of the column, as given.
    #[inline]
    pub fn height_span(&self) -> f32 {
        self.height_span
    }

    /// Absolute height of the liquid surface.
    #[inline]
    pub fn top(&self) -> f32 {
        self.bottom + self.height_span
    }

    /// Radius samples, bottom to top.
    #[inline]
    pub fn radii(&self) -> &[f32] {
        &self.radii
    }

    /// Largest sample.
    pub fn max_radius(&self) -> f32 {
        self.radii.iter().copied().fold(0.0, f32::max)
    }

    /// Steepest change of radius per unit of normalized height.
    pub fn max_slope(&self) -> f32 {
        let spacing = (self.radii.len() - 1) as f32;
        self.radii
            .windows(2)
            .map(|w| (w[1] - w[0]).abs() * spacing)
            .fold(0.0, f32::max)
    }

    /// Interpolated radius at a normalized height.
    ///
    /// `y_normalized` is clamped to `[0, 1]` (NaN samples the bottom).
    pub fn sample_radius(&self, y_normalized: f32) -> f32 {
        let y = if y_normalized.is_nan() {
            0.0
        } else {
            y_normalized.clamp(0.0, 1.0)
        };

        let last = self.radii.len() - 1;
        let t = y * last as f32;
        let i = t.floor() as usize;
        if i >= last {
            return self.radii[last];
        }

        let frac = t - i as f32;
        self.radii[i] + (self.radii[i + 1] - self.radii[i]) * frac
    }

    /// Convert a local height (offset from `center_y`) into normalized profile space.
    ///
    /// The result is not clamped: values below `0.0` lie under the column and
    /// values above `1.0` lie over the surface.
    #[inline]
    pub fn normalized_height(&self, y_local: f32, center_y: f32) -> f32 {
        (center_y + y_local - self.bottom) / self.height_span.max(HEIGHT_EPSILON)
    }

    /// Inverse of [`normalized_height`](Self::normalized_height).
    #[inline]
    pub fn local_height(&self, y_normalized: f32, center_y: f32) -> f32 {
        self.bottom + y_normalized * self.height_span - center_y
    }
}
