//! Error types for fizz.
//!
//! Only configuration can fail. Degenerate geometry (empty profiles, zero
//! height spans, pinched radii) is clamped at runtime and never reported here.

use std::fmt;

/// Errors raised when a [`ParticleConfig`](crate::ParticleConfig) is rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A fraction knob fell outside its allowed interval.
    FractionOutOfRange {
        /// Name of the offending knob.
        name: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// A knob that must be zero or positive was negative.
    Negative {
        /// Name of the offending knob.
        name: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// A range knob has `start > end` or negative bounds.
    InvalidRange {
        /// Name of the offending knob.
        name: &'static str,
        /// Range start.
        start: f32,
        /// Range end.
        end: f32,
    },
    /// A knob was NaN or infinite.
    NotFinite {
        /// Name of the offending knob.
        name: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FractionOutOfRange { name, value } => {
                write!(f, "`{}` must be a fraction in [0, 1], got {}", name, value)
            }
            ConfigError::Negative { name, value } => {
                write!(f, "`{}` must not be negative, got {}", name, value)
            }
            ConfigError::InvalidRange { name, start, end } => write!(
                f,
                "`{}` must be a non-negative range with start <= end, got {}..{}",
                name, start, end
            ),
            ConfigError::NotFinite { name } => write!(f, "`{}` must be a finite number", name),
        }
    }
}

impl std::error::Error for ConfigError {}
