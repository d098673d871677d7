//! Error types for trailsim.
//!
//! The simulation itself never fails at runtime: out-of-range requests are
//! clamped and degenerate attractor ranges simply produce no force. Errors
//! only arise when building a simulation from an invalid configuration.

use std::fmt;

/// Errors that can occur while validating or loading a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The attractor plane normal has zero length and cannot be normalized.
    ZeroNormal,
    /// A configuration value was NaN or infinite.
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A `[min, max]` range was inverted.
    InvalidRange {
        /// Name of the offending range.
        field: &'static str,
        /// Lower bound as given.
        min: f64,
        /// Upper bound as given.
        max: f64,
    },
    /// A value that must be strictly positive was zero or negative.
    NonPositive {
        /// Name of the offending field.
        field: &'static str,
        /// Value as given.
        value: f64,
    },
    /// A value fell outside the bounds the simulation accepts.
    OutOfBounds {
        /// Name of the offending field.
        field: &'static str,
        /// Value as given.
        value: f64,
        /// Smallest accepted value.
        lower: f64,
        /// Largest accepted value.
        upper: f64,
    },
    /// The configuration JSON could not be parsed.
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroNormal => write!(f, "Attractor normal must be a non-zero, finite vector"),
            ConfigError::NonFinite { field } => write!(f, "Config value `{}` must be finite", field),
            ConfigError::InvalidRange { field, min, max } => {
                write!(f, "Config range `{}` is inverted: min {} > max {}", field, min, max)
            }
            ConfigError::NonPositive { field, value } => {
                write!(f, "Config value `{}` must be positive, got {}", field, value)
            }
            ConfigError::OutOfBounds {
                field,
                value,
                lower,
                upper,
            } => write!(f, "Config value `{}` must lie in [{}, {}], got {}", field, lower, upper, value),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Check that a scalar is finite.
pub(crate) fn ensure_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

/// Check that a scalar is finite and strictly positive.
pub(crate) fn ensure_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    ensure_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive {
            field,
            value: value as f64,
        })
    }
}

/// Check that `[min, max]` is finite and not inverted.
pub(crate) fn ensure_range(field: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    ensure_finite(field, min)?;
    ensure_finite(field, max)?;
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange {
            field,
            min: min as f64,
            max: max as f64,
        })
    }
}

/// Check that `value` lies within `[lower, upper]`.
pub(crate) fn ensure_within(field: &'static str, value: f64, lower: f64, upper: f64) -> Result<(), ConfigError> {
    if (lower..=upper).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfBounds {
            field,
            value,
            lower,
            upper,
        })
    }
}
