//! Simulation configuration.
//!
//! [`SimulationConfig`] gathers every tunable of the simulation. Defaults
//! reproduce the classic setup: 200 particles with 4-point trails leaving a
//! 2×4 cylinder, pulled toward a floor plane at `y = -5`.
//!
//! Configure either with the builder methods:
//!
//! ```ignore
//! let config = SimulationConfig::new()
//!     .with_particle_count(350)
//!     .with_trail_length(8)
//!     .with_emitter(EmitterConfig::default().with_radius(1.0));
//! ```
//!
//! or from JSON, where every field is optional:
//!
//! ```ignore
//! let config = SimulationConfig::from_json(r#"{ "particle_count": 100 }"#)?;
//! ```

use std::ops::RangeInclusive;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ensure_positive, ensure_range, ensure_within, ConfigError};

/// Largest accepted `particle_limits.max`. The pool is preallocated to it.
pub const MAX_PARTICLES: usize = 100_000;

/// Largest accepted `trail_limits.max`.
pub const MAX_TRAIL_LENGTH: usize = 1_000;

/// Inclusive `[min, max]` bounds for a runtime-adjustable quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Smallest allowed value.
    pub min: usize,
    /// Largest allowed value.
    pub max: usize,
    /// Increment applied by one keyboard step.
    pub step: usize,
}

impl Limits {
    /// Create limits; `min` and `max` are swapped if given inverted.
    pub const fn new(min: usize, max: usize, step: usize) -> Self {
        if min <= max {
            Self { min, max, step }
        } else {
            Self { min: max, max: min, step }
        }
    }

    /// Clamp `value` into `[min, max]`. Inverted bounds resolve to `max`.
    #[inline]
    pub fn clamp(&self, value: usize) -> usize {
        value.max(self.min).min(self.max)
    }

    /// Apply a signed delta to `value`, then clamp.
    pub fn offset(&self, value: usize, delta: isize) -> usize {
        self.clamp(value.saturating_add_signed(delta))
    }

    /// Whether `value` lies within the bounds.
    #[inline]
    pub fn contains(&self, value: usize) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Check the bounds are ordered and `max` does not exceed `ceiling`.
    pub(crate) fn validate(&self, field: &'static str, ceiling: usize) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvalidRange {
                field,
                min: self.min as f64,
                max: self.max as f64,
            });
        }
        ensure_within(field, self.max as f64, 0.0, ceiling as f64)
    }
}

/// Emission policy for the cylindrical emitter.
///
/// The cylinder is centred on the origin with its axis along Y.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Cylinder radius.
    pub radius: f32,
    /// Cylinder height (spans `-height/2..=height/2`).
    pub height: f32,
    /// Launch speed range.
    pub speed: (f32, f32),
    /// Render size range.
    pub size: (f32, f32),
    /// Lifetime range in seconds.
    pub lifetime: (f32, f32),
    /// Range for each RGB channel.
    pub color_channel: (f32, f32),
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            radius: 2.0,
            height: 4.0,
            speed: (0.5, 2.0),
            size: (0.05, 0.15),
            lifetime: (3.0, 8.0),
            color_channel: (0.3, 1.0),
        }
    }
}

impl EmitterConfig {
    /// Set the cylinder radius.
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Set the cylinder height.
    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    /// Set the launch speed range.
    pub fn with_speed(mut self, speed: RangeInclusive<f32>) -> Self {
        self.speed = speed.into_inner();
        self
    }

    /// Set the render size range.
    pub fn with_size(mut self, size: RangeInclusive<f32>) -> Self {
        self.size = size.into_inner();
        self
    }

    /// Set the lifetime range, in seconds.
    pub fn with_lifetime(mut self, lifetime: RangeInclusive<f32>) -> Self {
        self.lifetime = lifetime.into_inner();
        self
    }

    /// Set the per-channel colour range.
    pub fn with_color_channel(mut self, channel: RangeInclusive<f32>) -> Self {
        self.color_channel = channel.into_inner();
        self
    }

    /// Check dimensions and ranges.
    ///
    /// Speeds must not be negative so launches point outward, sizes must be
    /// positive and colour channels must stay within `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("emitter.radius", self.radius)?;
        ensure_positive("emitter.height", self.height)?;
        ensure_range("emitter.speed", self.speed.0, self.speed.1)?;
        ensure_within("emitter.speed", self.speed.0 as f64, 0.0, f64::INFINITY)?;
        ensure_range("emitter.size", self.size.0, self.size.1)?;
        ensure_positive("emitter.size", self.size.0)?;
        ensure_range("emitter.lifetime", self.lifetime.0, self.lifetime.1)?;
        let (lo, hi) = self.color_channel;
        ensure_range("emitter.color_channel", lo, hi)?;
        ensure_within("emitter.color_channel", lo as f64, 0.0, 1.0)?;
        ensure_within("emitter.color_channel", hi as f64, 0.0, 1.0)?;
        Ok(())
    }
}

/// Plane attractor parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttractorConfig {
    /// A point on the plane.
    pub position: Vec3,
    /// Plane normal; need not be unit length.
    pub normal: Vec3,
    /// Peak pull, on the plane itself.
    pub strength: f32,
    /// Distance beyond which the pull vanishes.
    pub range: f32,
}

impl Default for AttractorConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, -5.0, 0.0),
            normal: Vec3::Y,
            strength: 0.5,
            range: 8.0,
        }
    }
}

/// Complete simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Initial pool size.
    pub particle_count: usize,
    /// Bounds and step for particle count changes.
    pub particle_limits: Limits,
    /// Initial trail length, in points.
    pub trail_length: usize,
    /// Bounds and step for trail length changes.
    pub trail_limits: Limits,
    /// Emission policy.
    pub emitter: EmitterConfig,
    /// Attractor plane.
    pub attractor: AttractorConfig,
    /// Whether the attractor starts active.
    pub attractor_active: bool,
    /// Longest time step a single update may apply, in seconds.
    pub max_frame_delta: f32,
    /// Fixed RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            particle_count: 200,
            particle_limits: Limits::new(50, 500, 50),
            trail_length: 4,
            trail_limits: Limits::new(1, 10, 1),
            emitter: EmitterConfig::default(),
            attractor: AttractorConfig::default(),
            attractor_active: true,
            max_frame_delta: 0.05,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the initial particle count.
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    /// Set particle count bounds.
    pub fn with_particle_limits(mut self, min: usize, max: usize) -> Self {
        self.particle_limits = Limits::new(min, max, self.particle_limits.step);
        self
    }

    /// Set the initial trail length.
    pub fn with_trail_length(mut self, length: usize) -> Self {
        self.trail_length = length;
        self
    }

    /// Set trail length bounds.
    pub fn with_trail_limits(mut self, min: usize, max: usize) -> Self {
        self.trail_limits = Limits::new(min, max, self.trail_limits.step);
        self
    }

    /// Replace the emitter settings.
    pub fn with_emitter(mut self, emitter: EmitterConfig) -> Self {
        self.emitter = emitter;
        self
    }

    /// Replace the attractor settings.
    pub fn with_attractor(mut self, attractor: AttractorConfig) -> Self {
        self.attractor = attractor;
        self
    }

    /// Start with the attractor on or off.
    pub fn with_attractor_active(mut self, active: bool) -> Self {
        self.attractor_active = active;
        self
    }

    /// Set the per-update time step cap.
    pub fn with_max_frame_delta(mut self, seconds: f32) -> Self {
        self.max_frame_delta = seconds;
        self
    }

    /// Seed the emitter RNG for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the configuration for values the simulation cannot work with.
    ///
    /// Initial count and trail length are not checked here: they are clamped
    /// into their limits when the simulation is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.particle_limits.validate("particle_limits", MAX_PARTICLES)?;
        self.trail_limits.validate("trail_limits", MAX_TRAIL_LENGTH)?;
        self.emitter.validate()?;
        ensure_finite("attractor.strength", self.attractor.strength)?;
        ensure_finite("attractor.range", self.attractor.range)?;
        if !self.attractor.position.is_finite() {
            return Err(ConfigError::NonFinite { field: "attractor.position" });
        }
        if self.attractor.normal.try_normalize().is_none() {
            return Err(ConfigError::ZeroNormal);
        }
        ensure_positive("max_frame_delta", self.max_frame_delta)?;
        Ok(())
    }
}
