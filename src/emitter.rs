//! Cylindrical particle emitter.
//!
//! Particles are born on the lateral surface of a Y-aligned cylinder centred
//! on the origin and launched straight out along the surface normal:
//!
//! ```text
//!        ←  |‾‾‾‾‾‾‾|  →
//!        ←  |       |  →      height
//!        ←  |_______|  →
//!            radius
//! ```
//!
//! The end caps never emit, and there is no tangential or axial launch
//! component.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use crate::config::EmitterConfig;
use crate::error::ConfigError;
use crate::particle::Particle;

/// Emission policy sampling particles on a cylinder's side.
#[derive(Debug, Clone, PartialEq)]
pub struct CylinderEmitter {
    config: EmitterConfig,
}

impl CylinderEmitter {
    /// Build an emitter from validated settings.
    pub fn new(config: EmitterConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Cylinder radius.
    #[inline]
    pub fn radius(&self) -> f32 {
        self.config.radius
    }

    /// Cylinder height.
    #[inline]
    pub fn height(&self) -> f32 {
        self.config.height
    }

    /// The settings this emitter was built from.
    #[inline]
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Sample a fresh particle at full life.
    ///
    /// Angle and height are uniform over the lateral surface; speed, size,
    /// lifetime and each colour channel are drawn independently and uniformly
    /// from their configured ranges.
    pub fn emit<R: Rng + ?Sized>(&self, rng: &mut R) -> Particle {
        let c = &self.config;

        let angle = rng.gen_range(0.0..TAU);
        let half_height = c.height * 0.5;
        let y = rng.gen_range(-half_height..=half_height);

        let normal = Vec3::new(angle.cos(), 0.0, angle.sin());
        let position = Vec3::new(c.radius * normal.x, y, c.radius * normal.z);
        let velocity = normal * sample(rng, c.speed);

        let color = Vec3::new(
            sample(rng, c.color_channel),
            sample(rng, c.color_channel),
            sample(rng, c.color_channel),
        );

        Particle::new(position, velocity, sample(rng, c.size), color, sample(rng, c.lifetime))
    }

    /// Wireframe of the cylinder as line segments.
    ///
    /// `slices` vertical lines around the side plus `stacks + 1` horizontal
    /// rings (so the top and bottom edges are included).
    pub fn outline(&self, slices: usize, stacks: usize) -> Vec<(Vec3, Vec3)> {
        let slices = slices.max(3);
        let stacks = stacks.max(1);
        let r = self.radius();
        let half_height = self.height() * 0.5;

        let rim = |i: usize, y: f32| {
            let a = i as f32 / slices as f32 * TAU;
            Vec3::new(r * a.cos(), y, r * a.sin())
        };

        let mut lines = Vec::with_capacity(slices * (stacks + 2));
        for i in 0..slices {
            lines.push((rim(i, -half_height), rim(i, half_height)));
        }
        for s in 0..=stacks {
            let y = -half_height + self.height() * s as f32 / stacks as f32;
            for i in 0..slices {
                lines.push((rim(i, y), rim((i + 1) % slices, y)));
            }
        }
        lines
    }
}

impl Default for CylinderEmitter {
    fn default() -> Self {
        Self {
            config: EmitterConfig::default(),
        }
    }
}

/// Uniform sample from an inclusive `(min, max)` range.
#[inline]
fn sample<R: Rng + ?Sized>(rng: &mut R, (min, max): (f32, f32)) -> f32 {
    rng.gen_range(min..=max)
}
