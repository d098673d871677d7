//! # trailsim - cylindrical emitter, plane attractor, motion trails
//!
//! A small real-time particle simulation core. Particles leave the side of a
//! cylinder, fly outward, get pulled toward an attractor plane, fade out over
//! their lifetime and leave short trails behind them. When a particle dies it
//! is immediately replaced by a fresh one, so the pool size never changes.
//!
//! The crate does no drawing and opens no windows. It exposes:
//! - a per-frame [`Simulation::update`] hook and a handful of live controls
//!   (particle count, trail length, pause, attractor on/off),
//! - read-only views of particles, emitter and attractor,
//! - [`render`] helpers that flatten all of it into `bytemuck` vertex data,
//! - an [`OrbitCamera`] plus [`Input`]/[`Controls`] for mouse and keyboard.
//!
//! ## Quick Start
//!
//! ```ignore
//! use trailsim::prelude::*;
//!
//! let mut sim = Simulation::new(SimulationConfig::default())?;
//! let mut clock = FrameClock::new(sim.max_frame_delta());
//!
//! loop {
//!     sim.update(clock.tick());
//!     for p in sim.particles() {
//!         draw_point(p.position, p.color(), p.size);
//!         draw_polyline(p.trail());
//!     }
//! }
//! ```
//!
//! ## Frame Model
//!
//! | Stage | Owner |
//! |-------|-------|
//! | Measure and cap delta time | [`FrameClock`] |
//! | Apply queued input | [`Controls::apply`] |
//! | Advance particles, respawn expired | [`Simulation::update`] |
//! | Build vertex data | [`render::Frame::capture`] |
//! | Rasterize | your renderer |
//!
//! Everything runs on one thread, one update per frame.

pub mod attractor;
pub mod camera;
pub mod config;
pub mod controls;
pub mod emitter;
pub mod error;
pub mod input;
pub mod particle;
pub mod render;
mod simulation;
pub mod system;
pub mod time;

pub use attractor::PlaneAttractor;
pub use camera::OrbitCamera;
pub use config::{AttractorConfig, EmitterConfig, Limits, SimulationConfig, MAX_PARTICLES, MAX_TRAIL_LENGTH};
pub use controls::{help_lines, Controls, Overlay};
pub use emitter::CylinderEmitter;
pub use error::ConfigError;
pub use glam::{Vec3, Vec4};
pub use input::{Input, KeyCode, MouseButton};
pub use particle::Particle;
pub use simulation::{FrameStats, Simulation};
pub use system::ParticleSystem;
pub use time::FrameClock;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use trailsim::prelude::*;
/// ```
pub mod prelude {
    pub use crate::attractor::PlaneAttractor;
    pub use crate::camera::OrbitCamera;
    pub use crate::config::{AttractorConfig, EmitterConfig, SimulationConfig};
    pub use crate::controls::{Controls, Overlay};
    pub use crate::emitter::CylinderEmitter;
    pub use crate::error::ConfigError;
    pub use crate::input::{Input, KeyCode, MouseButton};
    pub use crate::particle::Particle;
    pub use crate::render::Frame;
    pub use crate::simulation::Simulation;
    pub use crate::time::FrameClock;
    pub use crate::{Vec3, Vec4};
}
