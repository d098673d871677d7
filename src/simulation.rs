//! Simulation controller.
//!
//! [`Simulation`] is what an embedding application owns and drives: it holds
//! the particle pool and the attractor, enforces the runtime limits, and
//! exposes the per-frame `update` hook. There is no global state; create as
//! many independent simulations as you like.
//!
//! ```ignore
//! let mut sim = Simulation::new(SimulationConfig::default())?;
//! let mut clock = FrameClock::new(sim.max_frame_delta());
//!
//! loop {
//!     sim.update(clock.tick());
//!     renderer.draw(sim.particles());
//! }
//! ```

use tracing::{debug, trace, warn};

use crate::attractor::PlaneAttractor;
use crate::config::{Limits, SimulationConfig};
use crate::emitter::CylinderEmitter;
use crate::error::ConfigError;
use crate::particle::Particle;
use crate::system::ParticleSystem;

/// Counters describing recent simulation activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Updates actually applied (paused frames excluded).
    pub frames: u64,
    /// Particles respawned during the last applied update.
    pub respawned: usize,
    /// Particles respawned since the simulation was built or last reset.
    pub total_respawned: u64,
}

/// Owns the particle system and attractor and applies UI-driven changes.
#[derive(Debug)]
pub struct Simulation {
    system: ParticleSystem,
    attractor: PlaneAttractor,
    particle_limits: Limits,
    trail_limits: Limits,
    max_frame_delta: f32,
    paused: bool,
    attractor_active: bool,
    stats: FrameStats,
}

impl Simulation {
    /// Build a simulation from `config`.
    ///
    /// The initial count and trail length are clamped into their limits.
    /// The pool is preallocated to the maximum particle count.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let attractor = PlaneAttractor::new(
            config.attractor.position,
            config.attractor.normal,
            config.attractor.strength,
            config.attractor.range,
        )?;
        let emitter = CylinderEmitter::new(config.emitter)?;

        let count = config.particle_limits.clamp(config.particle_count);
        let trail_length = config.trail_limits.clamp(config.trail_length);

        let system = match config.seed {
            Some(seed) => ParticleSystem::seeded(count, trail_length, emitter, seed),
            None => ParticleSystem::new(count, trail_length, emitter),
        }
        .with_capacity(config.particle_limits.max);

        debug!(count, trail_length, seed = ?config.seed, "simulation created");

        Ok(Self {
            system,
            attractor,
            particle_limits: config.particle_limits,
            trail_limits: config.trail_limits,
            max_frame_delta: config.max_frame_delta,
            paused: false,
            attractor_active: config.attractor_active,
            stats: FrameStats::default(),
        })
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// `dt` is clamped into `[0, max_frame_delta]`. Does nothing while paused.
    pub fn update(&mut self, dt: f32) {
        if self.paused {
            return;
        }
        let dt = if dt.is_nan() { 0.0 } else { dt.clamp(0.0, self.max_frame_delta) };

        let attractor = self.attractor_active.then_some(&self.attractor);
        let respawned = self.system.update(dt, attractor);

        self.stats.frames += 1;
        self.stats.respawned = respawned;
        self.stats.total_respawned += respawned as u64;
        if respawned > 0 {
            trace!(respawned, frame = self.stats.frames, "particles respawned");
        }
    }

    /// Re-emit every particle, keeping count and trail length.
    pub fn reset(&mut self) {
        self.system.reset();
        self.stats = FrameStats::default();
        debug!(count = self.system.count(), "particles reset");
    }

    /// Set the particle count, clamped to the configured limits.
    ///
    /// Rebuilds the whole pool: every particle is re-emitted. Returns the
    /// count actually applied.
    pub fn set_particle_count(&mut self, count: usize) -> usize {
        let clamped = self.particle_limits.clamp(count);
        if clamped != count {
            warn!(requested = count, applied = clamped, "particle count clamped");
        }
        self.system.rebuild(clamped);
        debug!(count = clamped, "particle pool rebuilt");
        clamped
    }

    /// Change the particle count by `delta`, clamped. Returns the new count.
    pub fn change_particle_count(&mut self, delta: isize) -> usize {
        let target = self.particle_limits.offset(self.system.count(), delta);
        self.set_particle_count(target)
    }

    /// Set the trail length, clamped to the configured limits.
    ///
    /// Existing trails are truncated immediately; particle motion is kept.
    /// Returns the length actually applied.
    pub fn set_trail_length(&mut self, length: usize) -> usize {
        let clamped = self.trail_limits.clamp(length);
        if clamped != length {
            warn!(requested = length, applied = clamped, "trail length clamped");
        }
        self.system.set_trail_length(clamped);
        debug!(trail_length = clamped, "trail length changed");
        clamped
    }

    /// Change the trail length by `delta`, clamped. Returns the new length.
    pub fn change_trail_length(&mut self, delta: isize) -> usize {
        let target = self.trail_limits.offset(self.system.trail_length(), delta);
        self.set_trail_length(target)
    }

    /// Pause or resume updates.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Flip the pause flag. Returns the new state.
    pub fn toggle_paused(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Include or omit the attractor from updates. The attractor itself is kept.
    pub fn set_attractor_active(&mut self, active: bool) {
        self.attractor_active = active;
    }

    /// Flip the attractor flag. Returns the new state.
    pub fn toggle_attractor_active(&mut self) -> bool {
        self.attractor_active = !self.attractor_active;
        self.attractor_active
    }

    // ========== Views ==========

    /// Current particles.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        self.system.particles()
    }

    /// The underlying particle pool.
    #[inline]
    pub fn system(&self) -> &ParticleSystem {
        &self.system
    }

    /// Attractor geometry, whether or not it is active.
    #[inline]
    pub fn attractor(&self) -> &PlaneAttractor {
        &self.attractor
    }

    /// Emitter geometry.
    #[inline]
    pub fn emitter(&self) -> &CylinderEmitter {
        self.system.emitter()
    }

    /// Current pool size.
    #[inline]
    pub fn particle_count(&self) -> usize {
        self.system.count()
    }

    /// Current trail length.
    #[inline]
    pub fn trail_length(&self) -> usize {
        self.system.trail_length()
    }

    /// Particle count bounds.
    #[inline]
    pub fn particle_limits(&self) -> Limits {
        self.particle_limits
    }

    /// Trail length bounds.
    #[inline]
    pub fn trail_limits(&self) -> Limits {
        self.trail_limits
    }

    /// Step cap applied by [`update`](Self::update).
    #[inline]
    pub fn max_frame_delta(&self) -> f32 {
        self.max_frame_delta
    }

    /// Whether updates are suspended.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether the attractor participates in updates.
    #[inline]
    pub fn is_attractor_active(&self) -> bool {
        self.attractor_active
    }

    /// Activity counters.
    #[inline]
    pub fn stats(&self) -> FrameStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn sim() -> Simulation {
        Simulation::new(SimulationConfig::default().with_seed(42)).unwrap()
    }

    #[test]
    fn test_defaults() {
        let s = sim();
        assert_eq!(s.particle_count(), 200);
        assert_eq!(s.particles().len(), 200);
        assert_eq!(s.trail_length(), 4);
        assert!(!s.is_paused());
        assert!(s.is_attractor_active());
        assert_eq!(s.emitter().radius(), 2.0);
        assert_eq!(s.emitter().height(), 4.0);
        assert_eq!(s.attractor().normal(), Vec3::Y);
        assert_eq!(s.attractor().range(), 8.0);
        assert!(s.system().capacity() >= 500);
    }

    #[test]
    fn test_invalid_config_fails() {
        let config = SimulationConfig::default().with_max_frame_delta(-1.0);
        assert!(Simulation::new(config).is_err());
    }

    #[test]
    fn test_bad_limits_fail_instead_of_panicking() {
        let mut inverted = SimulationConfig::default();
        inverted.particle_limits = Limits { min: 500, max: 50, step: 50 };
        assert!(matches!(Simulation::new(inverted), Err(ConfigError::InvalidRange { .. })));

        let mut inverted_trail = SimulationConfig::default();
        inverted_trail.trail_limits = Limits { min: 10, max: 1, step: 1 };
        assert!(Simulation::new(inverted_trail).is_err());

        let huge = SimulationConfig::default().with_particle_limits(50, usize::MAX);
        assert!(matches!(Simulation::new(huge), Err(ConfigError::OutOfBounds { .. })));
    }

    #[test]
    fn test_seeded_simulations_match() {
        let a = sim();
        let b = sim();
        assert_eq!(a.particles(), b.particles());
        assert!(a.system().capacity() >= a.particle_limits().max);
    }

    #[test]
    fn test_initial_values_clamped() {
        let config = SimulationConfig::default().with_particle_count(5).with_trail_length(99);
        let s = Simulation::new(config).unwrap();
        assert_eq!(s.particle_count(), 50);
        assert_eq!(s.trail_length(), 10);
    }

    #[test]
    fn test_particle_count_clamped() {
        let mut s = sim();
        assert_eq!(s.set_particle_count(10), 50);
        assert_eq!(s.particles().len(), 50);
        assert_eq!(s.set_particle_count(10_000), 500);
        assert_eq!(s.particles().len(), 500);
        assert_eq!(s.set_particle_count(321), 321);
    }

    #[test]
    fn test_change_particle_count_steps() {
        let mut s = sim();
        assert_eq!(s.change_particle_count(50), 250);
        assert_eq!(s.change_particle_count(-300), 50);
        assert_eq!(s.particles().len(), 50);
    }

    #[test]
    fn test_count_change_rebuilds_but_keeps_geometry() {
        let mut s = sim();
        s.update(0.05);
        s.set_particle_count(100);

        assert_eq!(s.emitter().radius(), 2.0);
        assert_eq!(s.trail_length(), 4);
        assert!(s.particles().iter().all(|p| p.alpha() == 1.0 && p.trail().len() == 1));
    }

    #[test]
    fn test_trail_length_change_keeps_motion() {
        let mut s = sim();
        for _ in 0..6 {
            s.update(0.01);
        }
        let before: Vec<(Vec3, Vec3)> = s.particles().iter().map(|p| (p.position, p.velocity)).collect();

        assert_eq!(s.set_trail_length(1), 1);
        for (p, (pos, vel)) in s.particles().iter().zip(before) {
            assert_eq!(p.trail().len(), 1);
            assert_eq!(p.position, pos);
            assert_eq!(p.velocity, vel);
        }

        assert_eq!(s.set_trail_length(0), 1);
        assert_eq!(s.change_trail_length(20), 10);
        assert_eq!(s.change_trail_length(-1), 9);
    }

    #[test]
    fn test_paused_update_is_noop() {
        let mut s = sim();
        s.set_paused(true);
        let before = s.particles().to_vec();
        s.update(0.05);

        assert_eq!(s.particles(), before.as_slice());
        assert_eq!(s.stats().frames, 0);

        assert!(!s.toggle_paused());
        s.update(0.05);
        assert_eq!(s.stats().frames, 1);
    }

    #[test]
    fn test_dt_is_capped() {
        let mut s = sim();
        let before: Vec<(Vec3, Vec3)> = s.particles().iter().map(|p| (p.position, p.velocity)).collect();
        s.set_attractor_active(false);
        s.update(100.0);

        // Capped at 0.05, so nobody expires (min lifetime is 3s)
        assert_eq!(s.stats().respawned, 0);
        for (p, (pos, vel)) in s.particles().iter().zip(before) {
            assert_eq!(p.position, pos + vel * 0.05);
        }
    }

    #[test]
    fn test_negative_dt_does_not_rewind() {
        let mut s = sim();
        let before = s.particles().to_vec();
        s.update(-1.0);
        for (p, b) in s.particles().iter().zip(&before) {
            assert_eq!(p.position, b.position);
            assert_eq!(p.lifetime(), b.lifetime());
        }
    }

    #[test]
    fn test_attractor_toggle() {
        let mut with = sim();
        let mut without = sim();
        without.set_attractor_active(false);
        assert!(!with.toggle_attractor_active());
        assert!(!with.is_attractor_active());
        with.set_attractor_active(true);

        with.update(0.05);
        without.update(0.05);

        // Same seed; only the attractor differs
        let pulled = with.particles().iter().zip(without.particles()).any(|(a, b)| a.velocity != b.velocity);
        assert!(pulled);
        assert!(without.particles().iter().all(|p| p.velocity.y == 0.0));
    }

    #[test]
    fn test_reset_clears_stats() {
        let mut s = sim();
        s.update(0.05);
        s.reset();
        assert_eq!(s.stats(), FrameStats::default());
        assert_eq!(s.particles().len(), 200);
    }
}
