//! Individual particles and their motion trails.

use std::collections::VecDeque;

use glam::{Vec3, Vec4};

use crate::attractor::PlaneAttractor;

/// Shortest lifetime a particle may be created with, in seconds.
///
/// Keeps the alpha computation (`lifetime / max_lifetime`) well defined.
pub const MIN_LIFETIME: f32 = 1e-4;

/// A single emitted particle.
///
/// Alpha is not stored independently: it is recomputed from the remaining
/// lifetime on every update, so `color.w == lifetime / max_lifetime`.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Position in world space.
    pub position: Vec3,
    /// Velocity in units per second.
    pub velocity: Vec3,
    /// Render radius. Not used by the physics.
    pub size: f32,
    color: Vec4,
    lifetime: f32,
    max_lifetime: f32,
    trail: VecDeque<Vec3>,
}

impl Particle {
    /// Create a particle at full life.
    ///
    /// `color` is RGB; alpha starts at 1.0. `max_lifetime` is clamped up to
    /// [`MIN_LIFETIME`]. The trail starts with the spawn position.
    pub fn new(position: Vec3, velocity: Vec3, size: f32, color: Vec3, max_lifetime: f32) -> Self {
        let max_lifetime = if max_lifetime.is_nan() {
            MIN_LIFETIME
        } else {
            max_lifetime.max(MIN_LIFETIME)
        };
        let mut trail = VecDeque::with_capacity(8);
        trail.push_back(position);

        Self {
            position,
            velocity,
            size,
            color: color.extend(1.0),
            lifetime: max_lifetime,
            max_lifetime,
            trail,
        }
    }

    /// Advance the particle by `dt` seconds.
    ///
    /// Semi-implicit Euler: the attractor force (if any) is applied to the
    /// velocity first, then the new velocity moves the position. The new
    /// position is appended to the trail unconditionally; call
    /// [`reset_trail`](Self::reset_trail) afterwards to enforce a bound.
    ///
    /// Returns `true` while the particle is still alive.
    pub fn update(&mut self, dt: f32, attractor: Option<&PlaneAttractor>) -> bool {
        if let Some(attractor) = attractor {
            self.velocity += attractor.force(self.position) * dt;
        }
        self.position += self.velocity * dt;
        self.trail.push_back(self.position);

        self.lifetime -= dt;
        self.color.w = self.lifetime / self.max_lifetime;

        self.is_alive()
    }

    /// Drop the oldest trail points until at most `max_length` remain.
    pub fn reset_trail(&mut self, max_length: usize) {
        if self.trail.len() > max_length {
            let excess = self.trail.len() - max_length;
            self.trail.drain(..excess);
        }
    }

    /// Whether any lifetime remains.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.lifetime > 0.0
    }

    /// Seconds of life remaining.
    #[inline]
    pub fn lifetime(&self) -> f32 {
        self.lifetime
    }

    /// Lifetime the particle was created with.
    #[inline]
    pub fn max_lifetime(&self) -> f32 {
        self.max_lifetime
    }

    /// Fraction of life remaining, `1.0` at spawn.
    #[inline]
    pub fn life_ratio(&self) -> f32 {
        self.lifetime / self.max_lifetime
    }

    /// RGBA colour, alpha being the current life ratio.
    #[inline]
    pub fn color(&self) -> Vec4 {
        self.color
    }

    /// Current alpha.
    #[inline]
    pub fn alpha(&self) -> f32 {
        self.color.w
    }

    /// Past positions, oldest first. The last entry is the current position.
    #[inline]
    pub fn trail(&self) -> &VecDeque<Vec3> {
        &self.trail
    }

    /// Consecutive trail segments with their fade alpha, oldest first.
    ///
    /// The oldest segment is drawn at the particle's alpha and each later
    /// segment loses `alpha / trail_len`.
    pub fn trail_segments(&self) -> impl Iterator<Item = (Vec3, Vec3, f32)> + '_ {
        let alpha = self.color.w;
        let step = alpha / self.trail.len() as f32;
        self.trail
            .iter()
            .zip(self.trail.iter().skip(1))
            .enumerate()
            .map(move |(i, (&from, &to))| (from, to, alpha - i as f32 * step))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spark() -> Particle {
        Particle::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0), 0.1, Vec3::splat(0.5), 4.0)
    }

    #[test]
    fn test_new_particle_at_full_life() {
        let p = spark();
        assert_eq!(p.lifetime(), p.max_lifetime());
        assert_eq!(p.alpha(), 1.0);
        assert_eq!(p.trail().len(), 1);
        assert_eq!(p.trail()[0], p.position);
    }

    #[test]
    fn test_zero_lifetime_clamped() {
        let p = Particle::new(Vec3::ZERO, Vec3::ZERO, 0.1, Vec3::ONE, 0.0);
        assert_eq!(p.max_lifetime(), MIN_LIFETIME);
        assert!(p.is_alive());

        let p = Particle::new(Vec3::ZERO, Vec3::ZERO, 0.1, Vec3::ONE, -1.0);
        assert_eq!(p.max_lifetime(), MIN_LIFETIME);
    }

    #[test]
    fn test_update_without_field_is_linear() {
        let mut p = spark();
        let (pos, vel) = (p.position, p.velocity);
        assert!(p.update(0.5, None));

        assert_eq!(p.position, pos + vel * 0.5);
        assert_eq!(p.velocity, vel);
    }

    #[test]
    fn test_update_applies_force_before_position() {
        let floor = PlaneAttractor::new(Vec3::new(0.0, -5.0, 0.0), Vec3::Y, 0.5, 8.0).unwrap();
        let mut p = Particle::new(Vec3::new(0.0, -1.0, 0.0), Vec3::ZERO, 0.1, Vec3::ONE, 4.0);
        p.update(1.0, Some(&floor));

        // Force at y = -1 is (0, -0.25, 0); velocity picks it up, then moves
        assert!((p.velocity - Vec3::new(0.0, -0.25, 0.0)).length() < 1e-6);
        assert!((p.position - Vec3::new(0.0, -1.25, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_alpha_tracks_lifetime() {
        let mut p = spark();
        let mut last = p.lifetime();
        for _ in 0..7 {
            p.update(0.5, None);
            assert!(p.lifetime() < last);
            last = p.lifetime();
            assert!((p.alpha() - p.lifetime() / p.max_lifetime()).abs() < 1e-6);
            assert_eq!(p.alpha(), p.color().w);
        }
        assert!(p.is_alive());
        assert!(!p.update(0.5, None));
    }

    #[test]
    fn test_trail_grows_one_per_update() {
        let mut p = spark();
        for i in 0..5 {
            p.update(0.1, None);
            assert_eq!(p.trail().len(), i + 2);
        }
        assert_eq!(*p.trail().back().unwrap(), p.position);
    }

    #[test]
    fn test_reset_trail_keeps_newest() {
        let mut p = spark();
        for _ in 0..5 {
            p.update(0.1, None);
        }
        let newest = *p.trail().back().unwrap();

        p.reset_trail(3);
        assert_eq!(p.trail().len(), 3);
        assert_eq!(*p.trail().back().unwrap(), newest);

        // No-op when already within bound
        p.reset_trail(10);
        assert_eq!(p.trail().len(), 3);

        p.reset_trail(1);
        assert_eq!(p.trail().len(), 1);
        assert_eq!(p.trail()[0], p.position);
    }

    #[test]
    fn test_trail_segments_fade() {
        let mut p = spark();
        for _ in 0..3 {
            p.update(0.5, None);
        }
        let alpha = p.alpha();
        let segments: Vec<_> = p.trail_segments().collect();

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].2, alpha);
        let step = alpha / 4.0;
        assert!((segments[2].2 - (alpha - 2.0 * step)).abs() < 1e-6);
        assert_eq!(segments[2].1, p.position);
    }

    #[test]
    fn test_single_point_trail_has_no_segments() {
        assert_eq!(spark().trail_segments().count(), 0);
    }
}
