//! Fixed-size particle pool with in-place respawning.
//!
//! The pool always holds exactly `count` particles. Each update advances
//! every particle; a particle whose lifetime runs out is overwritten in its
//! own slot by a freshly emitted one during the same pass, so no particle is
//! ever observed dead and the backing storage is never reallocated.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::attractor::PlaneAttractor;
use crate::emitter::CylinderEmitter;
use crate::particle::Particle;

/// Pool of particles fed by a [`CylinderEmitter`].
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    count: usize,
    trail_length: usize,
    emitter: CylinderEmitter,
    rng: SmallRng,
}

impl ParticleSystem {
    /// Create a pool of `count` particles, seeded from entropy.
    ///
    /// Trail lengths below 1 are raised to 1 so every particle keeps at least
    /// its current position.
    pub fn new(count: usize, trail_length: usize, emitter: CylinderEmitter) -> Self {
        Self::from_rng(count, trail_length, emitter, SmallRng::from_entropy())
    }

    /// Create a pool of `count` particles whose emission is reproducible
    /// from `seed`.
    pub fn seeded(count: usize, trail_length: usize, emitter: CylinderEmitter, seed: u64) -> Self {
        Self::from_rng(count, trail_length, emitter, SmallRng::seed_from_u64(seed))
    }

    /// Create a pool of `count` particles drawing from `rng`.
    pub fn from_rng(count: usize, trail_length: usize, emitter: CylinderEmitter, rng: SmallRng) -> Self {
        let mut system = Self {
            particles: Vec::with_capacity(count),
            count,
            trail_length: trail_length.max(1),
            emitter,
            rng,
        };
        system.reset();
        system
    }

    /// Reseed the RNG and re-emit the pool.
    ///
    /// Prefer [`ParticleSystem::seeded`] when building, which emits once.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self.reset();
        self
    }

    /// Reserve room for `capacity` particles so later rebuilds up to that
    /// size do not reallocate.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.particles.reserve(capacity.saturating_sub(self.particles.len()));
        self
    }

    /// Emit a single particle from the emitter without adding it to the pool.
    pub fn create_particle(&mut self) -> Particle {
        self.emitter.emit(&mut self.rng)
    }

    /// Discard every particle and emit `count` fresh ones.
    pub fn reset(&mut self) {
        self.particles.clear();
        for _ in 0..self.count {
            let particle = self.create_particle();
            self.particles.push(particle);
        }
    }

    /// Change the pool size and re-emit every particle.
    ///
    /// All kinematic state is lost; emitter geometry and trail length are kept.
    pub fn rebuild(&mut self, count: usize) {
        self.count = count;
        self.reset();
    }

    /// Advance every particle by `dt`, respawning the ones that expire.
    ///
    /// Survivors have their trails trimmed to the current trail length.
    /// Replacements start at full life and are not aged in this pass.
    ///
    /// Returns how many particles were respawned.
    pub fn update(&mut self, dt: f32, attractor: Option<&PlaneAttractor>) -> usize {
        let mut respawned = 0;
        for slot in self.particles.iter_mut() {
            if slot.update(dt, attractor) {
                slot.reset_trail(self.trail_length);
            } else {
                // Disjoint field borrows; `create_particle` would borrow all of self
                *slot = self.emitter.emit(&mut self.rng);
                respawned += 1;
            }
        }
        respawned
    }

    /// Change the trail length and trim every trail to it right away.
    ///
    /// Particle motion is untouched. Values below 1 are raised to 1.
    pub fn set_trail_length(&mut self, length: usize) {
        self.trail_length = length.max(1);
        for particle in &mut self.particles {
            particle.reset_trail(self.trail_length);
        }
    }

    /// Current particles. Order only matters for draw order.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of particles in the pool.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the pool holds no particles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Target pool size.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Maximum trail length applied to survivors.
    #[inline]
    pub fn trail_length(&self) -> usize {
        self.trail_length
    }

    /// The emission policy.
    #[inline]
    pub fn emitter(&self) -> &CylinderEmitter {
        &self.emitter
    }

    /// Allocated slots in the pool.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.particles.capacity()
    }
}
