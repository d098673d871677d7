//! Planar attractor force field.
//!
//! A [`PlaneAttractor`] pulls particles toward an infinite plane. The pull is
//! strongest on the plane and falls off linearly to zero at `range`; beyond
//! that the particle is unaffected.
//!
//! ```text
//!  force
//!    ^
//!  s |\
//!    | \
//!    |  \
//!    |   \
//!  0 +----+------> |d|
//!        range
//! ```
//!
//! The cutoff at `range` is a hard one: the magnitude reaches zero there, but
//! its derivative jumps.
//!
//! # Example
//!
//! ```ignore
//! let floor = PlaneAttractor::new(Vec3::new(0.0, -5.0, 0.0), Vec3::Y, 0.5, 8.0)?;
//! let f = floor.force(Vec3::new(0.0, -1.0, 0.0)); // pulls down toward y = -5
//! ```

use glam::{Vec3, Vec4};

use crate::error::{ensure_finite, ConfigError};

/// A plane that attracts nearby particles.
///
/// Immutable after construction: the plane equation is derived once from
/// the point and normal.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneAttractor {
    position: Vec3,
    normal: Vec3,
    strength: f32,
    range: f32,
    /// Implicit plane `ax + by + cz + d = 0`, packed as `(a, b, c, d)`.
    plane: Vec4,
}

impl PlaneAttractor {
    /// Create an attractor from a point on the plane and its normal.
    ///
    /// The normal is normalized here. Negative strengths are clamped to zero.
    /// A `range` of zero or less is accepted and means the attractor never
    /// exerts any force.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroNormal`] if `normal` cannot be normalized, or
    /// [`ConfigError::NonFinite`] for NaN/infinite inputs.
    pub fn new(position: Vec3, normal: Vec3, strength: f32, range: f32) -> Result<Self, ConfigError> {
        if !position.is_finite() {
            return Err(ConfigError::NonFinite { field: "attractor.position" });
        }
        ensure_finite("attractor.strength", strength)?;
        ensure_finite("attractor.range", range)?;
        let normal = normal.try_normalize().ok_or(ConfigError::ZeroNormal)?;

        Ok(Self {
            position,
            normal,
            strength: strength.max(0.0),
            range,
            plane: normal.extend(-normal.dot(position)),
        })
    }

    /// Point on the plane the attractor was built from.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Unit plane normal.
    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Peak force magnitude, reached on the plane itself.
    #[inline]
    pub fn strength(&self) -> f32 {
        self.strength
    }

    /// Distance from the plane beyond which the force is zero.
    #[inline]
    pub fn range(&self) -> f32 {
        self.range
    }

    /// Plane coefficients `(a, b, c, d)`.
    #[inline]
    pub fn plane(&self) -> Vec4 {
        self.plane
    }

    /// Signed perpendicular distance from `point` to the plane.
    ///
    /// Positive on the side the normal points to.
    #[inline]
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.plane.truncate().dot(point) + self.plane.w
    }

    /// Force magnitude at `point`, ignoring direction.
    ///
    /// Equals `strength` on the plane and falls linearly to zero at `range`.
    pub fn magnitude_at(&self, point: Vec3) -> f32 {
        let distance = self.signed_distance(point).abs();
        if self.range <= 0.0 || distance >= self.range {
            return 0.0;
        }
        self.strength * (1.0 - distance / self.range)
    }

    /// Force exerted on a particle at `point`.
    ///
    /// Always points back toward the plane. A point exactly on the plane has
    /// no defined side, so it gets the zero vector.
    pub fn force(&self, point: Vec3) -> Vec3 {
        let distance = self.signed_distance(point);
        let magnitude = self.magnitude_at(point);
        if magnitude == 0.0 || distance == 0.0 {
            return Vec3::ZERO;
        }
        -distance.signum() * self.normal * magnitude
    }

    /// Corners of a square patch of the plane centred on [`position`](Self::position).
    ///
    /// `half_extent` is the distance from the centre to each edge along the
    /// two in-plane axes. Corners are returned in winding order.
    pub fn quad_corners(&self, half_extent: f32) -> [Vec3; 4] {
        let (u, v) = self.tangent_basis();
        let u = u * half_extent;
        let v = v * half_extent;
        let p = self.position;
        [p + u + v, p + u - v, p - u - v, p - u + v]
    }

    /// Line segment from the plane's anchor point along the normal.
    pub fn normal_segment(&self, length: f32) -> (Vec3, Vec3) {
        (self.position, self.position + self.normal * length)
    }

    /// Two unit vectors spanning the plane, orthogonal to each other and the normal.
    fn tangent_basis(&self) -> (Vec3, Vec3) {
        let seed = if self.normal.dot(Vec3::X).abs() > 0.9 { Vec3::Y } else { Vec3::X };
        let u = (seed - seed.dot(self.normal) * self.normal).normalize();
        let v = self.normal.cross(u).normalize();
        (u, v)
    }
}
