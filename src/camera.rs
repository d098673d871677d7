//! Orbit camera driven by mouse drag and wheel.
//!
//! Angles are kept in degrees: `theta` spins around the Y axis, `phi` tilts
//! above or below the horizon and is held short of the poles so the view
//! never flips.

use glam::{Mat4, Vec3};

/// Degrees of rotation per pixel of mouse drag.
const DRAG_SENSITIVITY: f32 = 0.5;
/// Vertical angle limit, in degrees.
const PHI_LIMIT: f32 = 85.0;
/// Distance multiplier per wheel notch.
const ZOOM_FACTOR: f32 = 1.1;

/// Camera orbiting a target point.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    /// Distance from the target.
    pub distance: f32,
    /// Horizontal angle in degrees.
    pub theta: f32,
    /// Vertical angle in degrees.
    pub phi: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
    /// Closest allowed zoom.
    pub min_distance: f32,
    /// Farthest allowed zoom.
    pub max_distance: f32,
    drag_origin: Option<(f32, f32)>,
}

impl OrbitCamera {
    /// Create a camera at the given spherical coordinates around the origin.
    pub fn new(distance: f32, theta: f32, phi: f32) -> Self {
        Self {
            distance: distance.clamp(5.0, 30.0),
            theta,
            phi: phi.clamp(-PHI_LIMIT, PHI_LIMIT),
            target: Vec3::ZERO,
            min_distance: 5.0,
            max_distance: 30.0,
            drag_origin: None,
        }
    }

    /// Start an orbit drag at cursor position `(x, y)`.
    pub fn begin_drag(&mut self, x: f32, y: f32) {
        self.drag_origin = Some((x, y));
    }

    /// Continue a drag to `(x, y)`. Ignored when no drag is in progress.
    pub fn drag_to(&mut self, x: f32, y: f32) {
        let Some((prev_x, prev_y)) = self.drag_origin else {
            return;
        };
        self.theta += (x - prev_x) * DRAG_SENSITIVITY;
        self.phi = (self.phi + (y - prev_y) * DRAG_SENSITIVITY).clamp(-PHI_LIMIT, PHI_LIMIT);
        self.drag_origin = Some((x, y));
    }

    /// Finish the current drag.
    pub fn end_drag(&mut self) {
        self.drag_origin = None;
    }

    /// Whether a drag is in progress.
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag_origin.is_some()
    }

    /// Zoom one wheel notch: positive `direction` moves closer.
    pub fn zoom(&mut self, direction: f32) {
        if direction > 0.0 {
            self.distance /= ZOOM_FACTOR;
        } else if direction < 0.0 {
            self.distance *= ZOOM_FACTOR;
        }
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
    }

    /// Camera position in world space.
    pub fn position(&self) -> Vec3 {
        let theta = self.theta.to_radians();
        let phi = self.phi.to_radians();
        let x = self.distance * theta.sin() * phi.cos();
        let y = self.distance * phi.sin();
        let z = self.distance * theta.cos() * phi.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// View matrix, Y up.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    /// 45° perspective projection for the given aspect ratio.
    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(45.0_f32.to_radians(), aspect.max(f32::EPSILON), 0.1, 100.0)
    }

    /// Combined projection × view.
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view_matrix()
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(15.0, 30.0, 30.0)
    }
}
