//! Plain render data for an external renderer.
//!
//! Nothing here touches a graphics API. Each function flattens simulation
//! state into `#[repr(C)]` vertex records that can be uploaded as-is with
//! `bytemuck::cast_slice`.
//!
//! | Data | Primitive | Source |
//! |------|-----------|--------|
//! | [`particle_vertices`] | points / billboards | particle position, size, colour |
//! | [`trail_lines`] | line list | particle trails, fading toward the head |
//! | [`emitter_lines`] | line list | cylinder wireframe |
//! | [`attractor_lines`] | line list | plane outline + normal indicator |
//! | [`attractor_quad`] | triangle list | translucent plane patch |

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::attractor::PlaneAttractor;
use crate::camera::OrbitCamera;
use crate::controls::{help_lines, Overlay};
use crate::emitter::CylinderEmitter;
use crate::particle::Particle;
use crate::simulation::Simulation;

/// Wireframe colour of the emitter.
pub const EMITTER_COLOR: [f32; 4] = [0.2, 0.7, 0.2, 1.0];
/// Fill colour of the attractor plane.
pub const ATTRACTOR_COLOR: [f32; 4] = [0.2, 0.2, 0.8, 0.3];
/// Colour of the attractor normal indicator.
pub const NORMAL_COLOR: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
/// Half-width of the drawn attractor patch.
pub const ATTRACTOR_HALF_EXTENT: f32 = 10.0;
/// Length of the drawn attractor normal.
pub const NORMAL_LENGTH: f32 = 2.0;
/// Emitter wireframe resolution around the axis.
pub const EMITTER_SLICES: usize = 20;
/// Emitter wireframe resolution along the axis.
pub const EMITTER_STACKS: usize = 5;

/// One particle, ready for point or billboard rendering.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ParticleVertex {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
}

/// One end of a line segment (or a triangle corner).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl LineVertex {
    fn new(position: Vec3, color: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            color,
        }
    }
}

/// One vertex per particle.
pub fn particle_vertices(particles: &[Particle]) -> Vec<ParticleVertex> {
    particles
        .iter()
        .map(|p| ParticleVertex {
            position: p.position.to_array(),
            size: p.size,
            color: p.color().to_array(),
        })
        .collect()
}

/// Trail segments of every particle as a line list.
///
/// Segments take the particle's RGB with the fade alpha from
/// [`Particle::trail_segments`].
pub fn trail_lines(particles: &[Particle]) -> Vec<LineVertex> {
    let mut lines = Vec::with_capacity(particles.iter().map(|p| p.trail().len().saturating_sub(1) * 2).sum());
    for p in particles {
        let rgb = p.color().truncate();
        for (from, to, alpha) in p.trail_segments() {
            let color = rgb.extend(alpha).to_array();
            lines.push(LineVertex::new(from, color));
            lines.push(LineVertex::new(to, color));
        }
    }
    lines
}

/// Cylinder wireframe as a line list.
pub fn emitter_lines(emitter: &CylinderEmitter) -> Vec<LineVertex> {
    emitter
        .outline(EMITTER_SLICES, EMITTER_STACKS)
        .into_iter()
        .flat_map(|(a, b)| [LineVertex::new(a, EMITTER_COLOR), LineVertex::new(b, EMITTER_COLOR)])
        .collect()
}

/// Attractor patch outline plus its normal indicator, as a line list.
pub fn attractor_lines(attractor: &PlaneAttractor) -> Vec<LineVertex> {
    let corners = attractor.quad_corners(ATTRACTOR_HALF_EXTENT);
    let mut lines = Vec::with_capacity(10);
    for i in 0..4 {
        lines.push(LineVertex::new(corners[i], ATTRACTOR_COLOR));
        lines.push(LineVertex::new(corners[(i + 1) % 4], ATTRACTOR_COLOR));
    }
    let (base, tip) = attractor.normal_segment(NORMAL_LENGTH);
    lines.push(LineVertex::new(base, NORMAL_COLOR));
    lines.push(LineVertex::new(tip, NORMAL_COLOR));
    lines
}

/// Attractor patch as two triangles.
pub fn attractor_quad(attractor: &PlaneAttractor) -> [LineVertex; 6] {
    let [a, b, c, d] = attractor.quad_corners(ATTRACTOR_HALF_EXTENT);
    [a, b, c, a, c, d].map(|v| LineVertex::new(v, ATTRACTOR_COLOR))
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Projection × view for the current camera.
    pub view_proj: Mat4,
    /// Particle heads.
    pub particles: Vec<ParticleVertex>,
    /// Trails, emitter and attractor outlines.
    pub lines: Vec<LineVertex>,
    /// Translucent attractor patch, empty when hidden.
    pub triangles: Vec<LineVertex>,
    /// Overlay text, empty when help is hidden.
    pub text: Vec<String>,
}

impl Frame {
    /// Snapshot the simulation as seen through `camera`.
    pub fn capture(sim: &Simulation, overlay: &Overlay, camera: &OrbitCamera, aspect: f32) -> Self {
        let mut lines = trail_lines(sim.particles());
        let mut triangles = Vec::new();

        if overlay.show_emitter {
            lines.extend(emitter_lines(sim.emitter()));
        }
        if overlay.show_attractor {
            lines.extend(attractor_lines(sim.attractor()));
            triangles.extend(attractor_quad(sim.attractor()));
        }

        Self {
            view_proj: camera.view_projection(aspect),
            particles: particle_vertices(sim.particles()),
            lines,
            triangles,
            text: if overlay.show_help { help_lines(sim) } else { Vec::new() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(std::mem::size_of::<ParticleVertex>(), 32);
        assert_eq!(std::mem::size_of::<LineVertex>(), 28);

        let v = [ParticleVertex::zeroed(); 3];
        assert_eq!(bytemuck::cast_slice::<ParticleVertex, u8>(&v[..]).len(), 96);
    }

    #[test]
    fn test_particle_vertices_mirror_particles() {
        let sim = Simulation::new(SimulationConfig::default().with_seed(1)).unwrap();
        let vertices = particle_vertices(sim.particles());

        assert_eq!(vertices.len(), sim.particles().len());
        for (v, p) in vertices.iter().zip(sim.particles()) {
            assert_eq!(v.position, p.position.to_array());
            assert_eq!(v.size, p.size);
            assert_eq!(v.color, p.color().to_array());
        }
    }

    #[test]
    fn test_trail_lines_count() {
        let mut sim = Simulation::new(SimulationConfig::default().with_seed(2)).unwrap();
        assert!(trail_lines(sim.particles()).is_empty());

        for _ in 0..5 {
            sim.update(0.01);
        }
        // 4-point trails give 3 segments, 2 vertices each
        assert_eq!(trail_lines(sim.particles()).len(), sim.particles().len() * 6);
    }

    #[test]
    fn test_attractor_geometry() {
        let attractor = PlaneAttractor::new(Vec3::new(0.0, -5.0, 0.0), Vec3::Y, 0.5, 8.0).unwrap();
        let lines = attractor_lines(&attractor);
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[8].position, [0.0, -5.0, 0.0]);
        assert_eq!(lines[9].position, [0.0, -3.0, 0.0]);
        assert!(attractor_quad(&attractor).iter().all(|v| v.position[1] == -5.0));
    }

    #[test]
    fn test_frame_respects_overlay() {
        let sim = Simulation::new(SimulationConfig::default().with_seed(3)).unwrap();
        let camera = OrbitCamera::default();

        let full = Frame::capture(&sim, &Overlay::default(), &camera, 4.0 / 3.0);
        assert_eq!(full.particles.len(), 200);
        assert_eq!(full.triangles.len(), 6);
        assert!(!full.text.is_empty());
        assert_eq!(full.lines.len(), emitter_lines(sim.emitter()).len() + 10);

        let bare = Overlay {
            show_help: false,
            show_emitter: false,
            show_attractor: false,
        };
        let frame = Frame::capture(&sim, &bare, &camera, 4.0 / 3.0);
        assert!(frame.lines.is_empty());
        assert!(frame.triangles.is_empty());
        assert!(frame.text.is_empty());
    }
}
