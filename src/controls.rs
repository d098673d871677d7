//! Keyboard and mouse bindings for the simulation.
//!
//! | Input | Action |
//! |-------|--------|
//! | `H` | Toggle help overlay |
//! | `P` | Pause / resume |
//! | `E` | Toggle emitter outline |
//! | `A` | Toggle attractor plane |
//! | `Space` | Toggle attractor influence |
//! | `R` | Re-emit all particles |
//! | `Up` / `Down` | Particle count ± one step |
//! | `Right` / `Left` | Trail length ± one step |
//! | Left drag | Orbit camera |
//! | Wheel | Zoom |

use tracing::debug;

use crate::camera::OrbitCamera;
use crate::input::{Input, KeyCode, MouseButton};
use crate::simulation::Simulation;

/// What the renderer should draw besides particles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    /// Show status and key help text.
    pub show_help: bool,
    /// Draw the cylinder outline.
    pub show_emitter: bool,
    /// Draw the attractor plane and normal.
    pub show_attractor: bool,
}

impl Default for Overlay {
    fn default() -> Self {
        Self {
            show_help: true,
            show_emitter: true,
            show_attractor: true,
        }
    }
}

/// Applies a frame's input to the simulation, camera and overlay.
#[derive(Debug, Default)]
pub struct Controls {
    /// Display toggles.
    pub overlay: Overlay,
}

impl Controls {
    /// Controls with the default overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Act on everything that happened this frame.
    ///
    /// Call between simulation updates, before [`Input::begin_frame`].
    pub fn apply(&mut self, input: &Input, sim: &mut Simulation, camera: &mut OrbitCamera) {
        for key in input.keys_pressed() {
            self.handle_key(key, sim);
        }

        let cursor = input.mouse_position();
        if input.mouse_pressed(MouseButton::Left) {
            camera.begin_drag(cursor.x, cursor.y);
        } else if input.mouse_held(MouseButton::Left) {
            camera.drag_to(cursor.x, cursor.y);
        }
        if input.mouse_released(MouseButton::Left) {
            camera.end_drag();
        }

        let scroll = input.scroll_delta();
        if scroll != 0.0 {
            camera.zoom(scroll);
        }
    }

    /// Act on a single key press.
    pub fn handle_key(&mut self, key: KeyCode, sim: &mut Simulation) {
        let particle_step = sim.particle_limits().step as isize;
        let trail_step = sim.trail_limits().step as isize;

        match key {
            KeyCode::H => self.overlay.show_help = !self.overlay.show_help,
            KeyCode::P => {
                let paused = sim.toggle_paused();
                debug!(paused, "pause toggled");
            }
            KeyCode::E => self.overlay.show_emitter = !self.overlay.show_emitter,
            KeyCode::A => self.overlay.show_attractor = !self.overlay.show_attractor,
            KeyCode::Space => {
                let active = sim.toggle_attractor_active();
                debug!(active, "attractor toggled");
            }
            KeyCode::R => sim.reset(),
            KeyCode::Up => {
                sim.change_particle_count(particle_step);
            }
            KeyCode::Down => {
                sim.change_particle_count(-particle_step);
            }
            KeyCode::Right => {
                sim.change_trail_length(trail_step);
            }
            KeyCode::Left => {
                sim.change_trail_length(-trail_step);
            }
            _ => {}
        }
    }
}

/// Status and help text for the overlay, top line first.
pub fn help_lines(sim: &Simulation) -> Vec<String> {
    vec![
        "Particle System Simulation".to_string(),
        format!("Particles: {} (up/down arrows to change)", sim.particle_count()),
        format!("Trail length: {} (left/right arrows to change)", sim.trail_length()),
        format!("Attractor active: {}", sim.is_attractor_active()),
        format!("Paused: {}", sim.is_paused()),
        String::new(),
        "Controls:".to_string(),
        "H: Toggle help".to_string(),
        "P: Pause simulation".to_string(),
        "E: Toggle emitter visibility".to_string(),
        "A: Toggle attractor visibility".to_string(),
        "Space: Toggle attractor activation".to_string(),
        "R: Reset particles".to_string(),
        "Up/Down: Increase/decrease particle count".to_string(),
        "Left/Right: Decrease/increase trail length".to_string(),
        "Mouse drag: Rotate view".to_string(),
        "Scroll: Zoom in/out".to_string(),
    ]
}
