//! Input state tracking.
//!
//! [`Input`] turns raw window events into per-frame queries: what was pressed
//! this frame, what is held, where the cursor is and how far the wheel moved.
//! Events can come from winit via [`Input::handle_event`], or be fed directly
//! by any other windowing layer through the `press_*`/`release_*` methods.
//!
//! ```ignore
//! // Once per window event:
//! input.handle_event(&event);
//!
//! // Once per frame, after acting on the input:
//! controls.apply(&input, &mut sim, &mut camera);
//! input.begin_frame();
//! ```

use std::collections::HashSet;

use glam::Vec2;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    /// Any other button, by winit index.
    Other(u16),
}

impl From<WinitMouseButton> for MouseButton {
    fn from(btn: WinitMouseButton) -> Self {
        match btn {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            WinitMouseButton::Back => MouseButton::Back,
            WinitMouseButton::Forward => MouseButton::Forward,
            WinitMouseButton::Other(id) => MouseButton::Other(id),
        }
    }
}

/// Keys the simulation controls respond to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    A,
    E,
    H,
    P,
    R,
    Space,
    Up,
    Down,
    Left,
    Right,
    Escape,
    /// Any other key, by winit code.
    Other(u32),
}

impl From<WinitKeyCode> for KeyCode {
    fn from(key: WinitKeyCode) -> Self {
        match key {
            WinitKeyCode::KeyA => KeyCode::A,
            WinitKeyCode::KeyE => KeyCode::E,
            WinitKeyCode::KeyH => KeyCode::H,
            WinitKeyCode::KeyP => KeyCode::P,
            WinitKeyCode::KeyR => KeyCode::R,
            WinitKeyCode::Space => KeyCode::Space,
            WinitKeyCode::ArrowUp => KeyCode::Up,
            WinitKeyCode::ArrowDown => KeyCode::Down,
            WinitKeyCode::ArrowLeft => KeyCode::Left,
            WinitKeyCode::ArrowRight => KeyCode::Right,
            WinitKeyCode::Escape => KeyCode::Escape,
            _ => KeyCode::Other(key as u32),
        }
    }
}

/// Keyboard and mouse state for the current frame.
#[derive(Debug, Default)]
pub struct Input {
    keys_held: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,

    mouse_held: HashSet<MouseButton>,
    mouse_pressed: HashSet<MouseButton>,
    mouse_released: HashSet<MouseButton>,

    mouse_position: Vec2,
    mouse_delta: Vec2,
    scroll_delta: f32,
}

impl Input {
    /// Create an empty input tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Key Queries ==========

    /// Whether `key` went down this frame.
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Whether `key` is currently held.
    pub fn key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Whether `key` went up this frame.
    pub fn key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    /// Keys that went down this frame, in no particular order.
    pub fn keys_pressed(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.keys_pressed.iter().copied()
    }

    // ========== Mouse Queries ==========

    /// Whether `button` went down this frame.
    pub fn mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse_pressed.contains(&button)
    }

    /// Whether `button` is currently held.
    pub fn mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }

    /// Whether `button` went up this frame.
    pub fn mouse_released(&self, button: MouseButton) -> bool {
        self.mouse_released.contains(&button)
    }

    /// Cursor position in window pixels.
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Cursor movement accumulated this frame, in pixels.
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Wheel movement this frame. Positive is away from the user.
    pub fn scroll_delta(&self) -> f32 {
        self.scroll_delta
    }

    // ========== Feeding Events ==========

    /// Record a key going down. Auto-repeat does not count as a new press.
    pub fn press_key(&mut self, key: KeyCode) {
        if self.keys_held.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    /// Record a key going up.
    pub fn release_key(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
        self.keys_released.insert(key);
    }

    /// Record a mouse button going down.
    pub fn press_mouse(&mut self, button: MouseButton) {
        self.mouse_pressed.insert(button);
        self.mouse_held.insert(button);
    }

    /// Record a mouse button going up.
    pub fn release_mouse(&mut self, button: MouseButton) {
        self.mouse_held.remove(&button);
        self.mouse_released.insert(button);
    }

    /// Record the cursor moving to `position`.
    pub fn move_cursor(&mut self, position: Vec2) {
        self.mouse_delta += position - self.mouse_position;
        self.mouse_position = position;
    }

    /// Record wheel movement.
    pub fn scroll(&mut self, delta: f32) {
        self.scroll_delta += delta;
    }

    /// Clear per-frame state. Call after the frame's input has been consumed.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_pressed.clear();
        self.mouse_released.clear();
        self.mouse_delta = Vec2::ZERO;
        self.scroll_delta = 0.0;
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    let key = KeyCode::from(code);
                    match event.state {
                        ElementState::Pressed => self.press_key(key),
                        ElementState::Released => self.release_key(key),
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let btn = MouseButton::from(*button);
                match state {
                    ElementState::Pressed => self.press_mouse(btn),
                    ElementState::Released => self.release_mouse(btn),
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.move_cursor(Vec2::new(position.x as f32, position.y as f32));
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.scroll(match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                });
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_state() {
        let mut input = Input::new();
        assert!(!input.key_held(KeyCode::Space));

        input.press_key(KeyCode::Space);
        assert!(input.key_held(KeyCode::Space));
        assert!(input.key_pressed(KeyCode::Space));

        // After begin_frame, pressed is cleared but held remains
        input.begin_frame();
        assert!(input.key_held(KeyCode::Space));
        assert!(!input.key_pressed(KeyCode::Space));

        // Auto-repeat while held is not a fresh press
        input.press_key(KeyCode::Space);
        assert!(!input.key_pressed(KeyCode::Space));

        input.release_key(KeyCode::Space);
        assert!(!input.key_held(KeyCode::Space));
        assert!(input.key_released(KeyCode::Space));
    }

    #[test]
    fn test_mouse_delta_accumulates() {
        let mut input = Input::new();
        input.move_cursor(Vec2::new(10.0, 10.0));
        input.begin_frame();

        input.move_cursor(Vec2::new(15.0, 12.0));
        input.move_cursor(Vec2::new(20.0, 8.0));
        assert_eq!(input.mouse_delta(), Vec2::new(10.0, -2.0));
        assert_eq!(input.mouse_position(), Vec2::new(20.0, 8.0));

        input.begin_frame();
        assert_eq!(input.mouse_delta(), Vec2::ZERO);
    }

    #[test]
    fn test_mouse_buttons() {
        let mut input = Input::new();
        input.press_mouse(MouseButton::Left);
        assert!(input.mouse_pressed(MouseButton::Left));
        assert!(input.mouse_held(MouseButton::Left));

        input.begin_frame();
        input.release_mouse(MouseButton::Left);
        assert!(!input.mouse_held(MouseButton::Left));
        assert!(input.mouse_released(MouseButton::Left));
    }

    #[test]
    fn test_winit_key_mapping() {
        assert_eq!(KeyCode::from(WinitKeyCode::ArrowUp), KeyCode::Up);
        assert_eq!(KeyCode::from(WinitKeyCode::Space), KeyCode::Space);
        assert!(matches!(KeyCode::from(WinitKeyCode::KeyZ), KeyCode::Other(_)));
        assert_eq!(MouseButton::from(WinitMouseButton::Right), MouseButton::Right);
        assert_eq!(MouseButton::from(WinitMouseButton::Left), MouseButton::Left);
        assert_eq!(MouseButton::from(WinitMouseButton::Back), MouseButton::Back);
        assert_eq!(MouseButton::from(WinitMouseButton::Forward), MouseButton::Forward);
        assert_eq!(MouseButton::from(WinitMouseButton::Other(7)), MouseButton::Other(7));
    }
}
