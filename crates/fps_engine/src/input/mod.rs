//! Input management system
//!
//! The engine never polls devices. A platform layer (or a script) fills an
//! [`InputState`] snapshot each frame and hands it to the [`InputManager`],
//! which keeps the previous snapshot for edge detection and mouse deltas.

use std::collections::HashSet;

/// Snapshot of the keyboard and mouse at one instant
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    keys: HashSet<KeyCode>,
    buttons: HashSet<MouseButton>,
    mouse_position: (f32, f32),
}

impl InputState {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a key as held
    pub fn press(&mut self, key: KeyCode) {
        self.keys.insert(key);
    }

    /// Mark a key as up
    pub fn release(&mut self, key: KeyCode) {
        self.keys.remove(&key);
    }

    /// Builder form of [`InputState::press`]
    pub fn with_key(mut self, key: KeyCode) -> Self {
        self.press(key);
        self
    }

    /// Mark a mouse button as held or up
    pub fn set_button(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            self.buttons.insert(button);
        } else {
            self.buttons.remove(&button);
        }
    }

    /// Builder form of [`InputState::set_button`] for a held button
    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.set_button(button, true);
        self
    }

    /// Set the absolute mouse position
    pub fn set_mouse_position(&mut self, x: f32, y: f32) {
        self.mouse_position = (x, y);
    }

    /// Builder form of [`InputState::set_mouse_position`]
    pub fn with_mouse_position(mut self, x: f32, y: f32) -> Self {
        self.set_mouse_position(x, y);
        self
    }

    /// Whether a key is held
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    /// Whether a mouse button is held
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button)
    }

    /// Absolute mouse position
    pub fn mouse_position(&self) -> (f32, f32) {
        self.mouse_position
    }
}

/// Input manager
///
/// Holds the current and previous snapshots. The first snapshot reports no
/// mouse movement.
pub struct InputManager {
    current: InputState,
    previous: InputState,
    started: bool,
}

impl InputManager {
    /// Create a new input manager
    pub fn new() -> Self {
        Self {
            current: InputState::default(),
            previous: InputState::default(),
            started: false,
        }
    }

    /// Start a frame with a fresh snapshot; the old one becomes `previous`
    pub fn begin_frame(&mut self, state: InputState) {
        self.previous = std::mem::replace(&mut self.current, state);
        if !self.started {
            self.previous.mouse_position = self.current.mouse_position;
            self.started = true;
        }
    }

    /// Current snapshot
    pub fn current(&self) -> &InputState {
        &self.current
    }

    /// Previous frame's snapshot
    pub fn previous(&self) -> &InputState {
        &self.previous
    }

    /// Key held this frame
    pub fn is_down(&self, key: KeyCode) -> bool {
        self.current.is_key_down(key)
    }

    /// Key went down this frame
    pub fn just_pressed(&self, key: KeyCode) -> bool {
        self.current.is_key_down(key) && !self.previous.is_key_down(key)
    }

    /// Key went up this frame
    pub fn just_released(&self, key: KeyCode) -> bool {
        !self.current.is_key_down(key) && self.previous.is_key_down(key)
    }

    /// Mouse button went down this frame
    pub fn button_just_pressed(&self, button: MouseButton) -> bool {
        self.current.is_button_down(button) && !self.previous.is_button_down(button)
    }

    /// Mouse button went up this frame
    pub fn button_just_released(&self, button: MouseButton) -> bool {
        !self.current.is_button_down(button) && self.previous.is_button_down(button)
    }

    /// Mouse movement since the previous frame
    pub fn mouse_delta(&self) -> (f32, f32) {
        let (x, y) = self.current.mouse_position;
        let (px, py) = self.previous.mouse_position;
        (x - px, y - py)
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key
    A,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// Q key
    Q,
    /// S key
    S,
    /// W key
    W,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Left shift
    LeftShift,
    /// Left control
    LeftControl,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_detection() {
        let mut input = InputManager::new();

        input.begin_frame(InputState::new().with_key(KeyCode::LeftShift));
        assert!(input.just_pressed(KeyCode::LeftShift));
        assert!(input.is_down(KeyCode::LeftShift));

        input.begin_frame(InputState::new().with_key(KeyCode::LeftShift));
        assert!(!input.just_pressed(KeyCode::LeftShift));
        assert!(input.is_down(KeyCode::LeftShift));

        input.begin_frame(InputState::new());
        assert!(input.just_released(KeyCode::LeftShift));
        assert!(!input.is_down(KeyCode::LeftShift));
    }

    #[test]
    fn test_button_edges() {
        let mut input = InputManager::new();
        input.begin_frame(InputState::new().with_button(MouseButton::Right));
        assert!(input.button_just_pressed(MouseButton::Right));

        input.begin_frame(InputState::new());
        assert!(input.button_just_released(MouseButton::Right));
        assert!(!input.button_just_pressed(MouseButton::Right));
    }

    #[test]
    fn test_mouse_delta() {
        let mut input = InputManager::new();
        input.begin_frame(InputState::new().with_mouse_position(100.0, 50.0));
        assert_eq!(input.mouse_delta(), (0.0, 0.0));

        input.begin_frame(InputState::new().with_mouse_position(112.0, 45.0));
        assert_eq!(input.mouse_delta(), (12.0, -5.0));
    }
}
