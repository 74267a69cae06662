//! Input snapshot
//!
//! The windowing layer polls keyboard and mouse once per frame and hands the
//! viewer an [`InputState`]. Nothing here talks to a window system.

pub mod mouse;

pub use mouse::{MouseButtons, MouseState};

use std::collections::HashSet;

/// Keys held and mouse state for one frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys: HashSet<KeyCode>,
    /// Mouse position and buttons
    pub mouse: MouseState,
}

impl InputState {
    /// Empty snapshot with the mouse at the window origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` as held
    pub fn press(&mut self, key: KeyCode) {
        self.keys.insert(key);
    }

    /// Mark `key` as released
    pub fn release(&mut self, key: KeyCode) {
        self.keys.remove(&key);
    }

    /// Release every key and mouse button
    pub fn clear(&mut self) {
        self.keys.clear();
        self.mouse.buttons = MouseButtons::empty();
    }

    /// Builder form of [`press`](Self::press)
    #[must_use]
    pub fn with_key(mut self, key: KeyCode) -> Self {
        self.press(key);
        self
    }

    /// Builder form setting the mouse position and buttons
    #[must_use]
    pub fn with_mouse(mut self, x: f32, y: f32, buttons: MouseButtons) -> Self {
        self.mouse = MouseState {
            screen_x: x,
            screen_y: y,
            buttons,
        };
        self
    }

    /// Whether `key` is held
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    /// Whether either Control key is held
    pub fn ctrl_down(&self) -> bool {
        self.is_key_down(KeyCode::LeftControl) || self.is_key_down(KeyCode::RightControl)
    }

    /// Held keys in no particular order
    pub fn keys(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.keys.iter().copied()
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// `=` / `+` key
    Equal,
    /// `-` key
    Minus,
    /// Left Control
    LeftControl,
    /// Right Control
    RightControl,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release() {
        let mut input = InputState::new().with_key(KeyCode::A);
        assert!(input.is_key_down(KeyCode::A));
        input.release(KeyCode::A);
        assert!(!input.is_key_down(KeyCode::A));
    }

    #[test]
    fn test_ctrl_either_side() {
        assert!(InputState::new().with_key(KeyCode::RightControl).ctrl_down());
        assert!(InputState::new().with_key(KeyCode::LeftControl).ctrl_down());
        assert!(!InputState::new().with_key(KeyCode::Q).ctrl_down());
    }

    #[test]
    fn test_clear() {
        let mut input = InputState::new()
            .with_key(KeyCode::R)
            .with_mouse(10.0, 20.0, MouseButtons::LEFT);
        input.clear();
        assert_eq!(input.keys().count(), 0);
        assert!(input.mouse.buttons.is_empty());
        assert_eq!(input.mouse.screen_x, 10.0);
    }
}
