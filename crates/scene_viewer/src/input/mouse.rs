//! Mouse state snapshot
//!
//! Position is in window pixels with the origin at the top-left corner, the
//! way windowing systems report it. Conversions to bottom-left window space
//! happen in the picker.

use bitflags::bitflags;

bitflags! {
    /// Mask of mouse buttons held down
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MouseButtons: u8 {
        /// Left mouse button
        const LEFT = 1 << 0;
        /// Right mouse button
        const RIGHT = 1 << 1;
        /// Middle mouse button
        const MIDDLE = 1 << 2;
    }
}

/// Mouse position and button mask for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseState {
    /// Screen-space X position (pixels from left)
    pub screen_x: f32,
    /// Screen-space Y position (pixels from top)
    pub screen_y: f32,
    /// Buttons currently held
    pub buttons: MouseButtons,
}

impl MouseState {
    /// Mouse at `(x, y)` with nothing pressed
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            screen_x: x,
            screen_y: y,
            buttons: MouseButtons::empty(),
        }
    }

    /// Press or release `button`
    pub fn set_button(&mut self, button: MouseButtons, pressed: bool) {
        self.buttons.set(button, pressed);
    }

    /// Whether exactly the left button is held
    ///
    /// Chords such as left + right do not count as a left click.
    pub fn left_only(&self) -> bool {
        self.buttons == MouseButtons::LEFT
    }

    /// Convert the position to Normalized Device Coordinates
    ///
    /// X runs -1 (left) to +1 (right); Y runs -1 (bottom) to +1 (top).
    pub fn screen_to_ndc(&self, width: u32, height: u32) -> (f32, f32) {
        let ndc_x = self.screen_x / width.max(1) as f32 * 2.0 - 1.0;
        let ndc_y = 1.0 - self.screen_y / height.max(1) as f32 * 2.0;
        (ndc_x, ndc_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_to_ndc_center() {
        let mouse = MouseState::at(250.0, 250.0);
        let (ndc_x, ndc_y) = mouse.screen_to_ndc(500, 500);
        assert!(ndc_x.abs() < 0.001);
        assert!(ndc_y.abs() < 0.001);
    }

    #[test]
    fn test_screen_to_ndc_corners() {
        let mouse = MouseState::at(0.0, 0.0);
        let (ndc_x, ndc_y) = mouse.screen_to_ndc(500, 500);
        assert!((ndc_x - (-1.0)).abs() < 0.001); // Left edge
        assert!((ndc_y - 1.0).abs() < 0.001); // Top edge
    }

    #[test]
    fn test_left_only() {
        let mut mouse = MouseState::default();
        assert!(!mouse.left_only());
        mouse.set_button(MouseButtons::LEFT, true);
        assert!(mouse.left_only());
        mouse.set_button(MouseButtons::RIGHT, true);
        assert!(!mouse.left_only());
        mouse.set_button(MouseButtons::RIGHT, false);
        assert!(mouse.left_only());
    }
}
