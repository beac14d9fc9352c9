//! Pointer and touch state as seen by the simulator.

use glam::DVec2;

/// Cursor position used when no pointer is over the page. Far enough outside
/// any grid that no square is within reach.
pub const FAR_AWAY: DVec2 = DVec2::new(-9999.0, -9999.0);

/// Which input last moved the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    #[default]
    Pointer,
    Touch,
}

/// Latest pointer/touch input, in logical canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    position: DVec2,
    pressed: bool,
    kind: InputKind,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            position: FAR_AWAY,
            pressed: false,
            kind: InputKind::Pointer,
        }
    }
}

impl Cursor {
    pub fn position(&self) -> DVec2 {
        self.position
    }

    /// Whether a pointer or touch is currently over the canvas.
    pub fn is_active(&self) -> bool {
        self.position != FAR_AWAY
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn kind(&self) -> InputKind {
        self.kind
    }

    /// Pointer moved to `at`.
    pub fn pointer_move(&mut self, at: DVec2) {
        self.position = at;
        self.kind = InputKind::Pointer;
    }

    /// First touch point started or moved to `at`.
    pub fn touch_move(&mut self, at: DVec2) {
        self.position = at;
        self.kind = InputKind::Touch;
    }

    pub fn press(&mut self) {
        self.pressed = true;
    }

    pub fn release(&mut self) {
        self.pressed = false;
    }

    /// Pointer left the window or the touch ended; squares drift back.
    pub fn leave(&mut self) {
        self.position = FAR_AWAY;
    }
}
