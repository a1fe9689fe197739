//! Host-neutral input events.
//!
//! Normalizes host pointer and keyboard events into a unified `InputEvent`
//! enum consumed by the canvas controller. Pointer coordinates are screen
//! pixels; the controller converts them to scene space.

/// Keyboard modifier state at the time of an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Platform command key: ⌘ on macOS, Ctrl elsewhere.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A normalized input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed over the canvas.
    PointerDown { x: f64, y: f64, modifiers: Modifiers },

    /// Pointer moved anywhere in the window, not only over the canvas.
    PointerMove { x: f64, y: f64, modifiers: Modifiers },

    /// Pointer released anywhere in the window.
    PointerUp { x: f64, y: f64, modifiers: Modifiers },

    /// Key pressed. `key` is the `KeyboardEvent.key` value.
    Key { key: String, modifiers: Modifiers },
}

impl InputEvent {
    pub fn pointer_down(x: f64, y: f64) -> Self {
        Self::PointerDown {
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove {
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn pointer_up(x: f64, y: f64) -> Self {
        Self::PointerUp {
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn key(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self::Key {
            key: key.into(),
            modifiers,
        }
    }

    /// Extract position if this is a pointer event.
    pub fn position(&self) -> Option<(f64, f64)> {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y, .. }
            | Self::PointerUp { x, y, .. } => Some((*x, *y)),
            Self::Key { .. } => None,
        }
    }
}
