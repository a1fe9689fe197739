//! Keyboard bindings for the garden canvas.
//!
//! | Keys | Action |
//! |------|--------|
//! | `+` / `=` | Zoom in |
//! | `-` | Zoom out |
//! | `0` | Reset view |
//! | `Delete` / `Backspace` | Delete selected element |
//! | `Escape` | Deselect |
//! | ⌘/Ctrl + `Delete` | Clear garden |
//!
//! Zoom keys work with or without the command modifier, matching browser
//! zoom habits.

use crate::input::Modifiers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    ZoomIn,
    ZoomOut,
    ResetView,
    Delete,
    Deselect,
    ClearAll,
}

pub struct ShortcutMap;

impl ShortcutMap {
    /// `key` is a DOM `KeyboardEvent.key` value such as `"+"` or `"Delete"`.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        use ShortcutAction::*;
        let action = match (key, modifiers.command()) {
            ("+" | "=", _) => ZoomIn,
            ("-", _) => ZoomOut,
            ("0", _) => ResetView,
            ("Delete" | "Backspace", true) => ClearAll,
            ("Delete" | "Backspace", false) => Delete,
            ("Escape", false) => Deselect,
            _ => return None,
        };
        Some(action)
    }
}
