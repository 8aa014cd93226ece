//! Viewport keyboard navigation.
//!
//! Maps plain keys to semantic `ViewAction`s. Command-modified combos
//! (Ctrl/⌘ + key) are left to the action registry and resolve to `None` here.

use crate::input::Modifiers;

/// Navigation actions the viewport applies itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAction {
    PanLeft,
    PanRight,
    PanUp,
    PanDown,
    /// Zoom in, anchored at the last cursor position.
    ZoomIn,
    ZoomOut,
    /// Back to zoom 1.0, anchored at the viewport center.
    ResetZoom,
    /// Recenter on the scene origin, zoom unchanged.
    CenterOrigin,
}

pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key-down to a viewport action.
    ///
    /// `key` is the `KeyboardEvent.key` value. Returns `None` for unbound
    /// keys and for any combo holding the command modifier.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<ViewAction> {
        if modifiers.command() {
            return None;
        }
        match key {
            "ArrowLeft" => Some(ViewAction::PanLeft),
            "ArrowRight" => Some(ViewAction::PanRight),
            "ArrowUp" => Some(ViewAction::PanUp),
            "ArrowDown" => Some(ViewAction::PanDown),
            "+" | "=" => Some(ViewAction::ZoomIn),
            "-" => Some(ViewAction::ZoomOut),
            "0" => Some(ViewAction::ResetZoom),
            "Home" | "h" | "H" => Some(ViewAction::CenterOrigin),
            _ => None,
        }
    }
}
