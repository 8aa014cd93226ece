//! Input abstraction layer.
//!
//! Normalizes host pointer, wheel, keyboard and focus events into a single
//! `InputEvent` enum consumed by the viewport controller. Positions are in
//! screen space (viewport pixels, origin top-left).

use kurbo::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
    /// Extra buttons (back/forward, ...). Ignored by the viewport.
    Other(u16),
}

/// Keyboard modifiers held while an event fired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
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

    pub const ALT: Self = Self {
        alt: true,
        ..Self::NONE
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    /// Platform command key: ⌘ on macOS, Ctrl elsewhere.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A normalized input event from the host.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown {
        button: PointerButton,
        x: f64,
        y: f64,
        modifiers: Modifiers,
    },

    PointerMove { x: f64, y: f64 },

    PointerUp {
        button: PointerButton,
        x: f64,
        y: f64,
        modifiers: Modifiers,
    },

    /// Wheel notch. Only the sign of `delta_y` matters: positive zooms in.
    Wheel { x: f64, y: f64, delta_y: f64 },

    /// `key` is the `KeyboardEvent.key` value (e.g. `"ArrowLeft"`, `"+"`, `" "`).
    KeyDown { key: String, modifiers: Modifiers },

    KeyUp { key: String, modifiers: Modifiers },

    /// The viewport lost keyboard/pointer focus (window deactivated, ...).
    FocusLost,
}

impl InputEvent {
    pub fn pointer_down(button: PointerButton, x: f64, y: f64) -> Self {
        Self::PointerDown {
            button,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove { x, y }
    }

    pub fn pointer_up(button: PointerButton, x: f64, y: f64) -> Self {
        Self::PointerUp {
            button,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn wheel(x: f64, y: f64, delta_y: f64) -> Self {
        Self::Wheel { x, y, delta_y }
    }

    pub fn key_down(key: impl Into<String>) -> Self {
        Self::KeyDown {
            key: key.into(),
            modifiers: Modifiers::NONE,
        }
    }

    pub fn key_up(key: impl Into<String>) -> Self {
        Self::KeyUp {
            key: key.into(),
            modifiers: Modifiers::NONE,
        }
    }

    /// Replace the modifiers on pointer and key events. No-op otherwise.
    pub fn with_modifiers(mut self, mods: Modifiers) -> Self {
        match &mut self {
            Self::PointerDown { modifiers, .. }
            | Self::PointerUp { modifiers, .. }
            | Self::KeyDown { modifiers, .. }
            | Self::KeyUp { modifiers, .. } => *modifiers = mods,
            _ => {}
        }
        self
    }

    /// Screen position, if this event carries one.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y }
            | Self::PointerUp { x, y, .. }
            | Self::Wheel { x, y, .. } => Some(Point::new(*x, *y)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_only_for_pointer_events() {
        assert_eq!(
            InputEvent::wheel(3.0, 4.0, 1.0).position(),
            Some(Point::new(3.0, 4.0))
        );
        assert_eq!(InputEvent::key_down("a").position(), None);
        assert_eq!(InputEvent::FocusLost.position(), None);
    }

    #[test]
    fn with_modifiers_sets_pointer_and_key_events() {
        let ev = InputEvent::pointer_down(PointerButton::Left, 0.0, 0.0)
            .with_modifiers(Modifiers::ALT);
        assert!(matches!(ev, InputEvent::PointerDown { modifiers, .. } if modifiers.alt));
        let ev = InputEvent::pointer_move(0.0, 0.0).with_modifiers(Modifiers::ALT);
        assert_eq!(ev, InputEvent::pointer_move(0.0, 0.0));
    }

    #[test]
    fn command_covers_ctrl_and_meta() {
        assert!(Modifiers::CTRL.command());
        assert!(Modifiers { meta: true, ..Modifiers::NONE }.command());
        assert!(!Modifiers::ALT.command());
    }
}
