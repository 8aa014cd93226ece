//! Status channel: what the viewport reports to the host's status bar.

use ingot_core::{Color, Point};
use std::fmt;

/// Snapshot taken after a state-changing input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusSnapshot {
    /// Last known cursor in screen space; (0, 0) before any pointer event.
    pub screen_pos: Point,
    pub scene_pos: Point,
    /// Color of the topmost interactive item under the cursor, or the
    /// theme's neutral sample.
    pub color: Color,
    pub zoom: f64,
}

impl fmt::Display for StatusSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Screen: ({:.0}, {:.0}) | Scene: ({:.1}, {:.1}) | Color: {} | Zoom: {:.0}%",
            self.screen_pos.x,
            self.screen_pos.y,
            self.scene_pos.x,
            self.scene_pos.y,
            self.color.to_hex(),
            self.zoom * 100.0
        )
    }
}

/// Receives status snapshots. Fire-and-forget.
pub trait StatusSink {
    fn publish(&mut self, status: &StatusSnapshot);
}

impl<F: FnMut(&StatusSnapshot)> StatusSink for F {
    fn publish(&mut self, status: &StatusSnapshot) {
        self(status)
    }
}
