//! Drawable → surface drawing commands.
//!
//! Each variant paints itself in scene coordinates under whatever transform
//! is active on the surface, wrapped in save/restore so no state leaks.

use crate::surface::Surface;
use ingot_core::model::{Color, Drawable, DrawableKind};
use kurbo::{Point, Rect};

const BORDER_WIDTH: f64 = 1.0;
const PLACEHOLDER_BORDER: Color = Color::rgb8(100, 100, 100);
const PLACEHOLDER_FILL: Color = Color::rgba8(50, 50, 50, 100);

pub trait Paintable {
    fn paint(&self, surface: &mut dyn Surface);
}

impl Paintable for Drawable {
    fn paint(&self, surface: &mut dyn Surface) {
        if !self.visible {
            return;
        }
        surface.save();
        match &self.kind {
            DrawableKind::Rect { fill, border, .. } => {
                let r = self.bounding_box();
                surface.fill_rect(r, *fill);
                surface.stroke_rect(r, *border, BORDER_WIDTH);
            }
            DrawableKind::Ellipse { fill, border, .. } => {
                let r = self.bounding_box();
                surface.fill_ellipse(r, *fill);
                surface.stroke_ellipse(r, *border, BORDER_WIDTH);
            }
            DrawableKind::Text {
                content,
                font_size,
                color,
            } => {
                log::trace!("TEXT {} {:?} at ({}, {})", self.id, content, self.x, self.y);
                let baseline = Point::new(self.x, self.y + font_size);
                surface.fill_text(baseline, content, *font_size, *color);
            }
            DrawableKind::Widget { .. } => paint_placeholder(surface, self.bounding_box()),
        }
        surface.restore();
    }
}

/// The host draws the real widget; the scene shows where it sits.
fn paint_placeholder(surface: &mut dyn Surface, r: Rect) {
    surface.fill_rect(r, PLACEHOLDER_FILL);
    surface.stroke_rect(r, PLACEHOLDER_BORDER, BORDER_WIDTH);
}
