//! Recording surface.
//!
//! Captures every primitive together with the transform active when it was
//! issued. Used for headless inspection and tests.

use crate::surface::{RadialGradient, Surface, TransformStack};
use ingot_core::Color;
use kurbo::{Affine, Point, Rect};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillRect { rect: Rect, color: Color },
    StrokeRect { rect: Rect, color: Color, width: f64 },
    FillEllipse { bounds: Rect, color: Color },
    StrokeEllipse { bounds: Rect, color: Color, width: f64 },
    Text { origin: Point, text: String, size: f64, color: Color },
    Line { from: Point, to: Point, color: Color, width: f64 },
    Point { at: Point, color: Color },
    Gradient { rect: Rect, gradient: RadialGradient },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub op: DrawOp,
    pub transform: Affine,
}

#[derive(Debug, Clone)]
pub struct DisplayList {
    width: f64,
    height: f64,
    transforms: TransformStack,
    ops: Vec<Recorded>,
}

impl DisplayList {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            transforms: TransformStack::new(),
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[Recorded] {
        &self.ops
    }

    /// Every `save` has been matched by a `restore`.
    pub fn is_balanced(&self) -> bool {
        self.transforms.depth() == 0
    }

    fn push(&mut self, op: DrawOp) {
        self.ops.push(Recorded {
            op,
            transform: self.transforms.current(),
        });
    }
}

impl Surface for DisplayList {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn save(&mut self) {
        self.transforms.save();
    }

    fn restore(&mut self) {
        self.transforms.restore();
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.transforms.translate(dx, dy);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.transforms.scale(sx, sy);
    }

    fn reset_transform(&mut self) {
        self.transforms.reset();
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.push(DrawOp::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64) {
        self.push(DrawOp::StrokeRect { rect, color, width });
    }

    fn fill_ellipse(&mut self, bounds: Rect, color: Color) {
        self.push(DrawOp::FillEllipse { bounds, color });
    }

    fn stroke_ellipse(&mut self, bounds: Rect, color: Color, width: f64) {
        self.push(DrawOp::StrokeEllipse {
            bounds,
            color,
            width,
        });
    }

    fn fill_text(&mut self, origin: Point, text: &str, font_size: f64, color: Color) {
        self.push(DrawOp::Text {
            origin,
            text: text.to_string(),
            size: font_size,
            color,
        });
    }

    fn line(&mut self, from: Point, to: Point, color: Color, width: f64) {
        self.push(DrawOp::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn point(&mut self, at: Point, color: Color) {
        self.push(DrawOp::Point { at, color });
    }

    fn fill_radial_gradient(&mut self, rect: Rect, gradient: RadialGradient) {
        self.push(DrawOp::Gradient { rect, gradient });
    }
}
