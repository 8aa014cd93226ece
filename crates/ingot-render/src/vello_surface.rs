//! Vello backend.
//!
//! Encodes each primitive into a `vello::Scene` with the current transform.
//! The host owns the wgpu device and presents the scene itself.

use crate::surface::{RadialGradient, Surface, TransformStack};
use kurbo::{Affine, Circle, Ellipse, Line, Point, Rect, Size, Stroke};
use peniko::{Color, Fill, Gradient};
use vello::Scene;

fn to_peniko(c: ingot_core::Color) -> Color {
    let [r, g, b, a] = c.to_rgba8();
    Color::from_rgba8(r, g, b, a)
}

pub struct VelloSurface {
    scene: Scene,
    size: Size,
    transforms: TransformStack,
}

impl VelloSurface {
    pub fn new(size: Size) -> Self {
        Self {
            scene: Scene::new(),
            size,
            transforms: TransformStack::new(),
        }
    }

    /// Reuse the encoding buffers for the next frame.
    pub fn reset(&mut self, size: Size) {
        self.scene.reset();
        self.size = size;
        self.transforms = TransformStack::new();
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn into_scene(self) -> Scene {
        self.scene
    }

    fn transform(&self) -> Affine {
        self.transforms.current()
    }
}

impl Surface for VelloSurface {
    fn width(&self) -> f64 {
        self.size.width
    }

    fn height(&self) -> f64 {
        self.size.height
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

    fn fill_rect(&mut self, rect: Rect, color: ingot_core::Color) {
        let t = self.transform();
        self.scene
            .fill(Fill::NonZero, t, to_peniko(color), None, &rect);
    }

    fn stroke_rect(&mut self, rect: Rect, color: ingot_core::Color, width: f64) {
        let t = self.transform();
        self.scene
            .stroke(&Stroke::new(width), t, to_peniko(color), None, &rect);
    }

    fn fill_ellipse(&mut self, bounds: Rect, color: ingot_core::Color) {
        let t = self.transform();
        let shape = Ellipse::from_rect(bounds);
        self.scene
            .fill(Fill::NonZero, t, to_peniko(color), None, &shape);
    }

    fn stroke_ellipse(&mut self, bounds: Rect, color: ingot_core::Color, width: f64) {
        let t = self.transform();
        let shape = Ellipse::from_rect(bounds);
        self.scene
            .stroke(&Stroke::new(width), t, to_peniko(color), None, &shape);
    }

    fn fill_text(&mut self, origin: Point, text: &str, _font_size: f64, _color: ingot_core::Color) {
        // Glyph runs need a font context the host supplies.
        log::trace!("TEXT {:?} at ({}, {}) skipped by vello backend", text, origin.x, origin.y);
    }

    fn line(&mut self, from: Point, to: Point, color: ingot_core::Color, width: f64) {
        let t = self.transform();
        self.scene.stroke(
            &Stroke::new(width),
            t,
            to_peniko(color),
            None,
            &Line::new(from, to),
        );
    }

    fn point(&mut self, at: Point, color: ingot_core::Color) {
        let device = self.transform() * at;
        self.scene.fill(
            Fill::NonZero,
            Affine::IDENTITY,
            to_peniko(color),
            None,
            &Circle::new(device, 1.0),
        );
    }

    fn fill_radial_gradient(&mut self, rect: Rect, g: RadialGradient) {
        let t = self.transform();
        let brush = Gradient::new_radial(g.center, g.radius as f32)
            .with_stops([(0.0, to_peniko(g.inner)), (1.0, to_peniko(g.outer))]);
        self.scene.fill(Fill::NonZero, t, &brush, None, &rect);
    }
}
