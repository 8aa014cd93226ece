//! Drawing-surface abstraction.
//!
//! Mirrors the subset of a 2D canvas context the viewport needs: scoped
//! save/restore, scale/translate composed onto the current transform, and a
//! handful of primitives. Geometry passed to primitives is in the surface's
//! *current* coordinate space; backends apply the transform themselves.

use ingot_core::Color;
use kurbo::{Affine, Point, Rect};
use smallvec::SmallVec;

/// A radial gradient from `inner` at `center` to `outer` at `radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialGradient {
    pub center: Point,
    pub radius: f64,
    pub inner: Color,
    pub outer: Color,
}

pub trait Surface {
    /// Surface width in device pixels.
    fn width(&self) -> f64;
    /// Surface height in device pixels.
    fn height(&self) -> f64;

    /// Push the paint state (currently the transform).
    fn save(&mut self);
    /// Pop the paint state. Unbalanced restores are ignored.
    fn restore(&mut self);

    /// Post-multiply a translation onto the current transform.
    fn translate(&mut self, dx: f64, dy: f64);
    /// Post-multiply a scale onto the current transform.
    fn scale(&mut self, sx: f64, sy: f64);
    /// Replace the current transform with identity (device space).
    fn reset_transform(&mut self);

    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64);
    /// Fill the ellipse inscribed in `bounds`.
    fn fill_ellipse(&mut self, bounds: Rect, color: Color);
    fn stroke_ellipse(&mut self, bounds: Rect, color: Color, width: f64);
    /// Draw `text` with its baseline starting at `origin`.
    fn fill_text(&mut self, origin: Point, text: &str, font_size: f64, color: Color);
    fn line(&mut self, from: Point, to: Point, color: Color, width: f64);
    /// A single device pixel at `at`.
    fn point(&mut self, at: Point, color: Color);
    fn fill_radial_gradient(&mut self, rect: Rect, gradient: RadialGradient);
}

/// Current transform plus the save stack. Shared by every backend.
#[derive(Debug, Clone)]
pub struct TransformStack {
    current: Affine,
    saved: SmallVec<[Affine; 8]>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformStack {
    pub fn new() -> Self {
        Self {
            current: Affine::IDENTITY,
            saved: SmallVec::new(),
        }
    }

    pub fn current(&self) -> Affine {
        self.current
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    pub fn restore(&mut self) {
        match self.saved.pop() {
            Some(t) => self.current = t,
            None => log::trace!("surface: restore without matching save"),
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.current = self.current * Affine::translate((dx, dy));
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.current = self.current * Affine::scale_non_uniform(sx, sy);
    }

    pub fn reset(&mut self) {
        self.current = Affine::IDENTITY;
    }
}
