//! Camera over an infinite scene plane.
//!
//! The camera position is the scene point shown at the viewport center.
//! With `c` the camera position, `z` the zoom and `w × h` the viewport:
//!
//! ```text
//! scene  = c + (screen - (w/2, h/2)) / z
//! screen = (scene - c) * z + (w/2, h/2)
//! ```
//!
//! Both directions are exact inverses for every zoom in range.

use kurbo::{Affine, Point, Rect, Size, Vec2};

pub const MIN_ZOOM: f64 = 0.01;
pub const MAX_ZOOM: f64 = 100.0;

/// Factor applied by one wheel notch or one zoom key press.
pub const ZOOM_STEP: f64 = 1.25;

/// Arrow-key step in screen-equivalent units at zoom 1.0.
pub const KEY_STEP: f64 = 20.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Point,
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
    viewport: Size,
}

impl Camera {
    /// Camera at the scene origin, zoom 1.0, default limits.
    pub fn new(viewport: Size) -> Self {
        Self {
            position: Point::ZERO,
            zoom: 1.0,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            viewport,
        }
    }

    /// Replace the zoom limits. The range is normalized so that
    /// `min <= max`, and the current zoom is clamped into it. Limits that
    /// are not finite and positive are ignored.
    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        let usable = |z: f64| z.is_finite() && z > 0.0;
        if !(usable(min_zoom) && usable(max_zoom)) {
            log::warn!("camera: ignoring zoom limits [{min_zoom}, {max_zoom}]");
            return self;
        }
        let (lo, hi) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = lo;
        self.max_zoom = hi;
        self.zoom = self.zoom.clamp(lo, hi);
        self
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, p: Point) {
        self.position = p;
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn zoom_limits(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    /// Set the zoom, saturating at the limits. NaN is ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_nan() {
            return;
        }
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn set_viewport(&mut self, size: Size) {
        self.viewport = size;
    }

    /// Screen-space center of the viewport.
    pub fn viewport_center(&self) -> Point {
        Point::new(self.viewport.width / 2.0, self.viewport.height / 2.0)
    }

    // ─── Transforms ──────────────────────────────────────────────────────

    pub fn screen_to_scene(&self, screen: Point) -> Point {
        self.screen_to_scene_with_zoom(screen, self.zoom)
    }

    /// Screen → scene using the current position but an arbitrary zoom.
    pub fn screen_to_scene_with_zoom(&self, screen: Point, zoom: f64) -> Point {
        let rel = screen - self.viewport_center();
        self.position + rel / zoom
    }

    pub fn scene_to_screen(&self, scene: Point) -> Point {
        self.viewport_center() + (scene - self.position) * self.zoom
    }

    /// Scene → screen as an affine map, for drawing surfaces.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.viewport_center().to_vec2())
            * Affine::scale(self.zoom)
            * Affine::translate(-self.position.to_vec2())
    }

    /// The scene-space rectangle currently covered by the viewport.
    pub fn visible_scene_rect(&self) -> Rect {
        let p0 = self.screen_to_scene(Point::ZERO);
        let p1 = self.screen_to_scene(Point::new(self.viewport.width, self.viewport.height));
        Rect::from_points(p0, p1)
    }

    // ─── Navigation ──────────────────────────────────────────────────────

    /// Multiply the zoom by `factor` while keeping the scene point under
    /// `cursor` (screen space) fixed on screen.
    ///
    /// Non-finite or non-positive factors are ignored. Returns whether the
    /// zoom changed.
    pub fn zoom_to_cursor(&mut self, cursor: Point, factor: f64) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        let before = self.screen_to_scene(cursor);
        let old_zoom = self.zoom;
        self.zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        let after = self.screen_to_scene_with_zoom(cursor, self.zoom);
        self.position -= after - before;
        log::trace!(
            "camera: zoom {old_zoom:.4} -> {:.4} anchored at {cursor:?}",
            self.zoom
        );
        (self.zoom - old_zoom).abs() > f64::EPSILON
    }

    /// Return to zoom 1.0, anchored at the viewport center.
    pub fn reset_zoom(&mut self) -> bool {
        let center = self.viewport_center();
        self.zoom_to_cursor(center, 1.0 / self.zoom)
    }

    pub fn center_on(&mut self, scene: Point) {
        self.position = scene;
    }

    /// Translate the camera by a scene-space delta.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Arrow-key step for the current zoom: `base / zoom` when zoomed out,
    /// `base * zoom` otherwise.
    pub fn key_step(&self, base: f64) -> f64 {
        if self.zoom < 1.0 {
            base / self.zoom
        } else {
            base * self.zoom
        }
    }
}
