//! Layered viewport renderer.
//!
//! Layers, back to front:
//!
//! 1. background: radial gradient centered on the scene origin (scene space)
//! 2. drawables in ascending z-order (scene space)
//! 3. origin marker: axis lines and a point at (0, 0) (scene space)
//! 4. scope: crosshair through the cursor (screen space, no camera)

use crate::paint::Paintable;
use crate::surface::{RadialGradient, Surface};
use ingot_core::{Camera, Color, SceneRegistry};
use kurbo::Point;

/// Axis lines run this far in each direction, enough to look unbounded at
/// any supported zoom.
pub const AXIS_EXTENT: f64 = 10_000.0;

/// Theme-dependent colors for the viewport renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasTheme {
    pub name: &'static str,
    pub background_center: Color,
    pub background_edge: Color,
    /// Vertical (y) axis.
    pub axis_y: Color,
    /// Horizontal (x) axis.
    pub axis_x: Color,
    pub origin_point: Color,
    pub scope: Color,
    /// Reported by status sampling when nothing colored is under the cursor.
    pub neutral_sample: Color,
}

impl CanvasTheme {
    /// Dark "emptiness" canvas.
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background_center: Color::rgb8(30, 30, 30),
            background_edge: Color::rgb8(15, 15, 15),
            axis_y: Color::rgba8(255, 100, 100, 150),
            axis_x: Color::rgba8(100, 255, 100, 150),
            origin_point: Color::rgba8(255, 255, 255, 200),
            scope: Color::rgba8(255, 255, 255, 200),
            neutral_sample: Color::rgb8(100, 100, 100),
        }
    }

    /// Light canvas for bright host themes.
    pub fn light() -> Self {
        Self {
            name: "light",
            background_center: Color::rgb8(245, 245, 247),
            background_edge: Color::rgb8(225, 225, 230),
            axis_y: Color::rgba8(220, 60, 60, 150),
            axis_x: Color::rgba8(40, 170, 60, 150),
            origin_point: Color::rgba8(28, 28, 30, 200),
            scope: Color::rgba8(28, 28, 30, 160),
            neutral_sample: Color::rgb8(100, 100, 100),
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }
}

impl Default for CanvasTheme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Everything one repaint reads.
#[derive(Debug, Clone, Copy)]
pub struct ViewFrame<'a> {
    pub camera: &'a Camera,
    pub scene: &'a SceneRegistry,
    /// Last known cursor in screen space, if any pointer event was seen.
    pub cursor: Option<Point>,
    pub scope_visible: bool,
    pub theme: &'a CanvasTheme,
}

/// Render one frame. Leaves the surface's paint state as it found it.
pub fn render_view(surface: &mut dyn Surface, frame: &ViewFrame<'_>) {
    let camera = frame.camera;
    let zoom = camera.zoom();
    let center = camera.viewport_center();

    surface.save();
    surface.translate(center.x, center.y);
    surface.scale(zoom, zoom);
    surface.translate(-camera.position().x, -camera.position().y);

    draw_background(surface, frame);

    for item in frame.scene.items_in_z_order() {
        item.paint(surface);
    }

    draw_origin(surface, frame.theme);
    surface.restore();

    if frame.scope_visible
        && let Some(cursor) = frame.cursor
    {
        draw_scope(surface, cursor, frame.theme);
    }
}

fn draw_background(surface: &mut dyn Surface, frame: &ViewFrame<'_>) {
    let viewport = frame.camera.viewport();
    let radius = viewport.width.max(viewport.height) / 2.0 / frame.camera.zoom();
    let gradient = RadialGradient {
        center: Point::ZERO,
        radius,
        inner: frame.theme.background_center,
        outer: frame.theme.background_edge,
    };
    surface.fill_radial_gradient(frame.camera.visible_scene_rect(), gradient);
}

fn draw_origin(surface: &mut dyn Surface, theme: &CanvasTheme) {
    surface.line(
        Point::new(0.0, -AXIS_EXTENT),
        Point::new(0.0, AXIS_EXTENT),
        theme.axis_y,
        1.0,
    );
    surface.line(
        Point::new(-AXIS_EXTENT, 0.0),
        Point::new(AXIS_EXTENT, 0.0),
        theme.axis_x,
        1.0,
    );
    surface.point(Point::ZERO, theme.origin_point);
}

fn draw_scope(surface: &mut dyn Surface, cursor: Point, theme: &CanvasTheme) {
    surface.save();
    surface.reset_transform();
    let (w, h) = (surface.width(), surface.height());
    surface.line(Point::new(0.0, cursor.y), Point::new(w, cursor.y), theme.scope, 1.0);
    surface.line(Point::new(cursor.x, 0.0), Point::new(cursor.x, h), theme.scope, 1.0);
    surface.restore();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn themes_resolve_by_name() {
        assert_eq!(CanvasTheme::by_name("dark"), Some(CanvasTheme::dark()));
        assert_eq!(CanvasTheme::by_name("light").map(|t| t.name), Some("light"));
        assert!(CanvasTheme::by_name("solarized").is_none());
    }

    #[test]
    fn dark_theme_gradient_endpoints() {
        let t = CanvasTheme::dark();
        assert_eq!(t.background_center.to_rgba8(), [30, 30, 30, 255]);
        assert_eq!(t.background_edge.to_rgba8(), [15, 15, 15, 255]);
    }
}
