//! Drawable data model.
//!
//! A `Drawable` is a shared record of scene-space placement (`x`, `y`,
//! `z_index`, `visible`, `locked`) plus a closed set of shape variants in
//! `DrawableKind`. Geometry (bounds, containment) is dispatched by pattern
//! match; painting lives in `ingot-render`.
//!
//! Adding a variant means extending `DrawableKind` and the matches in
//! `bounding_box`, `contains_point`, `center` and `color`. A variant without
//! exact geometry should fall back to [`Drawable::near_anchor`].

use crate::id::DrawableId;
use kurbo::{Point, Rect, Size};
use std::fmt;
use std::rc::Rc;

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba8(r, g, b, 255)
    }

    /// Channels quantized back to bytes.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// `#RRGGBB` when opaque, `#RRGGBBAA` otherwise.
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

// ─── Defaults ────────────────────────────────────────────────────────────

/// Semi-transparent blue.
pub const DEFAULT_RECT_FILL: Color = Color::rgba8(100, 150, 200, 150);
/// Semi-transparent pink.
pub const DEFAULT_ELLIPSE_FILL: Color = Color::rgba8(200, 100, 150, 150);
/// Light gray outline shared by rectangles and ellipses.
pub const DEFAULT_BORDER: Color = Color::rgb8(200, 200, 200);
pub const DEFAULT_TEXT_COLOR: Color = Color::WHITE;
pub const DEFAULT_FONT_SIZE: f64 = 12.0;
pub const DEFAULT_SHAPE_SIZE: f64 = 100.0;

/// Text has no font metrics here: hit-testing and bounds use a fixed box
/// anchored at the text position. Intentional approximation.
pub const TEXT_BOX_WIDTH: f64 = 100.0;
pub const TEXT_BOX_HEIGHT: f64 = 20.0;

/// Radius used by [`Drawable::near_anchor`].
pub const ANCHOR_PICK_RADIUS: f64 = 10.0;

// ─── Drawable ────────────────────────────────────────────────────────────

/// Opaque reference to a widget owned outside the scene (by the host UI).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetHandle(pub u64);

/// Callback invoked when the viewport dispatches a click to a drawable.
pub type ClickHandler = Rc<dyn Fn(&Drawable, Point)>;

/// Shape-specific data.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawableKind {
    Rect {
        width: f64,
        height: f64,
        fill: Color,
        border: Color,
    },
    Ellipse {
        width: f64,
        height: f64,
        fill: Color,
        border: Color,
    },
    Text {
        content: String,
        font_size: f64,
        color: Color,
    },
    /// Stand-in for an embedded host widget. The host renders the widget
    /// itself; the scene only paints a placeholder box and hit-tests it.
    Widget {
        widget: WidgetHandle,
        width: f64,
        height: f64,
    },
}

impl DrawableKind {
    fn prefix(&self) -> &'static str {
        match self {
            Self::Rect { .. } => "rect",
            Self::Ellipse { .. } => "ellipse",
            Self::Text { .. } => "text",
            Self::Widget { .. } => "widget",
        }
    }
}

/// A positioned, z-ordered item in scene space.
#[derive(Clone)]
pub struct Drawable {
    pub id: DrawableId,
    pub x: f64,
    pub y: f64,
    /// Higher values draw later and win hit-test ties.
    pub z_index: i32,
    pub visible: bool,
    /// Locked drawables are painted but never hit-tested.
    pub locked: bool,
    pub kind: DrawableKind,
    on_click: Option<ClickHandler>,
}

impl fmt::Debug for Drawable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Drawable")
            .field("id", &self.id)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("z_index", &self.z_index)
            .field("visible", &self.visible)
            .field("locked", &self.locked)
            .field("kind", &self.kind)
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}

impl Drawable {
    pub fn new(x: f64, y: f64, kind: DrawableKind) -> Self {
        Self {
            id: DrawableId::with_prefix(kind.prefix()),
            x,
            y,
            z_index: 0,
            visible: true,
            locked: false,
            kind,
            on_click: None,
        }
    }

    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(
            x,
            y,
            DrawableKind::Rect {
                width,
                height,
                fill: DEFAULT_RECT_FILL,
                border: DEFAULT_BORDER,
            },
        )
    }

    pub fn ellipse(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(
            x,
            y,
            DrawableKind::Ellipse {
                width,
                height,
                fill: DEFAULT_ELLIPSE_FILL,
                border: DEFAULT_BORDER,
            },
        )
    }

    pub fn text(content: impl Into<String>, x: f64, y: f64) -> Self {
        Self::new(
            x,
            y,
            DrawableKind::Text {
                content: content.into(),
                font_size: DEFAULT_FONT_SIZE,
                color: DEFAULT_TEXT_COLOR,
            },
        )
    }

    /// Placeholder for a host widget. `measured` is the widget's reported
    /// size; widgets that report none get a 100×100 box.
    pub fn widget(widget: WidgetHandle, x: f64, y: f64, measured: Option<Size>) -> Self {
        let size = measured.unwrap_or(Size::new(DEFAULT_SHAPE_SIZE, DEFAULT_SHAPE_SIZE));
        Self::new(
            x,
            y,
            DrawableKind::Widget {
                widget,
                width: size.width,
                height: size.height,
            },
        )
    }

    // ─── Builders ────────────────────────────────────────────────────────

    pub fn with_id(mut self, name: &str) -> Self {
        self.id = DrawableId::intern(name);
        self
    }

    pub fn with_z(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// Fill color for shapes, glyph color for text. Ignored for widgets.
    pub fn with_color(mut self, c: Color) -> Self {
        match &mut self.kind {
            DrawableKind::Rect { fill, .. } | DrawableKind::Ellipse { fill, .. } => *fill = c,
            DrawableKind::Text { color, .. } => *color = c,
            DrawableKind::Widget { .. } => {}
        }
        self
    }

    /// Outline color. Shapes only; the alpha channel is forced opaque.
    pub fn with_border(mut self, c: Color) -> Self {
        if let DrawableKind::Rect { border, .. } | DrawableKind::Ellipse { border, .. } =
            &mut self.kind
        {
            *border = Color { a: 1.0, ..c };
        }
        self
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        if let DrawableKind::Text { font_size, .. } = &mut self.kind {
            *font_size = size;
        }
        self
    }

    pub fn with_click_handler(mut self, handler: impl Fn(&Drawable, Point) + 'static) -> Self {
        self.on_click = Some(Rc::new(handler));
        self
    }

    // ─── Geometry ────────────────────────────────────────────────────────

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Axis-aligned bounds in scene coordinates.
    pub fn bounding_box(&self) -> Rect {
        let (w, h) = match &self.kind {
            DrawableKind::Rect { width, height, .. }
            | DrawableKind::Ellipse { width, height, .. }
            | DrawableKind::Widget { width, height, .. } => (*width, *height),
            DrawableKind::Text { .. } => (TEXT_BOX_WIDTH, TEXT_BOX_HEIGHT),
        };
        Rect::new(self.x, self.y, self.x + w, self.y + h)
    }

    /// Exact containment for rectangles and ellipses, box test for text and
    /// widgets. Edges are inclusive.
    pub fn contains_point(&self, p: Point) -> bool {
        match &self.kind {
            DrawableKind::Rect { .. } | DrawableKind::Text { .. } | DrawableKind::Widget { .. } => {
                box_contains(self.bounding_box(), p)
            }
            DrawableKind::Ellipse { width, height, .. } => {
                let a = width / 2.0;
                let b = height / 2.0;
                if a <= 0.0 || b <= 0.0 {
                    return false;
                }
                let dx = p.x - (self.x + a);
                let dy = p.y - (self.y + b);
                (dx / a).powi(2) + (dy / b).powi(2) <= 1.0
            }
        }
    }

    /// Generic pick test: within [`ANCHOR_PICK_RADIUS`] of the anchor.
    pub fn near_anchor(&self, p: Point) -> bool {
        self.position().distance(p) < ANCHOR_PICK_RADIUS
    }

    /// Shape center; text reports its anchor.
    pub fn center(&self) -> Point {
        match &self.kind {
            DrawableKind::Text { .. } => self.position(),
            _ => self.bounding_box().center(),
        }
    }

    /// The color a status sampler reports for this item, if it has one.
    pub fn color(&self) -> Option<Color> {
        match &self.kind {
            DrawableKind::Rect { fill, .. } | DrawableKind::Ellipse { fill, .. } => Some(*fill),
            DrawableKind::Text { color, .. } => Some(*color),
            DrawableKind::Widget { .. } => None,
        }
    }

    /// Whether hit-testing should consider this item at all.
    pub fn is_interactive(&self) -> bool {
        self.visible && !self.locked
    }

    /// Dispatch a click at `p` (scene coordinates). No-op unless a handler
    /// was attached with [`Drawable::with_click_handler`].
    pub fn on_clicked(&self, p: Point) {
        if let Some(handler) = &self.on_click {
            handler(self, p);
        }
    }
}

fn box_contains(r: Rect, p: Point) -> bool {
    r.x0 <= p.x && p.x <= r.x1 && r.y0 <= p.y && p.y <= r.y1
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn hex_emits_alpha_only_when_translucent() {
        assert_eq!(DEFAULT_RECT_FILL.to_rgba8(), [100, 150, 200, 150]);
        assert_eq!(DEFAULT_RECT_FILL.to_hex(), "#6496C896");
        assert_eq!(Color::rgb8(30, 30, 30).to_hex(), "#1E1E1E");
        assert_eq!(Color::WHITE.to_hex(), "#FFFFFF");
    }

    #[test]
    fn ellipse_containment() {
        let e = Drawable::ellipse(-50.0, -25.0, 100.0, 50.0);
        assert!(e.contains_point(Point::new(0.0, 0.0)));
        assert!(e.contains_point(Point::new(49.0, 0.0)));
        assert!(!e.contains_point(Point::new(60.0, 0.0)));
        assert!(!e.contains_point(Point::new(40.0, 20.0)));
    }

    #[test]
    fn ellipse_anchor_is_top_left() {
        // Anchored at the origin, the center sits at (50, 25).
        let e = Drawable::ellipse(0.0, 0.0, 100.0, 50.0);
        assert!(e.contains_point(Point::new(50.0, 25.0)));
        assert!(!e.contains_point(Point::new(0.0, 0.0)));
        assert_eq!(e.center(), Point::new(50.0, 25.0));
    }

    #[test]
    fn degenerate_ellipse_contains_nothing() {
        let e = Drawable::ellipse(0.0, 0.0, 0.0, 50.0);
        assert!(!e.contains_point(Point::new(0.0, 25.0)));
    }

    #[test]
    fn rect_bounds_are_closed() {
        let r = Drawable::rect(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains_point(Point::new(0.0, 0.0)));
        assert!(r.contains_point(Point::new(10.0, 10.0)));
        assert!(!r.contains_point(Point::new(10.01, 5.0)));
    }

    #[test]
    fn text_uses_fixed_box() {
        let t = Drawable::text("a very long label that overflows", 10.0, 10.0);
        assert_eq!(t.bounding_box(), Rect::new(10.0, 10.0, 110.0, 30.0));
        assert!(t.contains_point(Point::new(109.0, 29.0)));
        assert!(!t.contains_point(Point::new(150.0, 15.0)));
        assert_eq!(t.center(), Point::new(10.0, 10.0));
    }

    #[test]
    fn widget_defaults_to_square_box() {
        let w = Drawable::widget(WidgetHandle(7), 5.0, 5.0, None);
        assert_eq!(w.bounding_box(), Rect::new(5.0, 5.0, 105.0, 105.0));
        assert_eq!(w.color(), None);

        let sized = Drawable::widget(WidgetHandle(8), 0.0, 0.0, Some(Size::new(40.0, 30.0)));
        assert!(sized.contains_point(Point::new(40.0, 30.0)));
        assert!(!sized.contains_point(Point::new(41.0, 30.0)));
    }

    #[test]
    fn near_anchor_radius() {
        let r = Drawable::rect(0.0, 0.0, 1.0, 1.0);
        assert!(r.near_anchor(Point::new(6.0, 7.0)));
        assert!(!r.near_anchor(Point::new(10.0, 0.0)));
    }

    #[test]
    fn builders_apply_to_matching_variants() {
        let r = Drawable::rect(0.0, 0.0, 1.0, 1.0)
            .with_color(Color::rgb8(1, 2, 3))
            .with_border(Color::rgba8(9, 9, 9, 10))
            .with_z(4)
            .with_locked(true);
        assert_eq!(r.color(), Some(Color::rgb8(1, 2, 3)));
        assert_eq!(r.z_index, 4);
        assert!(!r.is_interactive());
        match r.kind {
            DrawableKind::Rect { border, .. } => assert_eq!(border.to_rgba8(), [9, 9, 9, 255]),
            _ => panic!("expected Rect"),
        }

        let t = Drawable::text("hi", 0.0, 0.0).with_font_size(20.0);
        match t.kind {
            DrawableKind::Text { font_size, .. } => assert_eq!(font_size, 20.0),
            _ => panic!("expected Text"),
        }
    }

    #[test]
    fn click_handler_receives_point() {
        let hits = Rc::new(Cell::new(0));
        let seen = hits.clone();
        let r = Drawable::rect(0.0, 0.0, 10.0, 10.0).with_click_handler(move |_, p| {
            assert_eq!(p, Point::new(3.0, 4.0));
            seen.set(seen.get() + 1);
        });
        r.on_clicked(Point::new(3.0, 4.0));
        assert_eq!(hits.get(), 1);

        // Built-in variants without a handler ignore clicks.
        Drawable::ellipse(0.0, 0.0, 1.0, 1.0).on_clicked(Point::ZERO);
    }
}
