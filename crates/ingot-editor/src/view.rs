//! Viewport controller.
//!
//! `SceneView` owns one camera and one scene registry and interprets input
//! against them. Two interaction states:
//!
//! - **Idle**: pointer moves track the cursor; a left/right press hit-tests
//!   the scene and clicks the topmost interactive item.
//! - **Panning**: entered by a middle press, or a left press with Alt or
//!   Space held. Moves drag the camera; any pointer-up or focus loss ends it.
//!
//! Every state-changing event yields a `StatusSnapshot` in the returned
//! `ViewResponse`; the host forwards it to its status sink.

use crate::config::{ConfigError, ViewConfig};
use crate::input::{InputEvent, Modifiers, PointerButton};
use crate::shortcuts::{ShortcutMap, ViewAction};
use crate::status::StatusSnapshot;
use ingot_core::{Camera, DrawableId, Point, Rect, SceneRegistry, Size, Vec2};
use ingot_render::{CanvasTheme, Surface, ViewFrame, render_view};

#[derive(Debug, Clone, Copy, PartialEq)]
enum PanState {
    Idle,
    Panning {
        /// Screen position of the press that started the pan.
        anchor: Point,
        /// Camera position at that moment.
        camera_start: Point,
    },
}

/// Outcome of one input event or view command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewResponse {
    /// The view needs to be redrawn.
    pub repaint: bool,
    pub status: Option<StatusSnapshot>,
    /// Item that received `on_clicked`, if any.
    pub clicked: Option<DrawableId>,
}

impl ViewResponse {
    fn changed(status: StatusSnapshot) -> Self {
        Self {
            repaint: true,
            status: Some(status),
            clicked: None,
        }
    }

    fn repaint_only() -> Self {
        Self {
            repaint: true,
            ..Self::default()
        }
    }
}

#[derive(Debug)]
pub struct SceneView {
    camera: Camera,
    scene: SceneRegistry,
    pan: PanState,
    /// Last pointer position in screen space. `None` until the first
    /// pointer event.
    cursor: Option<Point>,
    scope_visible: bool,
    space_held: bool,
    config: ViewConfig,
    theme: CanvasTheme,
}

impl SceneView {
    pub fn new(size: Size) -> Self {
        Self::from_valid_config(ViewConfig::default(), size)
    }

    /// A view over a surface of `size` pixels. `config` is validated first.
    pub fn with_config(config: ViewConfig, size: Size) -> Result<Self, ConfigError> {
        Ok(Self::from_valid_config(config.validated()?, size))
    }

    pub(crate) fn from_valid_config(config: ViewConfig, size: Size) -> Self {
        let camera = Camera::new(size).with_zoom_limits(config.min_zoom, config.max_zoom);
        Self {
            camera,
            scene: SceneRegistry::new(),
            pan: PanState::Idle,
            cursor: None,
            scope_visible: config.scope_visible,
            space_held: false,
            theme: config.canvas_theme(),
            config,
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn scene(&self) -> &SceneRegistry {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneRegistry {
        &mut self.scene
    }

    /// Replace the scene registry, returning the old one.
    pub fn set_scene(&mut self, scene: SceneRegistry) -> SceneRegistry {
        std::mem::replace(&mut self.scene, scene)
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_position(&self) -> Point {
        self.camera.position()
    }

    pub fn zoom(&self) -> f64 {
        self.camera.zoom()
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.pan, PanState::Panning { .. })
    }

    pub fn scope_visible(&self) -> bool {
        self.scope_visible
    }

    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    pub fn theme(&self) -> &CanvasTheme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: CanvasTheme) {
        self.theme = theme;
    }

    pub fn viewport_size(&self) -> Size {
        self.camera.viewport()
    }

    /// Smallest surface the host should give this view.
    pub fn min_size(&self) -> Size {
        self.config.min_size()
    }

    pub fn visible_scene_rect(&self) -> Rect {
        self.camera.visible_scene_rect()
    }

    pub fn screen_to_scene(&self, screen: Point) -> Point {
        self.camera.screen_to_scene(screen)
    }

    pub fn scene_to_screen(&self, scene: Point) -> Point {
        self.camera.scene_to_screen(scene)
    }

    // ─── Commands ────────────────────────────────────────────────────────

    /// Set the zoom directly (clamped), keeping the camera position.
    pub fn set_zoom(&mut self, zoom: f64) -> ViewResponse {
        self.camera.set_zoom(zoom);
        ViewResponse::changed(self.status())
    }

    pub fn center_on(&mut self, x: f64, y: f64) -> ViewResponse {
        self.camera.center_on(Point::new(x, y));
        ViewResponse::changed(self.status())
    }

    /// Pan by a scene-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> ViewResponse {
        self.camera.pan_by(Vec2::new(dx, dy));
        ViewResponse::changed(self.status())
    }

    pub fn zoom_in(&mut self) -> ViewResponse {
        let anchor = self.zoom_anchor();
        self.camera.zoom_to_cursor(anchor, self.config.zoom_step);
        ViewResponse::changed(self.status())
    }

    pub fn zoom_out(&mut self) -> ViewResponse {
        let anchor = self.zoom_anchor();
        self.camera.zoom_to_cursor(anchor, 1.0 / self.config.zoom_step);
        ViewResponse::changed(self.status())
    }

    pub fn reset_zoom(&mut self) -> ViewResponse {
        self.camera.reset_zoom();
        ViewResponse::changed(self.status())
    }

    /// Flip crosshair visibility. Returns the new state.
    pub fn toggle_scope(&mut self) -> bool {
        self.scope_visible = !self.scope_visible;
        log::debug!("view: scope {}", if self.scope_visible { "on" } else { "off" });
        self.scope_visible
    }

    /// Track the host surface size. The camera always maps through the
    /// real size; `min_size` is only a hint for the host.
    pub fn resize(&mut self, size: Size) -> ViewResponse {
        if size == self.camera.viewport() {
            return ViewResponse::default();
        }
        self.camera.set_viewport(size);
        ViewResponse::repaint_only()
    }

    // ─── Input ───────────────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: &InputEvent) -> ViewResponse {
        match event {
            InputEvent::PointerDown {
                button,
                x,
                y,
                modifiers,
            } => self.pointer_down(*button, Point::new(*x, *y), *modifiers),
            InputEvent::PointerMove { x, y } => self.pointer_move(Point::new(*x, *y)),
            InputEvent::PointerUp { button, .. } => self.pointer_up(*button),
            InputEvent::Wheel { x, y, delta_y } => self.wheel(Point::new(*x, *y), *delta_y),
            InputEvent::KeyDown { key, modifiers } => self.key_down(key, *modifiers),
            InputEvent::KeyUp { key, .. } => {
                if key == " " {
                    self.space_held = false;
                }
                ViewResponse::default()
            }
            InputEvent::FocusLost => {
                self.space_held = false;
                if self.is_panning() {
                    log::debug!("view: focus lost, pan cancelled");
                    self.pan = PanState::Idle;
                }
                ViewResponse::default()
            }
        }
    }

    fn pointer_down(
        &mut self,
        button: PointerButton,
        pos: Point,
        modifiers: Modifiers,
    ) -> ViewResponse {
        if self.is_panning() {
            return ViewResponse::default();
        }
        let pans = match button {
            PointerButton::Middle => true,
            PointerButton::Left => modifiers.alt || self.space_held,
            PointerButton::Right => false,
            PointerButton::Other(_) => return ViewResponse::default(),
        };
        self.cursor = Some(pos);

        if pans {
            self.pan = PanState::Panning {
                anchor: pos,
                camera_start: self.camera.position(),
            };
            log::debug!("view: pan start at ({}, {})", pos.x, pos.y);
            return ViewResponse::changed(self.status());
        }

        let scene_pos = self.camera.screen_to_scene(pos);
        let clicked = self.scene.topmost_at(scene_pos).map(|item| {
            log::debug!("view: clicked {} at ({}, {})", item.id, scene_pos.x, scene_pos.y);
            item.on_clicked(scene_pos);
            item.id
        });
        ViewResponse {
            repaint: true,
            status: Some(self.status()),
            clicked,
        }
    }

    fn pointer_move(&mut self, pos: Point) -> ViewResponse {
        self.cursor = Some(pos);
        if let PanState::Panning { anchor, camera_start } = self.pan {
            let delta = (pos - anchor) / self.camera.zoom();
            self.camera.set_position(camera_start - delta);
        }
        ViewResponse::changed(self.status())
    }

    fn pointer_up(&mut self, button: PointerButton) -> ViewResponse {
        if let PanState::Panning { .. } = self.pan {
            log::debug!("view: pan end ({button:?} released)");
            self.pan = PanState::Idle;
        }
        ViewResponse::default()
    }

    fn wheel(&mut self, pos: Point, delta_y: f64) -> ViewResponse {
        self.cursor = Some(pos);
        let factor = if delta_y > 0.0 {
            self.config.zoom_step
        } else if delta_y < 0.0 {
            1.0 / self.config.zoom_step
        } else {
            return ViewResponse::default();
        };
        self.camera.zoom_to_cursor(pos, factor);
        ViewResponse::changed(self.status())
    }

    fn key_down(&mut self, key: &str, modifiers: Modifiers) -> ViewResponse {
        if key == " " {
            self.space_held = true;
            return ViewResponse::default();
        }
        let Some(action) = ShortcutMap::resolve(key, modifiers) else {
            log::trace!("view: unbound key {key:?}");
            return ViewResponse::default();
        };
        self.apply(action)
    }

    /// Apply a keyboard navigation action.
    pub fn apply(&mut self, action: ViewAction) -> ViewResponse {
        let step = self.camera.key_step(self.config.key_step);
        match action {
            ViewAction::PanLeft => self.camera.pan_by(Vec2::new(-step, 0.0)),
            ViewAction::PanRight => self.camera.pan_by(Vec2::new(step, 0.0)),
            ViewAction::PanUp => self.camera.pan_by(Vec2::new(0.0, -step)),
            ViewAction::PanDown => self.camera.pan_by(Vec2::new(0.0, step)),
            ViewAction::ZoomIn => return self.zoom_in(),
            ViewAction::ZoomOut => return self.zoom_out(),
            ViewAction::ResetZoom => return self.reset_zoom(),
            ViewAction::CenterOrigin => self.camera.center_on(Point::ZERO),
        }
        ViewResponse::changed(self.status())
    }

    /// Keyboard zoom anchors at the last cursor, or the viewport center
    /// before any pointer event.
    fn zoom_anchor(&self) -> Point {
        self.cursor.unwrap_or_else(|| self.camera.viewport_center())
    }

    // ─── Status & rendering ──────────────────────────────────────────────

    /// Current status: cursor in both spaces, sampled color and zoom.
    pub fn status(&self) -> StatusSnapshot {
        let screen_pos = self.cursor.unwrap_or(Point::ZERO);
        let scene_pos = self.camera.screen_to_scene(screen_pos);
        let color = self
            .scene
            .topmost_at(scene_pos)
            .and_then(|item| item.color())
            .unwrap_or(self.theme.neutral_sample);
        StatusSnapshot {
            screen_pos,
            scene_pos,
            color,
            zoom: self.camera.zoom(),
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        let frame = ViewFrame {
            camera: &self.camera,
            scene: &self.scene,
            cursor: self.cursor,
            scope_visible: self.scope_visible,
            theme: &self.theme,
        };
        render_view(surface, &frame);
    }
}
