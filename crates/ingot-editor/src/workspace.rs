//! Tabbed workspace.
//!
//! Each tab owns an independent `SceneView` (camera + scene registry).
//! Input is routed to the active tab; view commands are forwarded to it;
//! status from every tab goes to the workspace's single sink.

use crate::config::{ConfigError, ViewConfig};
use crate::input::InputEvent;
use crate::status::StatusSink;
use crate::view::{SceneView, ViewResponse};
use ingot_core::Size;
use ingot_render::{CanvasTheme, Surface};
use serde::{Deserialize, Serialize};

/// Commands the host's menus and toolbars send to the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkspaceCommand {
    ZoomIn,
    ZoomOut,
    ResetZoom,
    ToggleScope,
    NewTab,
    CloseTab(usize),
    SetTheme(String),
}

#[derive(Debug)]
pub struct Tab {
    pub title: String,
    pub view: SceneView,
}

pub struct Workspace {
    tabs: Vec<Tab>,
    active: usize,
    config: ViewConfig,
    viewport: Size,
    sink: Option<Box<dyn StatusSink>>,
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace")
            .field("tabs", &self.tabs)
            .field("active", &self.active)
            .field("viewport", &self.viewport)
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}

impl Workspace {
    /// A workspace with one empty tab open. `config` is validated once
    /// here and shared by every tab.
    pub fn new(config: ViewConfig, viewport: Size) -> Result<Self, ConfigError> {
        let mut ws = Self {
            tabs: Vec::new(),
            active: 0,
            config: config.validated()?,
            viewport,
            sink: None,
        };
        ws.new_tab();
        Ok(ws)
    }

    pub fn with_status_sink(mut self, sink: impl StatusSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn set_status_sink(&mut self, sink: impl StatusSink + 'static) {
        self.sink = Some(Box::new(sink));
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Always false: the last tab cannot be closed.
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn set_active(&mut self, index: usize) -> bool {
        if index >= self.tabs.len() {
            log::warn!("workspace: no tab at index {index}");
            return false;
        }
        self.active = index;
        true
    }

    pub fn active_view(&self) -> &SceneView {
        &self.tabs[self.active].view
    }

    pub fn active_view_mut(&mut self) -> &mut SceneView {
        &mut self.tabs[self.active].view
    }

    pub fn view(&self, index: usize) -> Option<&SceneView> {
        self.tabs.get(index).map(|t| &t.view)
    }

    pub fn view_mut(&mut self, index: usize) -> Option<&mut SceneView> {
        self.tabs.get_mut(index).map(|t| &mut t.view)
    }

    /// Open a new tab titled "Tab N", make it active and center it on the
    /// scene origin. Returns its index.
    pub fn new_tab(&mut self) -> usize {
        let title = format!("Tab {}", self.tabs.len() + 1);
        let mut view = SceneView::from_valid_config(self.config.clone(), self.viewport);
        view.center_on(0.0, 0.0);
        log::debug!("workspace: opened {title:?}");
        self.tabs.push(Tab { title, view });
        self.active = self.tabs.len() - 1;
        self.active
    }

    /// Close the tab at `index`. Refuses to close the last tab.
    pub fn close_tab(&mut self, index: usize) -> bool {
        if self.tabs.len() <= 1 {
            log::warn!("workspace: cannot close the last tab");
            return false;
        }
        if index >= self.tabs.len() {
            log::warn!("workspace: no tab at index {index}");
            return false;
        }
        let tab = self.tabs.remove(index);
        log::debug!("workspace: closed {:?}", tab.title);
        if index < self.active || self.active >= self.tabs.len() {
            self.active -= 1;
        }
        true
    }

    /// Resize every tab's viewport.
    pub fn resize(&mut self, size: Size) {
        self.viewport = size;
        for tab in &mut self.tabs {
            tab.view.resize(size);
        }
    }

    /// Route an input event to the active tab.
    pub fn handle_input(&mut self, event: &InputEvent) -> ViewResponse {
        let response = self.active_view_mut().handle_input(event);
        self.publish(&response);
        response
    }

    pub fn execute(&mut self, command: &WorkspaceCommand) -> ViewResponse {
        let response = match command {
            WorkspaceCommand::ZoomIn => self.active_view_mut().zoom_in(),
            WorkspaceCommand::ZoomOut => self.active_view_mut().zoom_out(),
            WorkspaceCommand::ResetZoom => self.active_view_mut().reset_zoom(),
            WorkspaceCommand::ToggleScope => {
                self.active_view_mut().toggle_scope();
                ViewResponse {
                    repaint: true,
                    ..ViewResponse::default()
                }
            }
            WorkspaceCommand::NewTab => {
                self.new_tab();
                ViewResponse {
                    repaint: true,
                    ..ViewResponse::default()
                }
            }
            WorkspaceCommand::CloseTab(index) => ViewResponse {
                repaint: self.close_tab(*index),
                ..ViewResponse::default()
            },
            WorkspaceCommand::SetTheme(name) => ViewResponse {
                repaint: self.set_theme(name),
                ..ViewResponse::default()
            },
        };
        self.publish(&response);
        response
    }

    /// Switch every tab to the named canvas theme.
    pub fn set_theme(&mut self, name: &str) -> bool {
        let Some(theme) = CanvasTheme::by_name(name) else {
            log::warn!("workspace: unknown theme {name:?}");
            return false;
        };
        for tab in &mut self.tabs {
            tab.view.set_theme(theme.clone());
        }
        self.config.theme = name.to_string();
        log::debug!("workspace: theme set to {name}");
        true
    }

    pub fn render_active(&self, surface: &mut dyn Surface) {
        self.active_view().render(surface);
    }

    fn publish(&mut self, response: &ViewResponse) {
        if let (Some(sink), Some(status)) = (self.sink.as_mut(), response.status.as_ref()) {
            sink.publish(status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerButton;
    use crate::status::StatusSnapshot;
    use ingot_core::Point;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn workspace() -> Workspace {
        Workspace::new(ViewConfig::default(), Size::new(400.0, 300.0)).unwrap()
    }

    fn titles(ws: &Workspace) -> Vec<&str> {
        ws.tabs().iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn starts_with_one_tab() {
        let ws = workspace();
        assert_eq!(titles(&ws), vec!["Tab 1"]);
        assert_eq!(ws.active_index(), 0);
        assert_eq!(ws.active_view().camera_position(), Point::ZERO);
    }

    #[test]
    fn new_tab_becomes_active() {
        let mut ws = workspace();
        assert_eq!(ws.new_tab(), 1);
        assert_eq!(ws.active_index(), 1);
        assert_eq!(titles(&ws), vec!["Tab 1", "Tab 2"]);
    }

    #[test]
    fn last_tab_cannot_be_closed() {
        let mut ws = workspace();
        assert!(!ws.close_tab(0));
        assert_eq!(ws.len(), 1);
    }

    #[test]
    fn closing_keeps_active_index_valid() {
        let mut ws = workspace();
        ws.new_tab();
        ws.new_tab();
        assert!(ws.close_tab(2));
        assert_eq!(ws.active_index(), 1);
        assert!(ws.close_tab(0));
        assert_eq!(ws.active_index(), 0);
        assert_eq!(titles(&ws), vec!["Tab 2"]);
        assert!(!ws.close_tab(5));
    }

    #[test]
    fn commands_affect_only_active_tab() {
        let mut ws = workspace();
        ws.new_tab();
        ws.execute(&WorkspaceCommand::ZoomIn);
        assert!((ws.active_view().zoom() - 1.25).abs() < 1e-9);
        assert_eq!(ws.view(0).map(|v| v.zoom()), Some(1.0));

        ws.execute(&WorkspaceCommand::ToggleScope);
        assert!(!ws.active_view().scope_visible());
        assert_eq!(ws.view(0).map(|v| v.scope_visible()), Some(true));

        ws.execute(&WorkspaceCommand::ResetZoom);
        assert!((ws.active_view().zoom() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn tabs_have_independent_cameras() {
        let mut ws = workspace();
        ws.new_tab();
        ws.handle_input(&InputEvent::pointer_down(PointerButton::Middle, 0.0, 0.0));
        ws.handle_input(&InputEvent::pointer_move(-50.0, 0.0));
        assert_eq!(ws.active_view().camera_position(), Point::new(50.0, 0.0));
        assert_eq!(ws.view(0).map(|v| v.camera_position()), Some(Point::ZERO));
    }

    #[test]
    fn status_goes_to_sink() {
        let log: Rc<RefCell<Vec<StatusSnapshot>>> = Rc::default();
        let sink_log = Rc::clone(&log);
        let mut ws = workspace()
            .with_status_sink(move |s: &StatusSnapshot| sink_log.borrow_mut().push(*s));
        ws.handle_input(&InputEvent::pointer_move(10.0, 20.0));
        ws.execute(&WorkspaceCommand::ZoomOut);
        ws.execute(&WorkspaceCommand::ToggleScope);
        let log = log.borrow();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].screen_pos, Point::new(10.0, 20.0));
        assert!((log[1].zoom - 0.8).abs() < 1e-9);
    }

    #[test]
    fn theme_applies_to_all_tabs() {
        let mut ws = workspace();
        ws.new_tab();
        assert!(ws.execute(&WorkspaceCommand::SetTheme("light".into())).repaint);
        assert!(ws.tabs().iter().all(|t| t.view.theme().name == "light"));
        assert_eq!(ws.config().theme, "light");
        assert!(!ws.set_theme("neon"));
        // New tabs pick up the current theme.
        ws.new_tab();
        assert_eq!(ws.active_view().theme().name, "light");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ViewConfig {
            zoom_step: 1.0,
            ..ViewConfig::default()
        };
        assert!(matches!(
            Workspace::new(config, Size::new(400.0, 300.0)),
            Err(ConfigError::InvalidZoomStep(_))
        ));
    }

    #[test]
    fn commands_deserialize_from_json() {
        let json = r#"["zoom_in", {"close_tab": 2}, {"set_theme": "dark"}]"#;
        let cmds: Vec<WorkspaceCommand> = serde_json::from_str(json).unwrap();
        assert_eq!(
            cmds,
            vec![
                WorkspaceCommand::ZoomIn,
                WorkspaceCommand::CloseTab(2),
                WorkspaceCommand::SetTheme("dark".into()),
            ]
        );
    }
}
