//! Integration tests: scripted sessions through the workspace, from raw
//! input events to status snapshots and rendered frames.

use ingot_core::{Color, Drawable, Point, Size};
use ingot_editor::{
    ActionRegistry, InputEvent, Modifiers, PointerButton, StatusSnapshot, ViewConfig, Workspace,
};
use ingot_render::{DisplayList, DrawOp};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

const EPS: f64 = 1e-9;

fn showcase() -> (Workspace, Rc<RefCell<Vec<StatusSnapshot>>>) {
    let log: Rc<RefCell<Vec<StatusSnapshot>>> = Rc::default();
    let sink = Rc::clone(&log);
    let mut ws = Workspace::new(ViewConfig::default(), Size::new(800.0, 600.0))
        .unwrap()
        .with_status_sink(move |s: &StatusSnapshot| sink.borrow_mut().push(*s));
    let scene = ws.active_view_mut().scene_mut();
    scene.add(Drawable::rect(100.0, 100.0, 200.0, 100.0).with_id("panel").with_z(0));
    scene.add(Drawable::ellipse(350.0, 150.0, 150.0, 150.0).with_id("bubble").with_z(1));
    scene.add(
        Drawable::text("Sample Text", 200.0, 350.0)
            .with_color(Color::rgb8(255, 255, 0))
            .with_font_size(16.0)
            .with_z(2),
    );
    (ws, log)
}

#[test]
fn hover_reports_item_color_through_camera() {
    let (mut ws, log) = showcase();
    // Scene (400, 200) is inside the ellipse; viewport center (400, 300)
    // maps to the camera position (0, 0).
    let screen = ws.active_view().scene_to_screen(Point::new(400.0, 200.0));
    ws.handle_input(&InputEvent::pointer_move(screen.x, screen.y));

    let status = *log.borrow().last().unwrap();
    assert!((status.scene_pos - Point::new(400.0, 200.0)).hypot() < EPS);
    assert_eq!(status.color, ingot_core::DEFAULT_ELLIPSE_FILL);
}

#[test]
fn pan_then_zoom_keeps_cursor_anchored() {
    let (mut ws, _log) = showcase();
    ws.handle_input(
        &InputEvent::pointer_down(PointerButton::Left, 400.0, 300.0)
            .with_modifiers(Modifiers::ALT),
    );
    ws.handle_input(&InputEvent::pointer_move(300.0, 250.0));
    ws.handle_input(&InputEvent::pointer_up(PointerButton::Left, 300.0, 250.0));
    assert_eq!(ws.active_view().camera_position(), Point::new(100.0, 50.0));

    let cursor = Point::new(620.0, 90.0);
    let before = ws.active_view().screen_to_scene(cursor);
    for _ in 0..5 {
        ws.handle_input(&InputEvent::wheel(cursor.x, cursor.y, 1.0));
    }
    let after = ws.active_view().screen_to_scene(cursor);
    assert!((after - before).hypot() < 1e-6);
    assert!((ws.active_view().zoom() - 1.25f64.powi(5)).abs() < EPS);
}

#[test]
fn zoom_saturates_at_limits() {
    let (mut ws, log) = showcase();
    for _ in 0..200 {
        ws.handle_input(&InputEvent::wheel(10.0, 10.0, 1.0));
    }
    assert_eq!(ws.active_view().zoom(), 100.0);
    for _ in 0..400 {
        ws.handle_input(&InputEvent::wheel(10.0, 10.0, -1.0));
    }
    assert_eq!(ws.active_view().zoom(), 0.01);
    assert_eq!(log.borrow().last().map(|s| s.zoom), Some(0.01));
}

#[test]
fn command_shortcuts_route_through_registry() {
    let (mut ws, _log) = showcase();
    let registry = ActionRegistry::with_defaults();

    let press = |ws: &mut Workspace, key: &str| {
        if let Some((id, _)) = registry.resolve_key(key, Modifiers::CTRL) {
            let command = registry.command_for(id).unwrap();
            ws.execute(&command);
        }
    };
    press(&mut ws, "t");
    assert!(!ws.active_view().scope_visible());
    press(&mut ws, "n");
    assert_eq!(ws.len(), 2);
    assert_eq!(ws.active_index(), 1);
    assert!(ws.active_view().scene().is_empty());
    press(&mut ws, "+");
    assert!((ws.active_view().zoom() - 1.25).abs() < EPS);
    assert_eq!(ws.view(0).map(|v| v.zoom()), Some(1.0));
}

#[test]
fn rendered_frame_follows_scene_and_scope() {
    let (mut ws, _log) = showcase();
    ws.handle_input(&InputEvent::pointer_move(10.0, 10.0));
    let mut list = DisplayList::new(800.0, 600.0);
    ws.render_active(&mut list);

    let texts: Vec<&str> = list
        .ops()
        .iter()
        .filter_map(|r| match &r.op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(texts, vec!["Sample Text"]);
    // Background + 2 shapes × 2 + text + origin (3) + scope (2).
    assert_eq!(list.ops().len(), 1 + 4 + 1 + 3 + 2);
    assert!(list.is_balanced());
}
