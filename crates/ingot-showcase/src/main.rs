//! Ingot showcase.
//!
//! Builds a two-tab workspace with sample content, replays a scripted input
//! session against it (pan, zoom, keyboard navigation, menu shortcuts) and
//! writes the final frame of each tab as SVG.
//!
//! ```text
//! RUST_LOG=debug ingot-showcase [out.svg]
//! ```
//!
//! Tab N is written next to the given path as `<stem>-N.svg`.

use ingot_core::{Color, Drawable, SceneRegistry, Size};
use ingot_editor::{
    ActionRegistry, InputEvent, Modifiers, PointerButton, StatusSnapshot, ViewConfig, Workspace,
};
use ingot_render::SvgSurface;
use std::error::Error;
use std::path::{Path, PathBuf};

const VIEWPORT: Size = Size::new(800.0, 600.0);

const MENUS: &str = r#"[
    { "title": "File", "items": [
        { "id": "file.new_tab", "name": "New Tab", "shortcut": "Ctrl+N", "command": "new_tab" },
        { "separator": true },
        { "id": "file.close_first", "name": "Close First Tab", "command": { "close_tab": 0 } }
    ]},
    { "title": "View", "items": [
        { "id": "view.zoom_in", "name": "Zoom In", "shortcut": "Ctrl++", "command": "zoom_in" },
        { "id": "view.zoom_out", "name": "Zoom Out", "shortcut": "Ctrl+-", "command": "zoom_out" },
        { "id": "view.reset_zoom", "name": "Reset Zoom", "shortcut": "Ctrl+0", "command": "reset_zoom" },
        { "separator": true },
        { "id": "view.toggle_scope", "name": "Toggle Scope", "shortcut": "Ctrl+T", "command": "toggle_scope" },
        { "id": "view.theme_light", "name": "Light Theme", "command": { "set_theme": "light" } }
    ]}
]"#;

fn first_tab(scene: &mut SceneRegistry) {
    scene.add(Drawable::rect(100.0, 100.0, 200.0, 100.0).with_z(0));
    scene.add(Drawable::ellipse(350.0, 150.0, 150.0, 150.0).with_z(1));
    scene.add(
        Drawable::text("Sample Text", 200.0, 350.0)
            .with_color(Color::rgb8(255, 255, 0))
            .with_font_size(16.0)
            .with_z(2),
    );
    scene.add(
        Drawable::rect(500.0, 300.0, 120.0, 80.0)
            .with_color(Color::rgba8(50, 200, 100, 150))
            .with_z(3)
            .with_click_handler(|item, p| {
                log::info!("{} clicked at ({:.1}, {:.1})", item.id, p.x, p.y)
            }),
    );
}

fn second_tab(scene: &mut SceneRegistry) {
    scene.add(
        Drawable::rect(-50.0, -50.0, 400.0, 300.0)
            .with_color(Color::rgba8(150, 100, 200, 120))
            .with_z(0),
    );
    scene.add(
        Drawable::ellipse(200.0, 100.0, 200.0, 200.0)
            .with_color(Color::rgba8(255, 165, 0, 150))
            .with_z(1),
    );
    scene.add(
        Drawable::text("Second Tab", 100.0, 250.0)
            .with_color(Color::rgb8(0, 255, 255))
            .with_font_size(20.0)
            .with_z(2),
    );
}

/// What the session does, step by step.
fn script() -> Vec<InputEvent> {
    vec![
        // Hover the ellipse, then pan with the middle button.
        InputEvent::pointer_move(825.0, 525.0),
        InputEvent::pointer_down(PointerButton::Middle, 400.0, 300.0),
        InputEvent::pointer_move(300.0, 200.0),
        InputEvent::pointer_up(PointerButton::Middle, 300.0, 200.0),
        // Zoom in twice around the green rectangle.
        InputEvent::wheel(660.0, 540.0, 120.0),
        InputEvent::wheel(660.0, 540.0, 120.0),
        // Click it.
        InputEvent::pointer_down(PointerButton::Left, 660.0, 540.0),
        InputEvent::pointer_up(PointerButton::Left, 660.0, 540.0),
        // Space + left drag pans too.
        InputEvent::key_down(" "),
        InputEvent::pointer_down(PointerButton::Left, 400.0, 300.0),
        InputEvent::pointer_move(450.0, 300.0),
        InputEvent::pointer_up(PointerButton::Left, 450.0, 300.0),
        InputEvent::key_up(" "),
        // Keyboard navigation.
        InputEvent::key_down("ArrowRight"),
        InputEvent::key_down("ArrowDown"),
        InputEvent::key_down("-"),
        InputEvent::key_down("0"),
        // Menu shortcuts.
        InputEvent::key_down("t").with_modifiers(Modifiers::CTRL),
        InputEvent::key_down("t").with_modifiers(Modifiers::CTRL),
        InputEvent::key_down("h"),
    ]
}

fn tab_path(base: &Path, index: usize) -> PathBuf {
    let stem = base.file_stem().and_then(|s| s.to_str()).unwrap_or("showcase");
    base.with_file_name(format!("{stem}-{}.svg", index + 1))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let out = PathBuf::from(std::env::args().nth(1).unwrap_or_else(|| "showcase.svg".to_string()));

    let mut actions = ActionRegistry::with_defaults();
    let menus = actions.build_menus(MENUS)?;
    log::info!(
        "menus: {}",
        menus.iter().map(|m| m.title.as_str()).collect::<Vec<_>>().join(", ")
    );

    // Size the surface the way a host sizes its window: never below the
    // view's minimum.
    let config = ViewConfig::default();
    let viewport = config.clamp_size(VIEWPORT);
    let mut ws = Workspace::new(config, viewport)?
        .with_status_sink(|s: &StatusSnapshot| log::info!("{s}"));
    first_tab(ws.active_view_mut().scene_mut());
    ws.new_tab();
    second_tab(ws.active_view_mut().scene_mut());
    ws.set_active(0);

    for event in script() {
        if let InputEvent::KeyDown { key, modifiers } = &event
            && modifiers.command()
        {
            match actions.resolve_key(key, *modifiers) {
                Some((id, _)) => {
                    let command = actions.command_for(id)?;
                    log::info!("shortcut {key:?} -> {id}");
                    ws.execute(&command);
                }
                None => log::warn!("unbound shortcut {key:?}"),
            }
            continue;
        }
        let response = ws.handle_input(&event);
        if let Some(id) = response.clicked {
            log::info!("click dispatched to {id}");
        }
    }

    // Second tab: zoom out through the menu command, then switch theme.
    ws.set_active(1);
    ws.execute(&actions.command_for("view.zoom_out")?);
    ws.execute(&actions.command_for("view.theme_light")?);

    for index in 0..ws.len() {
        ws.set_active(index);
        let mut svg = SvgSurface::new(viewport.width, viewport.height);
        ws.render_active(&mut svg);
        let path = tab_path(&out, index);
        std::fs::write(&path, svg.finish())?;
        log::info!("wrote {} ({})", path.display(), ws.tabs()[index].title);
    }
    Ok(())
}
