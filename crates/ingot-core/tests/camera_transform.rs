//! Integration tests: camera transform invariants.
//!
//! Sweeps camera positions, zoom levels and screen points to check that the
//! screen ↔ scene mapping round-trips and that zoom-to-cursor pins the scene
//! point under the cursor.

use ingot_core::{Camera, MAX_ZOOM, MIN_ZOOM, Point, Size, ZOOM_STEP};

const TOL: f64 = 1e-9;

fn assert_close(a: Point, b: Point, what: &str) {
    let scale = 1.0 + a.x.abs().max(a.y.abs());
    assert!(
        (a.x - b.x).abs() <= TOL * scale && (a.y - b.y).abs() <= TOL * scale,
        "{what}: {a:?} != {b:?}"
    );
}

fn cameras() -> Vec<Camera> {
    let mut out = Vec::new();
    for &zoom in &[MIN_ZOOM, 0.1, 0.8, 1.0, 1.25, 7.5, MAX_ZOOM] {
        for &pos in &[
            Point::ZERO,
            Point::new(350.0, -120.0),
            Point::new(-9999.5, 4321.25),
        ] {
            let mut cam = Camera::new(Size::new(800.0, 600.0));
            cam.set_zoom(zoom);
            cam.center_on(pos);
            out.push(cam);
        }
    }
    out
}

const SCREEN_POINTS: [Point; 5] = [
    Point::new(0.0, 0.0),
    Point::new(400.0, 300.0),
    Point::new(799.0, 1.0),
    Point::new(13.5, 577.25),
    Point::new(-40.0, 900.0),
];

#[test]
fn screen_scene_roundtrip() {
    for cam in cameras() {
        for p in SCREEN_POINTS {
            let back = cam.scene_to_screen(cam.screen_to_scene(p));
            assert_close(back, p, "screen→scene→screen");
        }
    }
}

#[test]
fn zoom_to_cursor_pins_scene_point() {
    for mut cam in cameras() {
        for p in SCREEN_POINTS {
            for factor in [ZOOM_STEP, 1.0 / ZOOM_STEP, 3.0, 0.2] {
                let before = cam.screen_to_scene(p);
                cam.zoom_to_cursor(p, factor);
                assert_close(cam.screen_to_scene(p), before, "scene under cursor");
            }
        }
    }
}

#[test]
fn zoom_to_cursor_pins_point_at_limits() {
    let mut cam = Camera::new(Size::new(400.0, 300.0));
    cam.set_zoom(MAX_ZOOM);
    let cursor = Point::new(37.0, 250.0);
    let before = cam.screen_to_scene(cursor);
    cam.zoom_to_cursor(cursor, ZOOM_STEP);
    assert_eq!(cam.zoom(), MAX_ZOOM);
    assert_close(cam.screen_to_scene(cursor), before, "saturated zoom-in");
}

#[test]
fn viewport_center_maps_to_camera() {
    let cam = Camera::new(Size::new(400.0, 300.0));
    assert_eq!(cam.screen_to_scene(Point::new(200.0, 150.0)), Point::new(0.0, 0.0));
}
