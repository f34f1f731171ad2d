#![allow(clippy::float_cmp)]

use super::*;

fn view() -> ViewState {
    let mut v = ViewState::default();
    v.viewport = Viewport::new(800.0, 600.0, 1.0);
    v
}

#[test]
fn new_view_centres_on_fallback_bounds() {
    let v = ViewState::default();
    assert_eq!(v.bounds(), Bounds::fallback());
    assert_eq!(v.camera, Camera::new(1000.0, 600.0, 1.0));
}

#[test]
fn set_bounds_rejects_invalid() {
    let mut v = view();
    v.set_bounds(Bounds::new(5.0, 5.0, 5.0, 5.0));
    assert_eq!(v.bounds(), Bounds::fallback());
    v.set_bounds(Bounds::new(-10.0, -10.0, 10.0, 10.0));
    assert_eq!(v.bounds(), Bounds::new(-10.0, -10.0, 10.0, 10.0));
}

#[test]
fn grid_bounds_pads_by_margin() {
    let v = view();
    assert_eq!(v.grid_bounds(), Bounds::new(-160.0, -160.0, 2160.0, 1360.0));
}

#[test]
fn clamp_forces_zoom_into_range() {
    let mut v = view();
    v.camera.zoom = 50.0;
    v.clamp();
    assert_eq!(v.camera.zoom, 4.5);
    v.camera.zoom = 0.0001;
    v.clamp();
    assert_eq!(v.camera.zoom, 0.35);
}

#[test]
fn clamp_recovers_from_nan_zoom() {
    let mut v = view();
    v.camera.zoom = f64::NAN;
    v.clamp();
    assert_eq!(v.camera.zoom, 1.0);
}

#[test]
fn clamp_keeps_view_inside_grid() {
    let mut v = view();
    v.camera.x = -9999.0;
    v.camera.y = 9999.0;
    v.clamp();
    // grid [-160, 2160] x [-160, 1360], half extents 400 x 300
    assert_eq!(v.camera.x, 240.0);
    assert_eq!(v.camera.y, 1060.0);
}

#[test]
fn zoom_about_keeps_world_point_under_screen_point() {
    let mut v = view();
    let screen = Point::new(600.0, 300.0);
    let world = v.screen_to_world(screen);
    v.zoom_about(screen, world, 2.0);
    let back = v.world_to_screen(world);
    assert!((back.x - 600.0).abs() < 1e-9);
    assert!((back.y - 300.0).abs() < 1e-9);
    assert_eq!(v.camera.zoom, 2.0);
}

#[test]
fn zoom_about_clamps_zoom() {
    let mut v = view();
    let p = Point::new(0.0, 0.0);
    v.zoom_about(p, p, 100.0);
    assert_eq!(v.camera.zoom, 4.5);
}

#[test]
fn pan_by_screen_moves_opposite_scaled() {
    let mut v = view();
    v.camera.zoom = 2.0;
    let before = v.camera;
    v.pan_by_screen(10.0, -20.0);
    assert_eq!(v.camera.x, before.x - 5.0);
    assert_eq!(v.camera.y, before.y + 10.0);
}
