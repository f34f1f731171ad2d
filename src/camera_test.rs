#![allow(clippy::float_cmp)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn viewport() -> Viewport {
    Viewport::new(800.0, 600.0, 1.0)
}

// =============================================================
// Point
// =============================================================

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_distance_is_euclidean() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(3.0, 4.0);
    assert!(approx_eq(a.distance(b), 5.0));
    assert!(approx_eq(b.distance(a), 5.0));
}

#[test]
fn point_midpoint() {
    let m = Point::new(-10.0, 4.0).midpoint(Point::new(30.0, 8.0));
    assert!(point_approx_eq(m, Point::new(10.0, 6.0)));
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn camera_default_is_origin_at_zoom_one() {
    let cam = Camera::default();
    assert_eq!(cam.x, 0.0);
    assert_eq!(cam.y, 0.0);
    assert_eq!(cam.zoom, 1.0);
}

#[test]
fn viewport_default_is_empty_with_unit_ratio() {
    let vp = Viewport::default();
    assert_eq!(vp.width, 0.0);
    assert_eq!(vp.height, 0.0);
    assert_eq!(vp.pixel_ratio, 1.0);
}

#[test]
fn viewport_center_is_half_size() {
    assert_eq!(viewport().center(), Point::new(400.0, 300.0));
}

// =============================================================
// screen_to_world / world_to_screen
// =============================================================

#[test]
fn world_to_screen_entity_scenario() {
    let cam = Camera::new(0.0, 0.0, 1.0);
    let screen = world_to_screen(Point::new(100.0, 50.0), &cam, &viewport());
    assert!(point_approx_eq(screen, Point::new(500.0, 350.0)));
}

#[test]
fn screen_to_world_entity_scenario() {
    let cam = Camera::new(0.0, 0.0, 1.0);
    let world = screen_to_world(Point::new(500.0, 350.0), &cam, &viewport());
    assert!(point_approx_eq(world, Point::new(100.0, 50.0)));
}

#[test]
fn viewport_center_maps_to_camera_center() {
    let cam = Camera::new(1240.0, 860.0, 2.5);
    let world = cam.screen_to_world(Point::new(400.0, 300.0), &viewport());
    assert!(point_approx_eq(world, Point::new(1240.0, 860.0)));
}

#[test]
fn screen_to_world_scales_by_inverse_zoom() {
    let cam = Camera::new(0.0, 0.0, 4.0);
    // 40px right of center at zoom 4 is 10 world units.
    let world = cam.screen_to_world(Point::new(440.0, 380.0), &viewport());
    assert!(point_approx_eq(world, Point::new(10.0, 20.0)));
}

#[test]
fn world_to_screen_scales_by_zoom() {
    let cam = Camera::new(100.0, 100.0, 0.5);
    let screen = cam.world_to_screen(Point::new(300.0, 0.0), &viewport());
    assert!(point_approx_eq(screen, Point::new(500.0, 250.0)));
}

#[test]
fn method_and_free_function_agree() {
    let cam = Camera::new(12.0, -7.0, 1.7);
    let p = Point::new(33.0, 44.0);
    assert_eq!(cam.world_to_screen(p, &viewport()), world_to_screen(p, &cam, &viewport()));
    assert_eq!(cam.screen_to_world(p, &viewport()), screen_to_world(p, &cam, &viewport()));
}

// =============================================================
// Round trip
// =============================================================

#[test]
fn round_trip_random_cameras_and_viewports() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..500 {
        let cam = Camera::new(
            rng.random_range(-5000.0..5000.0),
            rng.random_range(-5000.0..5000.0),
            rng.random_range(0.35..4.5),
        );
        let vp = Viewport::new(rng.random_range(1.0..4000.0), rng.random_range(1.0..4000.0), 1.0);
        let p = Point::new(rng.random_range(-2000.0..6000.0), rng.random_range(-2000.0..6000.0));

        let back = world_to_screen(screen_to_world(p, &cam, &vp), &cam, &vp);
        assert!((back.x - p.x).abs() < 1e-6, "x drifted: {} vs {}", back.x, p.x);
        assert!((back.y - p.y).abs() < 1e-6, "y drifted: {} vs {}", back.y, p.y);
    }
}

#[test]
fn round_trip_world_first() {
    let cam = Camera::new(800.0, 600.0, 3.3);
    let vp = Viewport::new(1280.0, 720.0, 2.0);
    let w = Point::new(1680.0, 980.0);
    let back = screen_to_world(world_to_screen(w, &cam, &vp), &cam, &vp);
    assert!((back.x - w.x).abs() < 1e-9);
    assert!((back.y - w.y).abs() < 1e-9);
}
