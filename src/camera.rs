#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Point halfway between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Point) -> Point {
        Point { x: (self.x + other.x) * 0.5, y: (self.y + other.y) * 0.5 }
    }
}

/// Camera over the floor map.
///
/// `x` / `y` are the world-space point shown at the viewport center.
/// `zoom` is screen pixels per world unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    #[must_use]
    pub fn new(x: f64, y: f64, zoom: f64) -> Self {
        Self { x, y, zoom }
    }

    /// World-space center of view.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point, viewport: &Viewport) -> Point {
        screen_to_world(screen, self, viewport)
    }

    /// Convert a world-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point, viewport: &Viewport) -> Point {
        world_to_screen(world, self, viewport)
    }
}

/// Drawing surface dimensions in CSS pixels plus the device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 0.0, height: 0.0, pixel_ratio: 1.0 }
    }
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64, pixel_ratio: f64) -> Self {
        Self { width, height, pixel_ratio }
    }

    /// Screen-space center of the surface.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }
}

/// `world = (screen - viewport_center) / zoom + camera_center`
#[must_use]
pub fn screen_to_world(screen: Point, camera: &Camera, viewport: &Viewport) -> Point {
    let c = viewport.center();
    Point { x: (screen.x - c.x) / camera.zoom + camera.x, y: (screen.y - c.y) / camera.zoom + camera.y }
}

/// `screen = (world - camera_center) * zoom + viewport_center`
#[must_use]
pub fn world_to_screen(world: Point, camera: &Camera, viewport: &Viewport) -> Point {
    let c = viewport.center();
    Point { x: (world.x - camera.x) * camera.zoom + c.x, y: (world.y - camera.y) * camera.zoom + c.y }
}
