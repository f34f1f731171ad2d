//! The single owned camera state and the operations every mutation shares.
//!
//! `ViewState` bundles the camera with what constrains it (viewport, floor
//! bounds, config). Gestures and animation receive it by `&mut` and must end
//! each mutation with [`ViewState::clamp`].

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use crate::bounds::{self, Bounds};
use crate::camera::{self, Camera, Point, Viewport};
use crate::config::ViewportConfig;

#[derive(Debug, Clone)]
pub struct ViewState {
    pub camera: Camera,
    pub viewport: Viewport,
    bounds: Bounds,
    pub config: ViewportConfig,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(ViewportConfig::default())
    }
}

impl ViewState {
    #[must_use]
    pub fn new(config: ViewportConfig) -> Self {
        let bounds = Bounds::fallback();
        let center = bounds.center();
        Self { camera: Camera::new(center.x, center.y, 1.0), viewport: Viewport::default(), bounds, config }
    }

    /// Floor bounds before grid padding.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Replace floor bounds; invalid bounds fall back to the default rectangle.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds.or_fallback();
    }

    /// Floor bounds padded by the grid margin; the clamp target.
    #[must_use]
    pub fn grid_bounds(&self) -> Bounds {
        self.bounds.padded(self.config.grid_margin, self.config.grid_margin)
    }

    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        camera::screen_to_world(screen, &self.camera, &self.viewport)
    }

    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        camera::world_to_screen(world, &self.camera, &self.viewport)
    }

    /// Restore the camera invariants: zoom in range, view inside the padded floor.
    pub fn clamp(&mut self) {
        self.camera.zoom = if self.camera.zoom.is_finite() {
            self.config.clamp_zoom(self.camera.zoom)
        } else {
            self.config.clamp_zoom(1.0)
        };
        let grid = self.grid_bounds();
        bounds::clamp_center(&mut self.camera, &self.viewport, &grid);
    }

    /// Set zoom and move the camera so `world` projects to `screen`.
    ///
    /// Does not clamp; callers clamp once they are done mutating.
    pub fn zoom_about(&mut self, screen: Point, world: Point, zoom: f64) {
        self.camera.zoom = self.config.clamp_zoom(zoom);
        let c = self.viewport.center();
        self.camera.x = world.x - (screen.x - c.x) / self.camera.zoom;
        self.camera.y = world.y - (screen.y - c.y) / self.camera.zoom;
    }

    /// Move the camera opposite to a screen-space drag delta.
    pub fn pan_by_screen(&mut self, dx: f64, dy: f64) {
        self.camera.x -= dx / self.camera.zoom;
        self.camera.y -= dy / self.camera.zoom;
    }
}
