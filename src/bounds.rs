//! Floor extent and the camera clamp that keeps the floor filling the view.
//!
//! The floor [`Bounds`] come from outside (derived from entity extents, or a
//! fixed fallback). Before clamping they are padded by the grid margin; the
//! clamp then limits the camera center per axis so the visible rectangle never
//! leaves the padded floor. When the view is wider than the padded floor on an
//! axis (zoomed out past the map), the camera is centered on that axis instead.

#[cfg(test)]
#[path = "bounds_test.rs"]
mod bounds_test;

use serde::{Deserialize, Serialize};

use crate::camera::{Camera, Point, Viewport};
use crate::consts::{FALLBACK_MAX_X, FALLBACK_MAX_Y, FALLBACK_MIN_X, FALLBACK_MIN_Y};

/// Axis-aligned world-space rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::fallback()
    }
}

impl Bounds {
    #[must_use]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Fixed floor rectangle used when no data is available.
    #[must_use]
    pub fn fallback() -> Self {
        Self::new(FALLBACK_MIN_X, FALLBACK_MIN_Y, FALLBACK_MAX_X, FALLBACK_MAX_Y)
    }

    /// Extent of `points` grown by `margin_x` / `margin_y` on each side.
    ///
    /// Returns `None` when `points` is empty.
    pub fn around<I>(points: I, margin_x: f64, margin_y: f64) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut b = Self::new(first.x, first.y, first.x, first.y);
        for p in iter {
            b.min_x = b.min_x.min(p.x);
            b.min_y = b.min_y.min(p.y);
            b.max_x = b.max_x.max(p.x);
            b.max_y = b.max_y.max(p.y);
        }
        Some(b.padded(margin_x, margin_y))
    }

    /// Finite coordinates and strictly positive extent on both axes.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [self.min_x, self.min_y, self.max_x, self.max_y]
            .iter()
            .all(|v| v.is_finite())
            && self.min_x < self.max_x
            && self.min_y < self.max_y
    }

    /// `self` if valid, otherwise [`Bounds::fallback`].
    #[must_use]
    pub fn or_fallback(self) -> Self {
        if self.is_valid() {
            self
        } else {
            tracing::warn!(?self, "invalid floor bounds; using fallback rectangle");
            Self::fallback()
        }
    }

    /// Grow by `dx` horizontally and `dy` vertically on each side.
    #[must_use]
    pub fn padded(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.min_x - dx, self.min_y - dy, self.max_x + dx, self.max_y + dy)
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new((self.min_x + self.max_x) * 0.5, (self.min_y + self.max_y) * 0.5)
    }
}

/// World-space rectangle visible through `camera` on `viewport`.
#[must_use]
pub fn visible_rect(camera: &Camera, viewport: &Viewport) -> Bounds {
    let half_w = viewport.width / (2.0 * camera.zoom);
    let half_h = viewport.height / (2.0 * camera.zoom);
    Bounds::new(camera.x - half_w, camera.y - half_h, camera.x + half_w, camera.y + half_h)
}

/// Clamp the camera center so the view stays inside `grid` (already padded).
///
/// Zoom is left untouched; callers clamp it into range first.
pub fn clamp_center(camera: &mut Camera, viewport: &Viewport, grid: &Bounds) {
    camera.x = clamp_axis(camera.x, grid.min_x, grid.max_x, viewport.width, camera.zoom);
    camera.y = clamp_axis(camera.y, grid.min_y, grid.max_y, viewport.height, camera.zoom);
}

/// One axis of [`clamp_center`].
///
/// Valid centers are `[min + half, max - half]` with `half = extent / (2 * zoom)`.
/// An inverted interval means the view is wider than the floor: recentre.
#[must_use]
pub fn clamp_axis(center: f64, min: f64, max: f64, viewport_extent: f64, zoom: f64) -> f64 {
    let half = viewport_extent / (2.0 * zoom);
    let lo = min + half;
    let hi = max - half;
    let ordered = lo <= hi;
    if !center.is_finite() || !ordered {
        return (min + max) * 0.5;
    }
    center.clamp(lo, hi)
}
