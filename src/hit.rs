#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{self, Camera, Point, Viewport};
use crate::config::ViewportConfig;
use crate::entity::Entity;

/// Screen-space selection radius for the given zoom.
///
/// `base / sqrt(zoom)`, clamped so targets neither vanish when zoomed in nor
/// swallow their neighbours when zoomed out.
#[must_use]
pub fn hit_radius(zoom: f64, config: &ViewportConfig) -> f64 {
    (config.hit_radius_base_px / zoom.sqrt()).max(config.hit_radius_min_px).min(config.hit_radius_max_px)
}

/// Nearest entity whose projected position lies within the hit radius of `screen_pt`.
///
/// Exact distance ties go to the entity that comes first in `entities`.
#[must_use]
pub fn pick<'a>(
    screen_pt: Point,
    entities: &'a [Entity],
    camera: &Camera,
    viewport: &Viewport,
    config: &ViewportConfig,
) -> Option<&'a Entity> {
    let radius = hit_radius(camera.zoom, config);
    let mut best: Option<(&Entity, f64)> = None;
    for entity in entities {
        let d = camera::world_to_screen(entity.position(), camera, viewport).distance(screen_pt);
        if d >= radius {
            continue;
        }
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((entity, d));
        }
    }
    best.map(|(entity, _)| entity)
}
