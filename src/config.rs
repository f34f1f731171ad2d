//! Viewport tunables with defaults, environment overrides, and validation.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DRAG_THRESHOLD_PX, FOCUS_DURATION_MS, FOCUS_MAX_ZOOM, FOCUS_MIN_ZOOM, GRID_MARGIN, HIT_RADIUS_BASE_PX,
    HIT_RADIUS_MAX_PX, HIT_RADIUS_MIN_PX, MAX_ZOOM, MIN_ZOOM, PINCH_MIN_DISTANCE_PX, WHEEL_ZOOM_IN, WHEEL_ZOOM_OUT,
};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}'")]
    Parse { var: &'static str, value: String },
    #[error("invalid zoom range: min {min} must be positive and below max {max}")]
    ZoomRange { min: f64, max: f64 },
    #[error("focus zoom range [{min}, {max}] must lie within the zoom range")]
    FocusRange { min: f64, max: f64 },
    #[error("focus duration must be positive, got {0}ms")]
    FocusDuration(f64),
    #[error("drag threshold must be non-negative, got {0}px")]
    DragThreshold(f64),
    #[error("wheel factors must zoom in (> 1) and out (< 1), got in={zoom_in} out={zoom_out}")]
    WheelFactors { zoom_in: f64, zoom_out: f64 },
    #[error("invalid hit radius: base {base}, min {min}, max {max}")]
    HitRadius { base: f64, min: f64, max: f64 },
    #[error("grid margin must be non-negative, got {0}")]
    GridMargin(f64),
}

/// Behavioural tunables of the viewport subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub focus_min_zoom: f64,
    pub focus_max_zoom: f64,
    pub focus_duration_ms: f64,
    pub drag_threshold_px: f64,
    pub wheel_zoom_in: f64,
    pub wheel_zoom_out: f64,
    pub hit_radius_base_px: f64,
    pub hit_radius_min_px: f64,
    pub hit_radius_max_px: f64,
    pub grid_margin: f64,
    pub pinch_min_distance_px: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            focus_min_zoom: FOCUS_MIN_ZOOM,
            focus_max_zoom: FOCUS_MAX_ZOOM,
            focus_duration_ms: FOCUS_DURATION_MS,
            drag_threshold_px: DRAG_THRESHOLD_PX,
            wheel_zoom_in: WHEEL_ZOOM_IN,
            wheel_zoom_out: WHEEL_ZOOM_OUT,
            hit_radius_base_px: HIT_RADIUS_BASE_PX,
            hit_radius_min_px: HIT_RADIUS_MIN_PX,
            hit_radius_max_px: HIT_RADIUS_MAX_PX,
            grid_margin: GRID_MARGIN,
            pinch_min_distance_px: PINCH_MIN_DISTANCE_PX,
        }
    }
}

impl ViewportConfig {
    /// Build config from defaults plus optional environment overrides.
    ///
    /// Optional:
    /// - `FLOORMAP_MIN_ZOOM` / `FLOORMAP_MAX_ZOOM`
    /// - `FLOORMAP_FOCUS_MIN_ZOOM` / `FLOORMAP_FOCUS_MAX_ZOOM`
    /// - `FLOORMAP_FOCUS_DURATION_MS`
    /// - `FLOORMAP_DRAG_THRESHOLD_PX`
    /// - `FLOORMAP_HIT_RADIUS_PX`: base hit radius at zoom 1
    /// - `FLOORMAP_GRID_MARGIN`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for unparseable values, or a validation
    /// error when the combined config is inconsistent.
    pub fn from_env() -> Result<Self, ConfigError> {
        let d = Self::default();
        let cfg = Self {
            min_zoom: env_f64("FLOORMAP_MIN_ZOOM", d.min_zoom)?,
            max_zoom: env_f64("FLOORMAP_MAX_ZOOM", d.max_zoom)?,
            focus_min_zoom: env_f64("FLOORMAP_FOCUS_MIN_ZOOM", d.focus_min_zoom)?,
            focus_max_zoom: env_f64("FLOORMAP_FOCUS_MAX_ZOOM", d.focus_max_zoom)?,
            focus_duration_ms: env_f64("FLOORMAP_FOCUS_DURATION_MS", d.focus_duration_ms)?,
            drag_threshold_px: env_f64("FLOORMAP_DRAG_THRESHOLD_PX", d.drag_threshold_px)?,
            hit_radius_base_px: env_f64("FLOORMAP_HIT_RADIUS_PX", d.hit_radius_base_px)?,
            grid_margin: env_f64("FLOORMAP_GRID_MARGIN", d.grid_margin)?,
            ..d
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check internal consistency.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite_pos = |v: f64| v.is_finite() && v > 0.0;

        if !finite_pos(self.min_zoom) || !finite_pos(self.max_zoom) || self.min_zoom > self.max_zoom {
            return Err(ConfigError::ZoomRange { min: self.min_zoom, max: self.max_zoom });
        }
        if !(self.focus_min_zoom >= self.min_zoom
            && self.focus_max_zoom <= self.max_zoom
            && self.focus_min_zoom <= self.focus_max_zoom)
        {
            return Err(ConfigError::FocusRange { min: self.focus_min_zoom, max: self.focus_max_zoom });
        }
        if !finite_pos(self.focus_duration_ms) {
            return Err(ConfigError::FocusDuration(self.focus_duration_ms));
        }
        if !(self.drag_threshold_px.is_finite() && self.drag_threshold_px >= 0.0) {
            return Err(ConfigError::DragThreshold(self.drag_threshold_px));
        }
        if !(finite_pos(self.wheel_zoom_in) && self.wheel_zoom_in > 1.0)
            || !(finite_pos(self.wheel_zoom_out) && self.wheel_zoom_out < 1.0)
        {
            return Err(ConfigError::WheelFactors { zoom_in: self.wheel_zoom_in, zoom_out: self.wheel_zoom_out });
        }
        if !finite_pos(self.hit_radius_base_px)
            || !finite_pos(self.hit_radius_min_px)
            || !finite_pos(self.hit_radius_max_px)
            || self.hit_radius_min_px > self.hit_radius_max_px
        {
            return Err(ConfigError::HitRadius {
                base: self.hit_radius_base_px,
                min: self.hit_radius_min_px,
                max: self.hit_radius_max_px,
            });
        }
        if !(self.grid_margin.is_finite() && self.grid_margin >= 0.0) {
            return Err(ConfigError::GridMargin(self.grid_margin));
        }
        Ok(())
    }

    /// Clamp `zoom` into `[min_zoom, max_zoom]`.
    ///
    /// Never panics: on an unvalidated config with `min_zoom > max_zoom` the
    /// result is `max_zoom`.
    #[must_use]
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.max(self.min_zoom).min(self.max_zoom)
    }

    /// Clamp `zoom` into the focus range. Never panics, like [`Self::clamp_zoom`].
    #[must_use]
    pub fn clamp_focus_zoom(&self, zoom: f64) -> f64 {
        zoom.max(self.focus_min_zoom).min(self.focus_max_zoom)
    }
}

fn env_f64(var: &'static str, default: f64) -> Result<f64, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| ConfigError::Parse { var, value: raw.clone() }),
        Err(_) => Ok(default),
    }
}
