//! Shared numeric constants for the floor-map viewport.
//!
//! These are the defaults behind [`crate::config::ViewportConfig`]; the engine
//! reads tunables from the config, never from here directly.

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest allowed zoom (screen pixels per world unit).
pub const MIN_ZOOM: f64 = 0.35;

/// Largest allowed zoom (screen pixels per world unit).
pub const MAX_ZOOM: f64 = 4.5;

/// Zoom multiplier for one wheel notch towards the user (zoom in).
pub const WHEEL_ZOOM_IN: f64 = 1.08;

/// Zoom multiplier for one wheel notch away from the user (zoom out).
pub const WHEEL_ZOOM_OUT: f64 = 0.92;

// ── Focus animation ─────────────────────────────────────────────

/// Lower bound of the zoom a focus animation settles on.
pub const FOCUS_MIN_ZOOM: f64 = 0.8;

/// Upper bound of the zoom a focus animation settles on.
pub const FOCUS_MAX_ZOOM: f64 = 2.2;

/// Duration of a focus animation in milliseconds.
pub const FOCUS_DURATION_MS: f64 = 650.0;

// ── Gestures ────────────────────────────────────────────────────

/// Movement from the press point, in screen pixels, that turns a tap into a drag.
pub const DRAG_THRESHOLD_PX: f64 = 2.0;

/// Pinch start distances below this (screen pixels) never drive zoom.
pub const PINCH_MIN_DISTANCE_PX: f64 = 1e-6;

// ── Hit-testing ─────────────────────────────────────────────────

/// Hit radius in screen pixels at zoom 1.0.
pub const HIT_RADIUS_BASE_PX: f64 = 26.0;

/// Hit radius never shrinks below this when zoomed in.
pub const HIT_RADIUS_MIN_PX: f64 = 14.0;

/// Hit radius never grows beyond this when zoomed out.
pub const HIT_RADIUS_MAX_PX: f64 = 44.0;

// ── Bounds ──────────────────────────────────────────────────────

/// Padding around the floor bounds used for clamping; one floor-grid cell.
pub const GRID_MARGIN: f64 = 160.0;

/// Horizontal margin added around the entity extent when deriving bounds.
pub const DATASET_MARGIN_X: f64 = 400.0;

/// Vertical margin added around the entity extent when deriving bounds.
pub const DATASET_MARGIN_Y: f64 = 300.0;

/// Floor extent used when no data (or no valid bounds) is available.
pub const FALLBACK_MIN_X: f64 = 0.0;
/// See [`FALLBACK_MIN_X`].
pub const FALLBACK_MIN_Y: f64 = 0.0;
/// See [`FALLBACK_MIN_X`].
pub const FALLBACK_MAX_X: f64 = 2000.0;
/// See [`FALLBACK_MIN_X`].
pub const FALLBACK_MAX_Y: f64 = 1200.0;

// ── Search ──────────────────────────────────────────────────────

/// Maximum number of search results offered for navigation.
pub const SEARCH_RESULT_LIMIT: usize = 20;
