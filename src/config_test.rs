#![allow(clippy::float_cmp)]

use super::*;

/// # Safety
/// Env tests share process state; each test clears every var it touches.
unsafe fn clear_floormap_env() {
    unsafe {
        for var in [
            "FLOORMAP_MIN_ZOOM",
            "FLOORMAP_MAX_ZOOM",
            "FLOORMAP_FOCUS_MIN_ZOOM",
            "FLOORMAP_FOCUS_MAX_ZOOM",
            "FLOORMAP_FOCUS_DURATION_MS",
            "FLOORMAP_DRAG_THRESHOLD_PX",
            "FLOORMAP_HIT_RADIUS_PX",
            "FLOORMAP_GRID_MARGIN",
        ] {
            std::env::remove_var(var);
        }
    }
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn default_matches_constants() {
    let cfg = ViewportConfig::default();
    assert_eq!(cfg.min_zoom, 0.35);
    assert_eq!(cfg.max_zoom, 4.5);
    assert_eq!(cfg.focus_min_zoom, 0.8);
    assert_eq!(cfg.focus_max_zoom, 2.2);
    assert_eq!(cfg.focus_duration_ms, 650.0);
    assert_eq!(cfg.drag_threshold_px, 2.0);
    assert_eq!(cfg.wheel_zoom_in, 1.08);
    assert_eq!(cfg.wheel_zoom_out, 0.92);
}

#[test]
fn default_is_valid() {
    assert_eq!(ViewportConfig::default().validate(), Ok(()));
}

#[test]
fn clamp_zoom_limits_both_ends() {
    let cfg = ViewportConfig::default();
    assert_eq!(cfg.clamp_zoom(0.01), 0.35);
    assert_eq!(cfg.clamp_zoom(100.0), 4.5);
    assert_eq!(cfg.clamp_zoom(1.5), 1.5);
}

#[test]
fn clamps_do_not_panic_on_inverted_ranges() {
    let cfg = ViewportConfig {
        min_zoom: 5.0,
        max_zoom: 1.0,
        focus_min_zoom: 3.0,
        focus_max_zoom: 2.0,
        ..ViewportConfig::default()
    };
    assert_eq!(cfg.clamp_zoom(0.5), 1.0);
    assert_eq!(cfg.clamp_focus_zoom(0.5), 2.0);
}

#[test]
fn clamp_focus_zoom_limits_both_ends() {
    let cfg = ViewportConfig::default();
    assert_eq!(cfg.clamp_focus_zoom(0.35), 0.8);
    assert_eq!(cfg.clamp_focus_zoom(4.5), 2.2);
    assert_eq!(cfg.clamp_focus_zoom(1.2), 1.2);
}

// =============================================================
// Validation
// =============================================================

#[test]
fn validate_rejects_inverted_zoom_range() {
    let cfg = ViewportConfig { min_zoom: 5.0, max_zoom: 1.0, ..Default::default() };
    assert!(matches!(cfg.validate(), Err(ConfigError::ZoomRange { .. })));
}

#[test]
fn validate_rejects_non_positive_zoom() {
    let cfg = ViewportConfig { min_zoom: 0.0, ..Default::default() };
    assert!(matches!(cfg.validate(), Err(ConfigError::ZoomRange { .. })));
}

#[test]
fn validate_rejects_focus_outside_zoom_range() {
    let cfg = ViewportConfig { focus_max_zoom: 9.0, ..Default::default() };
    assert!(matches!(cfg.validate(), Err(ConfigError::FocusRange { .. })));
}

#[test]
fn validate_rejects_zero_duration() {
    let cfg = ViewportConfig { focus_duration_ms: 0.0, ..Default::default() };
    assert_eq!(cfg.validate(), Err(ConfigError::FocusDuration(0.0)));
}

#[test]
fn validate_rejects_negative_threshold() {
    let cfg = ViewportConfig { drag_threshold_px: -1.0, ..Default::default() };
    assert_eq!(cfg.validate(), Err(ConfigError::DragThreshold(-1.0)));
}

#[test]
fn validate_rejects_swapped_wheel_factors() {
    let cfg = ViewportConfig { wheel_zoom_in: 0.9, wheel_zoom_out: 1.1, ..Default::default() };
    assert!(matches!(cfg.validate(), Err(ConfigError::WheelFactors { .. })));
}

#[test]
fn validate_rejects_inverted_hit_radii() {
    let cfg = ViewportConfig { hit_radius_min_px: 50.0, hit_radius_max_px: 10.0, ..Default::default() };
    assert!(matches!(cfg.validate(), Err(ConfigError::HitRadius { .. })));
}

#[test]
fn validate_rejects_negative_grid_margin() {
    let cfg = ViewportConfig { grid_margin: -5.0, ..Default::default() };
    assert_eq!(cfg.validate(), Err(ConfigError::GridMargin(-5.0)));
}

// =============================================================
// Serde
// =============================================================

#[test]
fn deserialize_partial_json_fills_defaults() {
    let cfg: ViewportConfig = serde_json::from_str(r#"{ "max_zoom": 3.0 }"#).unwrap();
    assert_eq!(cfg.max_zoom, 3.0);
    assert_eq!(cfg.min_zoom, 0.35);
    assert_eq!(cfg.focus_duration_ms, 650.0);
}

// =============================================================
// Environment
// =============================================================

#[test]
fn from_env_overrides_and_rejects() {
    // Kept in one test so the env mutations never interleave.
    unsafe {
        clear_floormap_env();
    }
    assert_eq!(ViewportConfig::from_env().unwrap(), ViewportConfig::default());

    unsafe {
        std::env::set_var("FLOORMAP_MAX_ZOOM", "6");
        std::env::set_var("FLOORMAP_FOCUS_DURATION_MS", " 400 ");
    }
    let cfg = ViewportConfig::from_env().unwrap();
    assert_eq!(cfg.max_zoom, 6.0);
    assert_eq!(cfg.focus_duration_ms, 400.0);

    unsafe {
        std::env::set_var("FLOORMAP_GRID_MARGIN", "wide");
    }
    let err = ViewportConfig::from_env().unwrap_err();
    assert_eq!(err, ConfigError::Parse { var: "FLOORMAP_GRID_MARGIN", value: "wide".into() });
    assert!(err.to_string().contains("FLOORMAP_GRID_MARGIN"));

    unsafe {
        clear_floormap_env();
        std::env::set_var("FLOORMAP_MIN_ZOOM", "9");
    }
    assert!(matches!(ViewportConfig::from_env(), Err(ConfigError::ZoomRange { .. })));

    unsafe { clear_floormap_env() };
}
