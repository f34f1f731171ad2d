//! Input traces: recorded host events replayed through [`EngineCore`].
//!
//! A trace is JSON lines, one [`TraceEvent`] per line, tagged by `kind`.
//! Blank lines and lines starting with `#` are skipped. Replaying a trace
//! yields one [`Snapshot`] per event so camera behaviour can be diffed
//! across builds without a browser.

#[cfg(test)]
#[path = "trace_test.rs"]
mod trace_test;

use serde::{Deserialize, Serialize};

use crate::camera::{Camera, Point};
use crate::engine::{Action, EngineCore};
use crate::entity::EntityId;
use crate::input::{PointerInput, WheelInput};

#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("trace line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// One recorded host event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceEvent {
    Viewport {
        width: f64,
        height: f64,
        #[serde(default = "default_pixel_ratio")]
        pixel_ratio: f64,
    },
    PointerDown {
        id: i32,
        x: f64,
        y: f64,
        #[serde(default)]
        time_ms: f64,
    },
    PointerMove {
        id: i32,
        x: f64,
        y: f64,
        #[serde(default)]
        time_ms: f64,
    },
    PointerUp {
        id: i32,
        x: f64,
        y: f64,
        #[serde(default)]
        time_ms: f64,
    },
    PointerCancel {
        id: i32,
        x: f64,
        y: f64,
        #[serde(default)]
        time_ms: f64,
    },
    Wheel {
        x: f64,
        y: f64,
        delta_y: f64,
        #[serde(default)]
        time_ms: f64,
    },
    Select {
        id: EntityId,
        #[serde(default)]
        time_ms: f64,
    },
    Frame {
        time_ms: f64,
    },
    /// Host dropped all pointers (blur, `pointerleave` outside capture).
    ResetGestures,
}

fn default_pixel_ratio() -> f64 {
    1.0
}

/// Engine state after one replayed event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Zero-based index of the event in the trace.
    pub step: usize,
    pub camera: Camera,
    pub selection: Option<EntityId>,
    /// The event requested a new frame, or (for `frame`) produced a draw.
    /// False when a frame was already pending.
    pub scheduled: bool,
    /// The event changed the camera.
    pub moved: bool,
}

/// Parse a JSON-lines trace. Errors carry the 1-based line number.
pub fn parse_lines(text: &str) -> Result<Vec<TraceEvent>, TraceError> {
    let mut events = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let event = serde_json::from_str(line).map_err(|source| TraceError::Parse { line: idx + 1, source })?;
        events.push(event);
    }
    Ok(events)
}

/// Feed `events` to `engine` in order, snapshotting after each.
pub fn replay(engine: &mut EngineCore, events: &[TraceEvent]) -> Vec<Snapshot> {
    events
        .iter()
        .enumerate()
        .map(|(step, event)| {
            let before = engine.camera();
            let scheduled = apply(engine, event);
            let camera = engine.camera();
            tracing::trace!(step, ?event, ?camera, "replayed");
            Snapshot {
                step,
                camera,
                selection: engine.selection().map(str::to_owned),
                scheduled,
                moved: camera != before,
            }
        })
        .collect()
}

/// Apply one event. Returns whether it scheduled a frame (or, for `frame`, drew).
fn apply(engine: &mut EngineCore, event: &TraceEvent) -> bool {
    let actions = match *event {
        TraceEvent::Viewport { width, height, pixel_ratio } => engine.set_viewport(width, height, pixel_ratio),
        TraceEvent::PointerDown { id, x, y, time_ms } => engine.on_pointer_down(&PointerInput::new(id, x, y, time_ms)),
        TraceEvent::PointerMove { id, x, y, time_ms } => engine.on_pointer_move(&PointerInput::new(id, x, y, time_ms)),
        TraceEvent::PointerUp { id, x, y, time_ms } => engine.on_pointer_up(&PointerInput::new(id, x, y, time_ms)),
        TraceEvent::PointerCancel { id, x, y, time_ms } => {
            engine.on_pointer_cancel(&PointerInput::new(id, x, y, time_ms))
        }
        TraceEvent::Wheel { x, y, delta_y, time_ms } => {
            engine.on_wheel(&WheelInput { position: Point::new(x, y), delta_y, time_ms })
        }
        TraceEvent::Select { ref id, time_ms } => engine.select_entity(id, time_ms),
        TraceEvent::Frame { time_ms } => return engine.on_frame(time_ms).draw,
        TraceEvent::ResetGestures => {
            engine.reset_gestures();
            return false;
        }
    };
    actions.iter().any(|a| matches!(a, Action::RenderNeeded))
}
