//! Input model: pointer and wheel events and the gesture state machine.
//!
//! `GestureController` tracks every active pointer in press order and derives
//! an explicit [`GestureState`] from them. One pointer pans, two pointers
//! pinch-zoom around their midpoint, further pointers are tracked but never
//! drive the gesture (the two earliest still-active pointers do). When a
//! driving pointer lifts, the gesture is re-anchored on whatever remains, so a
//! pinch that drops to one finger continues as a pan without a camera jump.
//!
//! A press/release sequence that never moved past the drag threshold and never
//! became a pinch is reported as a tap.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::view::ViewState;

/// Host-assigned pointer identifier (DOM `pointerId`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointerId(pub i32);

/// A pointer-down/move/up/cancel event in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub id: PointerId,
    pub position: Point,
    /// Event timestamp in milliseconds, on the same clock as frame timestamps.
    pub time_ms: f64,
}

impl PointerInput {
    #[must_use]
    pub fn new(id: i32, x: f64, y: f64, time_ms: f64) -> Self {
        Self { id: PointerId(id), position: Point::new(x, y), time_ms }
    }
}

/// A wheel event at a screen-space cursor position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelInput {
    pub position: Point,
    /// Vertical scroll amount (positive = away from the user = zoom out).
    pub delta_y: f64,
    pub time_ms: f64,
}

/// Zoom anchor captured when a pinch starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchAnchor {
    /// Screen distance between the two driving pointers at pinch start.
    pub start_distance: f64,
    /// Camera zoom at pinch start.
    pub start_zoom: f64,
    /// World point under the screen midpoint at pinch start; held under the
    /// current midpoint for the rest of the pinch.
    pub start_world_midpoint: Point,
}

/// The active gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    /// No pointers tracked.
    #[default]
    Idle,
    /// One pointer drags the floor.
    Panning {
        pointer: PointerId,
        /// Where the pan was anchored; movement is measured from here.
        origin: Point,
        /// Screen position at the previous move.
        last: Point,
    },
    /// Two pointers zoom around their midpoint.
    Pinching { first: PointerId, second: PointerId, anchor: PinchAnchor },
}

impl GestureState {
    fn is_driven_by(&self, id: PointerId) -> bool {
        match *self {
            Self::Idle => false,
            Self::Panning { pointer, .. } => pointer == id,
            Self::Pinching { first, second, .. } => first == id || second == id,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GestureController {
    /// Tracked pointers in press order with their last screen position.
    pointers: Vec<(PointerId, Point)>,
    state: GestureState,
    /// Set once the current press sequence panned past the threshold or pinched.
    dragged: bool,
}

impl GestureController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state
    }

    #[must_use]
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    #[must_use]
    pub fn is_tracking(&self, id: PointerId) -> bool {
        self.position_of(id).is_some()
    }

    /// Whether the current press sequence has turned into a drag.
    #[must_use]
    pub fn dragged(&self) -> bool {
        self.dragged
    }

    /// Drop every pointer and return to `Idle`.
    pub fn reset(&mut self) {
        self.pointers.clear();
        self.state = GestureState::Idle;
        self.dragged = false;
    }

    pub fn on_pointer_down(&mut self, input: &PointerInput, view: &ViewState) {
        if let Some(slot) = self.pointers.iter_mut().find(|(id, _)| *id == input.id) {
            // Repeated down for a tracked pointer: refresh, keep the gesture.
            slot.1 = input.position;
            return;
        }
        self.pointers.push((input.id, input.position));
        match self.pointers.len() {
            1 => {
                self.dragged = false;
                self.start_pan(input.id, input.position);
            }
            2 => self.start_pinch(view),
            _ => {}
        }
    }

    /// Apply a move. Returns `true` when the camera changed.
    pub fn on_pointer_move(&mut self, input: &PointerInput, view: &mut ViewState) -> bool {
        let Some(slot) = self.pointers.iter_mut().find(|(id, _)| *id == input.id) else {
            return false;
        };
        slot.1 = input.position;

        match self.state {
            GestureState::Panning { pointer, origin, last } if pointer == input.id => {
                let pos = input.position;
                view.pan_by_screen(pos.x - last.x, pos.y - last.y);
                if origin.distance(pos) >= view.config.drag_threshold_px {
                    self.dragged = true;
                }
                self.state = GestureState::Panning { pointer, origin, last: pos };
                view.clamp();
                true
            }
            GestureState::Pinching { first, second, anchor } if first == input.id || second == input.id => {
                let (Some(a), Some(b)) = (self.position_of(first), self.position_of(second)) else {
                    return false;
                };
                let mid = a.midpoint(b);
                let zoom = if anchor.start_distance > view.config.pinch_min_distance_px {
                    anchor.start_zoom * a.distance(b) / anchor.start_distance
                } else {
                    view.camera.zoom
                };
                view.zoom_about(mid, anchor.start_world_midpoint, zoom);
                view.clamp();
                true
            }
            _ => false,
        }
    }

    /// Release a pointer. Returns the tap position when this ends a press
    /// sequence that never became a drag.
    pub fn on_pointer_up(&mut self, input: &PointerInput, view: &ViewState) -> Option<Point> {
        let index = self.pointers.iter().position(|(id, _)| *id == input.id)?;
        self.pointers.remove(index);

        if self.pointers.is_empty() {
            self.state = GestureState::Idle;
            if self.dragged {
                return None;
            }
            tracing::debug!(x = input.position.x, y = input.position.y, "tap");
            return Some(input.position);
        }

        if self.state.is_driven_by(input.id) {
            self.reanchor(view);
        }
        None
    }

    /// Cancellation is treated as a release.
    pub fn on_pointer_cancel(&mut self, input: &PointerInput, view: &ViewState) -> Option<Point> {
        self.on_pointer_up(input, view)
    }

    fn position_of(&self, id: PointerId) -> Option<Point> {
        self.pointers.iter().find(|(p, _)| *p == id).map(|(_, pos)| *pos)
    }

    fn start_pan(&mut self, pointer: PointerId, at: Point) {
        self.state = GestureState::Panning { pointer, origin: at, last: at };
    }

    fn start_pinch(&mut self, view: &ViewState) {
        let [(first, a), (second, b), ..] = self.pointers[..] else {
            return;
        };
        let anchor = PinchAnchor {
            start_distance: a.distance(b),
            start_zoom: view.camera.zoom,
            start_world_midpoint: view.screen_to_world(a.midpoint(b)),
        };
        tracing::debug!(distance = anchor.start_distance, zoom = anchor.start_zoom, "pinch start");
        self.dragged = true;
        self.state = GestureState::Pinching { first, second, anchor };
    }

    /// Rebuild the gesture from the pointers still down.
    fn reanchor(&mut self, view: &ViewState) {
        match self.pointers[..] {
            [] => self.state = GestureState::Idle,
            [(pointer, at)] => {
                tracing::debug!(?pointer, "pinch degraded to pan");
                self.start_pan(pointer, at);
            }
            _ => self.start_pinch(view),
        }
    }
}

/// Zoom one wheel notch about the cursor. Returns `true` when the camera changed.
///
/// A zero `delta_y` (pure horizontal scroll) is ignored.
pub fn wheel_zoom(view: &mut ViewState, input: &WheelInput) -> bool {
    if input.delta_y == 0.0 || !input.delta_y.is_finite() {
        return false;
    }
    let world = view.screen_to_world(input.position);
    let factor = if input.delta_y > 0.0 { view.config.wheel_zoom_out } else { view.config.wheel_zoom_in };
    view.zoom_about(input.position, world, view.camera.zoom * factor);
    view.clamp();
    true
}
