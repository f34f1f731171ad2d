//! Browser host binding: wraps [`EngineCore`] for JavaScript.
//!
//! The page owns the canvas and the drawing; this wrapper owns the camera
//! and decides when a frame is needed. The host passes a frame callback at
//! construction. Whenever the engine asks for a redraw the callback is queued
//! with `requestAnimationFrame`, and the callback must call
//! [`WebViewport::frame`] with the frame timestamp, drawing when it returns
//! `true`. Selection changes are reported through an optional listener.

use js_sys::Function;
use wasm_bindgen::prelude::*;

use crate::camera::Point;
use crate::engine::{Action, EngineCore};
use crate::entity::Dataset;
use crate::input::{PointerInput, WheelInput};

#[wasm_bindgen]
pub struct WebViewport {
    core: EngineCore,
    frame_callback: Function,
    selection_listener: Option<Function>,
    /// Handle of the queued animation frame, if any.
    raf_handle: Option<i32>,
}

#[wasm_bindgen]
impl WebViewport {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(frame_callback: Function) -> Self {
        Self { core: EngineCore::new(), frame_callback, selection_listener: None, raf_handle: None }
    }

    /// Register `listener(id | null)` for selection changes.
    pub fn set_selection_listener(&mut self, listener: Function) {
        self.selection_listener = Some(listener);
    }

    /// Replace the entities from dataset JSON.
    ///
    /// # Errors
    ///
    /// Returns the parse error message when the JSON is not a dataset.
    pub fn load_dataset(&mut self, json: &str) -> Result<(), JsValue> {
        let dataset = Dataset::parse(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let actions = self.core.load_dataset(dataset);
        self.process(actions);
        Ok(())
    }

    /// Load the built-in offline dataset.
    pub fn load_fallback(&mut self) {
        let actions = self.core.load_dataset(Dataset::fallback());
        self.process(actions);
    }

    pub fn set_viewport(&mut self, width: f64, height: f64, pixel_ratio: f64) {
        let actions = self.core.set_viewport(width, height, pixel_ratio);
        self.process(actions);
    }

    pub fn pointer_down(&mut self, id: i32, x: f64, y: f64, time_ms: f64) {
        let actions = self.core.on_pointer_down(&PointerInput::new(id, x, y, time_ms));
        self.process(actions);
    }

    pub fn pointer_move(&mut self, id: i32, x: f64, y: f64, time_ms: f64) {
        let actions = self.core.on_pointer_move(&PointerInput::new(id, x, y, time_ms));
        self.process(actions);
    }

    pub fn pointer_up(&mut self, id: i32, x: f64, y: f64, time_ms: f64) {
        let actions = self.core.on_pointer_up(&PointerInput::new(id, x, y, time_ms));
        self.process(actions);
    }

    pub fn pointer_cancel(&mut self, id: i32, x: f64, y: f64, time_ms: f64) {
        let actions = self.core.on_pointer_cancel(&PointerInput::new(id, x, y, time_ms));
        self.process(actions);
    }

    /// Forget every tracked pointer. Wire to `pointerleave` outside pointer
    /// capture, `blur`, and `visibilitychange` so a lost `pointerup` cannot
    /// turn later presses into pinches.
    pub fn reset_gestures(&mut self) {
        self.core.reset_gestures();
    }

    pub fn wheel(&mut self, x: f64, y: f64, delta_y: f64, time_ms: f64) {
        let actions = self.core.on_wheel(&WheelInput { position: Point::new(x, y), delta_y, time_ms });
        self.process(actions);
    }

    pub fn select(&mut self, id: &str, time_ms: f64) {
        let actions = self.core.select_entity(id, time_ms);
        self.process(actions);
    }

    /// Service the queued frame. Returns whether the host should draw.
    pub fn frame(&mut self, time_ms: f64) -> bool {
        self.raf_handle = None;
        let outcome = self.core.on_frame(time_ms);
        if outcome.reschedule {
            self.schedule();
        }
        outcome.draw
    }

    /// Cancel any queued frame. Call when the canvas is torn down.
    pub fn dispose(&mut self) {
        if let Some(handle) = self.raf_handle.take() {
            if let Some(window) = web_sys::window() {
                if let Err(err) = window.cancel_animation_frame(handle) {
                    tracing::warn!(?err, "cancelAnimationFrame failed");
                }
            }
        }
        self.core.frame_cancelled();
    }

    // --- Queries ---

    /// Id of the entity under a screen point, if any.
    #[must_use]
    pub fn pick(&self, x: f64, y: f64) -> Option<String> {
        self.core.pick(Point::new(x, y)).map(|e| e.id.clone())
    }

    #[must_use]
    pub fn search(&self, query: &str) -> Vec<String> {
        self.core.search(query).into_iter().map(|e| e.id.clone()).collect()
    }

    /// Component type label (`"Valve"`, `"Exit"`, ...) for the popup.
    #[must_use]
    pub fn entity_kind(&self, id: &str) -> Option<String> {
        self.core.entity_kind(id).map(str::to_owned)
    }

    #[must_use]
    pub fn selection(&self) -> Option<String> {
        self.core.selection().map(str::to_owned)
    }

    #[must_use]
    pub fn camera_x(&self) -> f64 {
        self.core.camera().x
    }

    #[must_use]
    pub fn camera_y(&self) -> f64 {
        self.core.camera().y
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.core.camera().zoom
    }

    /// `[min_x, min_y, max_x, max_y]` of the world rectangle on screen, for culling.
    #[must_use]
    pub fn visible_bounds(&self) -> Vec<f64> {
        let b = self.core.visible_bounds();
        vec![b.min_x, b.min_y, b.max_x, b.max_y]
    }

    /// `[x, y]` in world space for a screen point.
    #[must_use]
    pub fn screen_to_world(&self, x: f64, y: f64) -> Vec<f64> {
        let p = self.core.camera().screen_to_world(Point::new(x, y), &self.core.viewport());
        vec![p.x, p.y]
    }

    /// `[x, y]` in screen space for a world point.
    #[must_use]
    pub fn world_to_screen(&self, x: f64, y: f64) -> Vec<f64> {
        let p = self.core.camera().world_to_screen(Point::new(x, y), &self.core.viewport());
        vec![p.x, p.y]
    }
}

impl WebViewport {
    fn process(&mut self, actions: Vec<Action>) {
        for action in actions {
            match action {
                Action::RenderNeeded => self.schedule(),
                Action::SelectionChanged(id) => self.notify_selection(id.as_deref()),
            }
        }
    }

    fn schedule(&mut self) {
        if self.raf_handle.is_some() {
            return;
        }
        let Some(window) = web_sys::window() else {
            tracing::warn!("no window; redraw dropped");
            self.core.frame_cancelled();
            return;
        };
        match window.request_animation_frame(&self.frame_callback) {
            Ok(handle) => self.raf_handle = Some(handle),
            Err(err) => {
                tracing::warn!(?err, "requestAnimationFrame failed");
                self.core.frame_cancelled();
            }
        }
    }

    fn notify_selection(&self, id: Option<&str>) {
        let Some(listener) = &self.selection_listener else {
            return;
        };
        let arg = id.map_or(JsValue::NULL, JsValue::from_str);
        if let Err(err) = listener.call1(&JsValue::NULL, &arg) {
            tracing::warn!(?err, "selection listener threw");
        }
    }
}
