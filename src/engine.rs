//! Engine core: the viewport subsystem's single owner and command surface.
//!
//! `EngineCore` owns the camera state, the entity list, the gesture
//! controller, the focus animator, and the redraw scheduler. Every input
//! handler returns the [`Action`]s the host must carry out; the host never
//! mutates the camera itself. A direct-manipulation event always cancels a
//! running focus animation before touching the camera, so the next frame
//! cannot overwrite the user's input.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use crate::animate::{CameraAnimator, TickOutcome};
use crate::bounds::{self, Bounds};
use crate::camera::{Camera, Point, Viewport};
use crate::config::{ConfigError, ViewportConfig};
use crate::consts::SEARCH_RESULT_LIMIT;
use crate::entity::{Dataset, Entity, EntityId, EntityStore};
use crate::hit;
use crate::input::{self, GestureController, GestureState, PointerInput, WheelInput};
use crate::schedule::DrawScheduler;
use crate::search;
use crate::view::ViewState;

/// Actions returned from handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A redraw was scheduled: call [`EngineCore::on_frame`] on the next
    /// display frame. Emitted at most once per frame.
    RenderNeeded,
    /// The selected entity changed (tap or programmatic selection).
    SelectionChanged(Option<EntityId>),
}

/// Result of servicing one display frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameOutcome {
    /// The host should render the live camera now.
    pub draw: bool,
    /// A further frame was scheduled (animation still running).
    pub reschedule: bool,
}

#[derive(Debug, Clone, Default)]
pub struct EngineCore {
    view: ViewState,
    entities: EntityStore,
    gesture: GestureController,
    animator: CameraAnimator,
    scheduler: DrawScheduler,
    selected: Option<EntityId>,
    version: Option<String>,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with custom limits.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency `ViewportConfig::validate` finds.
    pub fn with_config(config: ViewportConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { view: ViewState::new(config), ..Self::default() })
    }

    // --- Data inputs ---

    /// Replace the entity list, derive floor bounds, and centre the camera.
    pub fn load_dataset(&mut self, dataset: Dataset) -> Vec<Action> {
        let mut actions = Vec::new();
        if dataset.entities.is_empty() {
            tracing::warn!("dataset has no entities; using fallback bounds");
        }
        self.entities.replace(dataset.entities);
        self.version = dataset.version;

        self.view.set_bounds(self.entities.floor_bounds());
        let center = self.view.bounds().center();
        self.view.camera.x = center.x;
        self.view.camera.y = center.y;
        self.view.clamp();

        if let Some(id) = &self.selected {
            if !self.entities.contains(id) {
                self.selected = None;
                actions.push(Action::SelectionChanged(None));
            }
        }

        tracing::info!(
            entities = self.entities.len(),
            version = self.version.as_deref().unwrap_or("unknown"),
            "dataset loaded"
        );
        self.request_redraw(&mut actions);
        actions
    }

    /// Override floor bounds (e.g. derived from polygon extents). Invalid
    /// bounds fall back to the default rectangle.
    pub fn set_bounds(&mut self, bounds: Bounds) -> Vec<Action> {
        let mut actions = Vec::new();
        self.view.set_bounds(bounds);
        self.view.clamp();
        self.request_redraw(&mut actions);
        actions
    }

    // --- Viewport ---

    /// Update viewport dimensions (CSS pixels) and device pixel ratio.
    pub fn set_viewport(&mut self, width: f64, height: f64, pixel_ratio: f64) -> Vec<Action> {
        let mut actions = Vec::new();
        let sane = |v: f64, fallback: f64| if v.is_finite() && v >= 0.0 { v } else { fallback };
        self.view.viewport =
            Viewport::new(sane(width, 0.0), sane(height, 0.0), if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 });
        self.view.clamp();
        self.request_redraw(&mut actions);
        actions
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, input: &PointerInput) -> Vec<Action> {
        self.cancel_animation();
        self.gesture.on_pointer_down(input, &self.view);
        Vec::new()
    }

    pub fn on_pointer_move(&mut self, input: &PointerInput) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.gesture.on_pointer_move(input, &mut self.view) {
            self.request_redraw(&mut actions);
        }
        actions
    }

    pub fn on_pointer_up(&mut self, input: &PointerInput) -> Vec<Action> {
        match self.gesture.on_pointer_up(input, &self.view) {
            Some(at) => self.tap(at, input.time_ms),
            None => Vec::new(),
        }
    }

    pub fn on_pointer_cancel(&mut self, input: &PointerInput) -> Vec<Action> {
        match self.gesture.on_pointer_cancel(input, &self.view) {
            Some(at) => self.tap(at, input.time_ms),
            None => Vec::new(),
        }
    }

    /// Drop every tracked pointer and return to `Idle`.
    ///
    /// Hosts call this when pointer ends may have been lost (`pointerleave`
    /// outside capture, window blur, visibility change) so a stale pointer
    /// cannot turn the next press into a pinch.
    pub fn reset_gestures(&mut self) {
        if self.gesture.pointer_count() > 0 {
            tracing::debug!(pointers = self.gesture.pointer_count(), "gesture reset");
        }
        self.gesture.reset();
    }

    pub fn on_wheel(&mut self, input: &WheelInput) -> Vec<Action> {
        let mut actions = Vec::new();
        self.cancel_animation();
        if input::wheel_zoom(&mut self.view, input) {
            self.request_redraw(&mut actions);
        }
        actions
    }

    // --- Navigation ---

    /// Animate the camera to centre `target`.
    pub fn focus_on(&mut self, target: Point, now_ms: f64) -> Vec<Action> {
        let mut actions = Vec::new();
        self.animator.focus_on(target, &self.view, now_ms);
        self.request_redraw(&mut actions);
        actions
    }

    /// Select an entity by id and focus the camera on it. Unknown ids are ignored.
    pub fn select_entity(&mut self, id: &str, now_ms: f64) -> Vec<Action> {
        let Some(entity) = self.entities.get(id) else {
            tracing::debug!(id, "select: unknown entity");
            return Vec::new();
        };
        tracing::info!(id, kind = entity.kind().unwrap_or("unknown"), "entity selected");
        let position = entity.position();
        let mut actions = self.set_selection(Some(id.to_owned()));
        actions.extend(self.focus_on(position, now_ms));
        actions
    }

    /// Service a display frame: clear the pending redraw and advance any
    /// focus animation to `now_ms`.
    pub fn on_frame(&mut self, now_ms: f64) -> FrameOutcome {
        let was_pending = self.scheduler.frame_fired();
        let tick = self.animator.tick(&mut self.view, now_ms);
        let reschedule = tick == TickOutcome::Running && self.scheduler.request_redraw();
        FrameOutcome { draw: was_pending || tick != TickOutcome::Idle, reschedule }
    }

    /// Host cancelled the scheduled frame callback (e.g. on teardown).
    pub fn frame_cancelled(&mut self) {
        self.scheduler.cancel();
    }

    // --- Queries ---

    /// Nearest entity under a screen point.
    #[must_use]
    pub fn pick(&self, screen: Point) -> Option<&Entity> {
        hit::pick(screen, self.entities.as_slice(), &self.view.camera, &self.view.viewport, &self.view.config)
    }

    /// Entities matching a search query, for search-driven navigation.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Entity> {
        search::search(self.entities.as_slice(), query, SEARCH_RESULT_LIMIT)
    }

    /// Read-only camera snapshot for the renderer.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.view.camera
    }

    /// World rectangle currently on screen, for render culling.
    #[must_use]
    pub fn visible_bounds(&self) -> Bounds {
        bounds::visible_rect(&self.view.camera, &self.view.viewport)
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.view.viewport
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.view.bounds()
    }

    #[must_use]
    pub fn config(&self) -> &ViewportConfig {
        &self.view.config
    }

    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Component type label of an entity, for the popup.
    #[must_use]
    pub fn entity_kind(&self, id: &str) -> Option<&str> {
        self.entities.get(id).and_then(Entity::kind)
    }

    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        self.entities.as_slice()
    }

    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    #[must_use]
    pub fn gesture_state(&self) -> GestureState {
        self.gesture.state()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animator.is_running()
    }

    #[must_use]
    pub fn redraw_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    // --- Internals ---

    fn tap(&mut self, at: Point, now_ms: f64) -> Vec<Action> {
        let hit = self.pick(at).map(|e| (e.id.clone(), e.position()));
        match hit {
            Some((id, position)) => {
                let mut actions = self.set_selection(Some(id));
                actions.extend(self.focus_on(position, now_ms));
                actions
            }
            None => self.set_selection(None),
        }
    }

    fn set_selection(&mut self, id: Option<EntityId>) -> Vec<Action> {
        self.selected.clone_from(&id);
        let mut actions = vec![Action::SelectionChanged(id)];
        self.request_redraw(&mut actions);
        actions
    }

    fn cancel_animation(&mut self) {
        if self.animator.cancel() {
            tracing::debug!(camera = ?self.view.camera, "focus cancelled by input");
        }
    }

    fn request_redraw(&mut self, actions: &mut Vec<Action>) {
        if self.scheduler.request_redraw() {
            actions.push(Action::RenderNeeded);
        }
    }
}
