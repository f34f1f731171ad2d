//! Eased, cancellable camera transitions ("focus on entity").
//!
//! Progress is computed from the wall-clock time captured when the job
//! starts, never from accumulated per-frame deltas, so variable frame rates
//! neither speed up nor drift the animation. The host drives it by calling
//! [`CameraAnimator::tick`] once per display frame.

#[cfg(test)]
#[path = "animate_test.rs"]
mod animate_test;

use crate::camera::{Camera, Point};
use crate::view::ViewState;

/// Cubic ease-in-out over `t` in `[0, 1]`.
#[must_use]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// One in-flight camera transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationJob {
    pub start_camera: Camera,
    pub target_camera: Camera,
    pub start_ms: f64,
    pub duration_ms: f64,
}

impl AnimationJob {
    /// Normalised progress at `now_ms`, clamped to `[0, 1]`.
    #[must_use]
    pub fn progress(&self, now_ms: f64) -> f64 {
        let t = (now_ms - self.start_ms) / self.duration_ms;
        if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) }
    }

    /// Camera at normalised progress `t`.
    #[must_use]
    pub fn camera_at(&self, t: f64) -> Camera {
        if t >= 1.0 {
            return self.target_camera;
        }
        let e = ease_in_out_cubic(t);
        let (a, b) = (self.start_camera, self.target_camera);
        Camera {
            x: a.x + (b.x - a.x) * e,
            y: a.y + (b.y - a.y) * e,
            zoom: a.zoom + (b.zoom - a.zoom) * e,
        }
    }
}

/// Outcome of one animation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No job was running; the camera was not touched.
    Idle,
    /// The camera moved and the job continues.
    Running,
    /// The camera reached its target and the job ended.
    Finished,
}

/// Holds at most one [`AnimationJob`].
#[derive(Debug, Clone, Default)]
pub struct CameraAnimator {
    job: Option<AnimationJob>,
}

impl CameraAnimator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.job.is_some()
    }

    #[must_use]
    pub fn job(&self) -> Option<&AnimationJob> {
        self.job.as_ref()
    }

    /// Start a transition that centres `target` at a comfortable zoom.
    ///
    /// Any running job is replaced. The target is clamped against the current
    /// viewport and bounds up front so the final frame lands on it exactly.
    pub fn focus_on(&mut self, target: Point, view: &ViewState, now_ms: f64) {
        if self.cancel() {
            tracing::debug!("focus replaced running animation");
        }
        let cfg = &view.config;
        let mut target_view = view.clone();
        target_view.camera =
            Camera::new(target.x, target.y, cfg.clamp_focus_zoom(view.camera.zoom));
        target_view.clamp();

        tracing::debug!(x = target.x, y = target.y, zoom = target_view.camera.zoom, "focus start");
        self.job = Some(AnimationJob {
            start_camera: view.camera,
            target_camera: target_view.camera,
            start_ms: now_ms,
            duration_ms: cfg.focus_duration_ms,
        });
    }

    /// Drop the running job, leaving the camera where it is. Returns whether
    /// a job was running.
    pub fn cancel(&mut self) -> bool {
        self.job.take().is_some()
    }

    /// Advance the running job to `now_ms`.
    pub fn tick(&mut self, view: &mut ViewState, now_ms: f64) -> TickOutcome {
        let Some(job) = self.job else {
            return TickOutcome::Idle;
        };
        let t = job.progress(now_ms);
        view.camera = job.camera_at(t);
        view.clamp();
        if t >= 1.0 {
            self.job = None;
            tracing::debug!("focus finished");
            TickOutcome::Finished
        } else {
            TickOutcome::Running
        }
    }
}
