//! Redraw coalescing: at most one draw per display frame.
//!
//! `DrawScheduler` is the single-slot pending flag. The first request in a
//! frame returns `true`, telling the caller to schedule one next-frame
//! callback (in the browser, `requestAnimationFrame`); further requests are
//! absorbed until that callback fires and calls [`DrawScheduler::frame_fired`].
//! The callback renders whatever state is live at that moment, so every
//! request made within the frame is reflected.

#[cfg(test)]
#[path = "schedule_test.rs"]
mod schedule_test;

#[derive(Debug, Clone, Default)]
pub struct DrawScheduler {
    pending: bool,
    /// Requests absorbed since the pending frame was scheduled.
    coalesced: u32,
}

impl DrawScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a redraw. Returns `true` when the caller must schedule the
    /// next-frame callback, `false` when one is already pending.
    pub fn request_redraw(&mut self) -> bool {
        if self.pending {
            self.coalesced = self.coalesced.saturating_add(1);
            return false;
        }
        self.pending = true;
        true
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// The scheduled callback fired. Returns whether a draw was pending.
    pub fn frame_fired(&mut self) -> bool {
        if self.coalesced > 0 {
            tracing::trace!(coalesced = self.coalesced, "redraw requests coalesced");
        }
        self.coalesced = 0;
        std::mem::take(&mut self.pending)
    }

    /// Forget the pending frame after its callback was cancelled by the host.
    pub fn cancel(&mut self) {
        self.pending = false;
        self.coalesced = 0;
    }
}
