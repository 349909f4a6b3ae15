//! Intent listeners and the share request seam

use std::collections::BTreeSet;

use serde::Serialize;

use crate::widget::TimerRef;

/// Gesture outcomes reported by the touch handler
///
/// Every method defaults to a no-op so implementors only override what they
/// care about.
pub trait TouchEventListener {
    fn on_bubble_click(&mut self, _timer: &TimerRef) {}

    fn on_bubble_dismiss(&mut self, _timer: &TimerRef) {}

    /// Bubble was released on a stop target
    fn on_timer_stopped(&mut self, _timer: &TimerRef) {}

    /// Timer was mutated by a button (time added, paused, shared)
    fn on_timer_updated(&mut self, _timer: &TimerRef) {}

    fn on_debug_info_update(&mut self, _info: &str) {}

    fn on_drag_state_changed(&mut self, _is_dragging: bool) {}

    fn on_debug_mode_changed(&mut self, _enabled: bool) {}
}

/// Application-level events relayed by an overlay window
pub trait BubbleEventListener {
    fn on_bubble_dismiss(&mut self, _timer: &TimerRef) {}

    fn on_bubble_click(&mut self, _timer: &TimerRef) {}

    fn on_timer_updated(&mut self, _timer: &TimerRef) {}

    fn on_timer_stopped(&mut self, _timer: &TimerRef) {}
}

/// Request to share a timer with a newly added friend
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShareRequest {
    pub timer: TimerRef,
    /// Full share set after the addition
    pub shared_with: BTreeSet<String>,
    /// Friend that was just added
    pub added: String,
}

/// Forwards share requests to whatever network layer the host uses
///
/// Delivery is asynchronous. The host reports the result back through
/// [`crate::OverlayWindow::share_delivered`] or
/// [`crate::OverlayWindow::share_failed`].
pub trait ShareRequester {
    fn request_share(&self, request: ShareRequest);
}
