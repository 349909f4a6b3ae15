//! Listener and share requester doubles

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use crate::listener::{BubbleEventListener, ShareRequest, ShareRequester, TouchEventListener};
use crate::widget::TimerRef;

/// One listener callback
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "value", rename_all = "snake_case")]
pub enum ListenerEvent {
    BubbleClick,
    BubbleDismiss,
    TimerStopped,
    TimerUpdated,
    DebugInfo(String),
    DragStateChanged(bool),
    DebugModeChanged(bool),
}

/// Records callbacks into a shared log
///
/// Clones share the log, so one clone can be boxed into an overlay window while
/// the test keeps another.
#[derive(Clone, Default)]
pub struct RecordingListener {
    events: Rc<RefCell<Vec<ListenerEvent>>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the callbacks received so far
    pub fn events(&self) -> Vec<ListenerEvent> {
        self.events.borrow().clone()
    }

    /// Number of times `event` was received
    pub fn count(&self, event: &ListenerEvent) -> usize {
        self.events.borrow().iter().filter(|e| *e == event).count()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    fn push(&self, event: ListenerEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl TouchEventListener for RecordingListener {
    fn on_bubble_click(&mut self, _timer: &TimerRef) {
        self.push(ListenerEvent::BubbleClick);
    }

    fn on_bubble_dismiss(&mut self, _timer: &TimerRef) {
        self.push(ListenerEvent::BubbleDismiss);
    }

    fn on_timer_stopped(&mut self, _timer: &TimerRef) {
        self.push(ListenerEvent::TimerStopped);
    }

    fn on_timer_updated(&mut self, _timer: &TimerRef) {
        self.push(ListenerEvent::TimerUpdated);
    }

    fn on_debug_info_update(&mut self, info: &str) {
        self.push(ListenerEvent::DebugInfo(info.to_string()));
    }

    fn on_drag_state_changed(&mut self, is_dragging: bool) {
        self.push(ListenerEvent::DragStateChanged(is_dragging));
    }

    fn on_debug_mode_changed(&mut self, enabled: bool) {
        self.push(ListenerEvent::DebugModeChanged(enabled));
    }
}

impl BubbleEventListener for RecordingListener {
    fn on_bubble_dismiss(&mut self, _timer: &TimerRef) {
        self.push(ListenerEvent::BubbleDismiss);
    }

    fn on_bubble_click(&mut self, _timer: &TimerRef) {
        self.push(ListenerEvent::BubbleClick);
    }

    fn on_timer_updated(&mut self, _timer: &TimerRef) {
        self.push(ListenerEvent::TimerUpdated);
    }

    fn on_timer_stopped(&mut self, _timer: &TimerRef) {
        self.push(ListenerEvent::TimerStopped);
    }
}

/// Keeps every share request it receives
#[derive(Default)]
pub struct RecordingShareRequester {
    requests: RefCell<Vec<ShareRequest>>,
}

impl RecordingShareRequester {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<ShareRequest> {
        self.requests.borrow().clone()
    }
}

impl ShareRequester for RecordingShareRequester {
    fn request_share(&self, request: ShareRequest) {
        self.requests.borrow_mut().push(request);
    }
}
