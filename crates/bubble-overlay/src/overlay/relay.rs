//! Routes handler callbacks to the debug panel and the app listener

use log::{debug, info};

use crate::debug::DebugOverlayManager;
use crate::listener::{BubbleEventListener, TouchEventListener};
use crate::widget::TimerRef;

/// Per-event listener built by the overlay window
pub(super) struct WindowRelay<'a> {
    pub debug: &'a mut DebugOverlayManager,
    pub app: Option<&'a mut Box<dyn BubbleEventListener>>,
}

impl TouchEventListener for WindowRelay<'_> {
    fn on_bubble_click(&mut self, timer: &TimerRef) {
        info!("bubble {} clicked", timer.id);
        if let Some(app) = self.app.as_mut() {
            app.on_bubble_click(timer);
        }
    }

    fn on_bubble_dismiss(&mut self, timer: &TimerRef) {
        info!("bubble {} dismissed", timer.id);
        if let Some(app) = self.app.as_mut() {
            app.on_bubble_dismiss(timer);
        }
    }

    fn on_timer_stopped(&mut self, timer: &TimerRef) {
        info!("timer {} stopped", timer.id);
        if let Some(app) = self.app.as_mut() {
            app.on_timer_stopped(timer);
        }
    }

    fn on_timer_updated(&mut self, timer: &TimerRef) {
        debug!("timer {} updated", timer.id);
        if let Some(app) = self.app.as_mut() {
            app.on_timer_updated(timer);
        }
    }

    fn on_debug_info_update(&mut self, info: &str) {
        self.debug.update_text(info);
    }

    fn on_drag_state_changed(&mut self, is_dragging: bool) {
        debug!("drag state changed: {}", is_dragging);
    }

    fn on_debug_mode_changed(&mut self, enabled: bool) {
        self.debug.set_debug_mode(enabled);
    }
}
