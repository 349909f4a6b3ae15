//! Debug panel surface and its thread-safe text

use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, error, warn};

use crate::math::Vec2;
use crate::platform::{OverlayId, RenderDispatcher, SurfaceId, SurfaceKind, WindowPlatform};
use crate::position::Placement;

/// Text shown when the panel first appears
pub const DEBUG_PLACEHOLDER: &str = "Debug Mode: ENABLED";

/// Source of the `HH:MM:SS` timestamp prefixed to each update
pub type Clock = Arc<dyn Fn() -> String + Send + Sync>;

fn local_clock() -> Clock {
    Arc::new(|| chrono::Local::now().format("%H:%M:%S").to_string())
}

struct DebugShared {
    enabled: AtomicBool,
    text: Mutex<String>,
}

impl DebugShared {
    fn set_text(&self, text: String) {
        *self.text.lock().unwrap_or_else(PoisonError::into_inner) = text;
    }
}

/// Cloneable, thread-safe writer for the debug panel text
///
/// Updates are dropped while debug mode is off. With a render dispatcher
/// installed the text is replaced on the rendering thread.
#[derive(Clone)]
pub struct DebugHandle {
    shared: Arc<DebugShared>,
    dispatcher: Option<Arc<dyn RenderDispatcher>>,
    clock: Clock,
}

impl DebugHandle {
    /// Timestamp `info` and make it the panel text
    pub fn update_text(&self, info: &str) {
        if !self.is_enabled() {
            return;
        }

        let text = format!("[{}]\n{}", (self.clock)(), info);
        match &self.dispatcher {
            Some(dispatcher) => {
                let shared = Arc::clone(&self.shared);
                dispatcher.post(Box::new(move || shared.set_text(text)));
            }
            None => self.shared.set_text(text),
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.shared.enabled.load(Ordering::Acquire)
    }

    /// Current panel text
    pub fn text(&self) -> String {
        self.shared.text.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

/// Owns the debug panel surface of one overlay window
pub struct DebugOverlayManager {
    platform: Rc<dyn WindowPlatform>,
    surface: SurfaceId,
    handle: DebugHandle,
    visible: bool,
}

impl DebugOverlayManager {
    /// Create a disabled debug panel using the local wall clock
    pub fn new(overlay: OverlayId, platform: Rc<dyn WindowPlatform>) -> Self {
        Self {
            platform,
            surface: SurfaceId::new(overlay, SurfaceKind::DebugOverlay),
            handle: DebugHandle {
                shared: Arc::new(DebugShared {
                    enabled: AtomicBool::new(false),
                    text: Mutex::new(String::new()),
                }),
                dispatcher: None,
                clock: local_clock(),
            },
            visible: false,
        }
    }

    /// Replace the timestamp source
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.handle.clock = clock;
        self
    }

    /// Install or remove the render dispatcher
    ///
    /// Handles obtained earlier keep the dispatcher they were created with.
    pub fn set_render_dispatcher(&mut self, dispatcher: Option<Arc<dyn RenderDispatcher>>) {
        self.handle.dispatcher = dispatcher;
    }

    /// Enable or disable debug mode; no-op when unchanged
    ///
    /// Debug mode stays off when the panel surface cannot be attached.
    pub fn set_debug_mode(&mut self, enabled: bool) {
        if self.is_debug_mode_enabled() == enabled {
            return;
        }

        if enabled {
            if !self.show() {
                warn!("debug mode for overlay {} not enabled: panel unavailable", self.surface.overlay);
                return;
            }
            self.handle.shared.enabled.store(true, Ordering::Release);
            self.update_text(DEBUG_PLACEHOLDER);
        } else {
            self.handle.shared.enabled.store(false, Ordering::Release);
            self.hide();
        }
        debug!("debug mode for overlay {} set to {}", self.surface.overlay, enabled);
    }

    /// Flip debug mode and return the resulting state
    pub fn toggle_debug_mode(&mut self) -> bool {
        self.set_debug_mode(!self.is_debug_mode_enabled());
        self.is_debug_mode_enabled()
    }

    #[inline]
    pub fn is_debug_mode_enabled(&self) -> bool {
        self.handle.is_enabled()
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn update_text(&self, info: &str) {
        self.handle.update_text(info);
    }

    /// Send-able writer sharing this panel's text
    pub fn debug_handle(&self) -> DebugHandle {
        self.handle.clone()
    }

    /// Current panel text
    pub fn text(&self) -> String {
        self.handle.text()
    }

    /// Hide the panel surface
    pub fn cleanup(&mut self) {
        self.hide();
        debug!("debug overlay {} cleaned up", self.surface.overlay);
    }

    /// Attach the panel surface; returns whether it is visible afterwards
    fn show(&mut self) -> bool {
        if self.visible {
            return true;
        }

        if self.platform.is_attached(self.surface) {
            if let Err(e) = self.platform.remove_surface(self.surface) {
                error!("failed to remove stale debug overlay: {}", e);
                return false;
            }
        }

        let placement = Placement::new(Vec2::ZERO, self.platform.display_size());
        match self.platform.add_surface(self.surface, placement) {
            Ok(()) => self.visible = true,
            Err(e) => error!("failed to show debug overlay: {}", e),
        }
        self.visible
    }

    fn hide(&mut self) {
        if !self.visible {
            return;
        }

        match self.platform.remove_surface(self.surface) {
            Ok(()) => self.visible = false,
            Err(e) => error!("failed to hide debug overlay: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Size;
    use crate::testing::{QueueDispatcher, RecordingPlatform};

    fn fixed_clock() -> Clock {
        Arc::new(|| "12:34:56".to_string())
    }

    fn setup() -> (Rc<RecordingPlatform>, DebugOverlayManager) {
        let platform = Rc::new(RecordingPlatform::new(Size::new(1080.0, 1920.0)));
        let manager = DebugOverlayManager::new(4, platform.clone()).with_clock(fixed_clock());
        (platform, manager)
    }

    fn panel() -> SurfaceId {
        SurfaceId::new(4, SurfaceKind::DebugOverlay)
    }

    #[test]
    fn test_enable_shows_placeholder() {
        let (platform, mut manager) = setup();
        manager.set_debug_mode(true);
        assert!(manager.is_visible());
        assert!(platform.is_attached(panel()));
        assert_eq!(manager.text(), "[12:34:56]\nDebug Mode: ENABLED");
    }

    #[test]
    fn test_disable_hides_and_freezes_text() {
        let (platform, mut manager) = setup();
        manager.set_debug_mode(true);
        manager.set_debug_mode(false);
        let before = manager.text();
        manager.update_text("late event");
        assert!(!manager.is_visible());
        assert!(!platform.is_attached(panel()));
        assert_eq!(manager.text(), before);
    }

    #[test]
    fn test_set_debug_mode_unchanged_is_noop() {
        let (platform, mut manager) = setup();
        manager.set_debug_mode(false);
        assert_eq!(platform.add_count(panel()), 0);
        manager.set_debug_mode(true);
        manager.set_debug_mode(true);
        assert_eq!(platform.add_count(panel()), 1);
    }

    #[test]
    fn test_failed_show_leaves_debug_mode_off() {
        let (platform, mut manager) = setup();
        platform.set_fail_adds(true);
        manager.set_debug_mode(true);
        assert!(!manager.is_debug_mode_enabled());
        assert!(!manager.is_visible());
        manager.debug_handle().update_text("dropped");
        assert_eq!(manager.text(), "");
        assert!(!manager.toggle_debug_mode());

        platform.set_fail_adds(false);
        assert!(manager.toggle_debug_mode());
        assert!(platform.is_attached(panel()));
    }

    #[test]
    fn test_update_text_ignored_when_disabled() {
        let (_platform, manager) = setup();
        manager.update_text("ignored");
        assert_eq!(manager.text(), "");
    }

    #[test]
    fn test_toggle_returns_new_state() {
        let (_platform, mut manager) = setup();
        assert!(manager.toggle_debug_mode());
        assert!(manager.is_debug_mode_enabled());
        assert!(!manager.toggle_debug_mode());
        assert!(!manager.is_visible());
    }

    #[test]
    fn test_update_is_deferred_through_dispatcher() {
        let (_platform, mut manager) = setup();
        let dispatcher = Arc::new(QueueDispatcher::new());
        manager.set_render_dispatcher(Some(dispatcher.clone()));
        manager.set_debug_mode(true);
        assert_eq!(manager.text(), "");
        assert_eq!(dispatcher.pending(), 1);

        dispatcher.run_pending();
        assert_eq!(manager.text(), "[12:34:56]\nDebug Mode: ENABLED");
    }

    #[test]
    fn test_handle_updates_from_another_thread() {
        let (_platform, mut manager) = setup();
        manager.set_debug_mode(true);
        let handle = manager.debug_handle();
        std::thread::spawn(move || handle.update_text("share complete"))
            .join()
            .unwrap();
        assert_eq!(manager.text(), "[12:34:56]\nshare complete");
    }

    #[test]
    fn test_cleanup_hides_panel() {
        let (platform, mut manager) = setup();
        manager.set_debug_mode(true);
        manager.cleanup();
        assert!(!platform.is_attached(panel()));
    }

    #[test]
    fn test_default_clock_format() {
        let stamp = local_clock()();
        assert_eq!(stamp.len(), 8);
        assert_eq!(stamp.as_bytes()[2], b':');
        assert_eq!(stamp.as_bytes()[5], b':');
    }
}
