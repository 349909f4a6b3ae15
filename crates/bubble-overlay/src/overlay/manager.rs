//! Registry of overlay windows, one per displayed timer

use std::collections::HashMap;
use std::rc::Rc;

use log::{debug, info};

use crate::config::OverlayConfig;
use crate::error::OverlayError;
use crate::input::PointerAction;
use crate::listener::ShareRequest;
use crate::math::Vec2;
use crate::platform::{OverlayId, WindowPlatform};
use crate::widget::{BubbleMode, TimerWidget};
use super::OverlayWindow;

/// Overlay manager handling window creation, lookup and teardown
pub struct OverlayManager<W: TimerWidget> {
    platform: Rc<dyn WindowPlatform>,
    config: Rc<OverlayConfig>,
    /// All windows by ID
    windows: HashMap<OverlayId, OverlayWindow<W>>,
    /// Next window ID
    next_id: OverlayId,
}

impl<W: TimerWidget> OverlayManager<W> {
    pub fn new(platform: Rc<dyn WindowPlatform>, config: Rc<OverlayConfig>) -> Self {
        Self {
            platform,
            config,
            windows: HashMap::new(),
            next_id: 1,
        }
    }

    /// Create a closed overlay window for `widget`
    pub fn create(&mut self, widget: W, mode: BubbleMode) -> Result<OverlayId, OverlayError> {
        let id = self.next_id;
        let window = OverlayWindow::new(id, self.platform.clone(), widget, mode, self.config.clone())?;
        self.next_id += 1;
        self.windows.insert(id, window);
        debug!("overlay {} registered", id);
        Ok(id)
    }

    /// Create an overlay window and open it
    pub fn open(&mut self, widget: W, mode: BubbleMode) -> Result<OverlayId, OverlayError> {
        let id = self.create(widget, mode)?;
        if let Some(window) = self.windows.get_mut(&id) {
            window.open();
        }
        Ok(id)
    }

    pub fn get(&self, id: OverlayId) -> Option<&OverlayWindow<W>> {
        self.windows.get(&id)
    }

    pub fn get_mut(&mut self, id: OverlayId) -> Option<&mut OverlayWindow<W>> {
        self.windows.get_mut(&id)
    }

    /// Window showing the timer with `timer_id`
    pub fn find_by_timer(&self, timer_id: &str) -> Option<OverlayId> {
        self.windows
            .iter()
            .find(|(_, window)| window.widget().timer().id == timer_id)
            .map(|(id, _)| *id)
    }

    /// Route a pointer sample to one window
    pub fn handle_pointer(&mut self, id: OverlayId, action: PointerAction, raw: Vec2) -> bool {
        match self.windows.get_mut(&id) {
            Some(window) => window.handle_pointer(action, raw),
            None => false,
        }
    }

    /// Route a failed share to the window showing its timer
    pub fn share_failed(&mut self, request: &ShareRequest, reason: &str) -> bool {
        match self.find_by_timer(&request.timer.id) {
            Some(id) => self.windows.get_mut(&id).is_some_and(|w| w.share_failed(request, reason)),
            None => false,
        }
    }

    /// Clean up and drop a window; returns whether it existed
    pub fn close(&mut self, id: OverlayId) -> bool {
        match self.windows.remove(&id) {
            Some(mut window) => {
                window.cleanup();
                info!("overlay {} removed", id);
                true
            }
            None => false,
        }
    }

    /// Refresh every window after a screen change
    pub fn refresh_layout_all(&mut self) {
        for window in self.windows.values_mut() {
            window.refresh_layout();
        }
    }

    /// Clean up and drop every window
    pub fn cleanup_all(&mut self) {
        for (_, mut window) in self.windows.drain() {
            window.cleanup();
        }
        info!("all overlays cleaned up");
    }

    /// IDs of all registered windows, ascending
    pub fn ids(&self) -> Vec<OverlayId> {
        let mut ids: Vec<OverlayId> = self.windows.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Size;
    use crate::platform::{SurfaceId, SurfaceKind};
    use crate::testing::{FakeTimerWidget, RecordingPlatform};
    use crate::widget::TimerRef;
    use std::collections::BTreeSet;
    use std::time::Duration;

    fn manager() -> (Rc<RecordingPlatform>, OverlayManager<FakeTimerWidget>) {
        let platform = Rc::new(RecordingPlatform::new(Size::new(1080.0, 1920.0)));
        let manager = OverlayManager::new(platform.clone(), Rc::new(OverlayConfig::default()));
        (platform, manager)
    }

    fn widget(id: &str) -> FakeTimerWidget {
        FakeTimerWidget::new(TimerRef::new(id, "me", id, Duration::from_secs(60)), Size::new(160.0, 160.0))
    }

    #[test]
    fn test_open_assigns_sequential_ids() {
        let (platform, mut manager) = manager();
        let a = manager.open(widget("a"), BubbleMode::Small).unwrap();
        let b = manager.open(widget("b"), BubbleMode::Expanded).unwrap();
        assert_eq!((a, b), (1, 2));
        assert_eq!(manager.ids(), vec![1, 2]);
        assert!(platform.is_attached(SurfaceId::new(2, SurfaceKind::Bubble)));
    }

    #[test]
    fn test_failed_create_does_not_consume_id() {
        let (_platform, mut manager) = manager();
        let bad = FakeTimerWidget::new(TimerRef::default(), Size::ZERO);
        assert!(manager.create(bad, BubbleMode::Small).is_err());
        assert_eq!(manager.create(widget("a"), BubbleMode::Small).unwrap(), 1);
    }

    #[test]
    fn test_find_by_timer() {
        let (_platform, mut manager) = manager();
        manager.create(widget("a"), BubbleMode::Small).unwrap();
        let b = manager.create(widget("b"), BubbleMode::Small).unwrap();
        assert_eq!(manager.find_by_timer("b"), Some(b));
        assert_eq!(manager.find_by_timer("zzz"), None);
    }

    #[test]
    fn test_share_failed_routes_by_timer() {
        let (_platform, mut manager) = manager();
        manager.create(widget("a"), BubbleMode::Small).unwrap();
        let b = manager.create(widget("b"), BubbleMode::Small).unwrap();
        let shared: BTreeSet<String> = BTreeSet::from(["Ada".to_string()]);
        manager.get_mut(b).unwrap().widget_mut().set_shared_with(shared.clone());

        let request = ShareRequest {
            timer: manager.get(b).unwrap().widget().timer().clone(),
            shared_with: shared,
            added: "Ada".to_string(),
        };
        assert!(manager.share_failed(&request, "timeout"));
        assert!(manager.get(b).unwrap().widget().shared_with().is_empty());

        let stray = ShareRequest {
            timer: TimerRef::new("gone", "me", "gone", Duration::from_secs(1)),
            ..request
        };
        assert!(!manager.share_failed(&stray, "timeout"));
    }

    #[test]
    fn test_handle_pointer_unknown_id() {
        let (_platform, mut manager) = manager();
        assert!(!manager.handle_pointer(9, PointerAction::Down, Vec2::ZERO));
    }

    #[test]
    fn test_close_detaches_and_removes() {
        let (platform, mut manager) = manager();
        let id = manager.open(widget("a"), BubbleMode::Small).unwrap();
        assert!(manager.close(id));
        assert!(!manager.close(id));
        assert!(manager.is_empty());
        assert!(!platform.is_attached(SurfaceId::new(id, SurfaceKind::Bubble)));
    }

    #[test]
    fn test_cleanup_all() {
        let (platform, mut manager) = manager();
        manager.open(widget("a"), BubbleMode::Small).unwrap();
        manager.open(widget("b"), BubbleMode::Small).unwrap();
        manager.cleanup_all();
        assert_eq!(manager.len(), 0);
        assert!(!platform.is_attached(SurfaceId::new(1, SurfaceKind::Bubble)));
        assert!(!platform.is_attached(SurfaceId::new(2, SurfaceKind::Bubble)));
    }
}
