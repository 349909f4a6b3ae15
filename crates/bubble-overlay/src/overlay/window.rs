//! Overlay window: composition root for one bubble

use std::rc::Rc;
use std::sync::Arc;

use log::{debug, error, info, warn};

use crate::config::OverlayConfig;
use crate::debug::{DebugHandle, DebugOverlayManager};
use crate::dismiss::DismissZoneManager;
use crate::error::{OverlayError, PlatformError};
use crate::input::{PointerAction, PointerEvent, TouchContext, TouchEventHandler};
use crate::listener::{BubbleEventListener, ShareRequest, ShareRequester};
use crate::math::{snap_overlap, Size, Vec2};
use crate::platform::{OverlayId, RenderDispatcher, SurfaceId, SurfaceKind, WindowPlatform};
use crate::position::{Placement, Positioner};
use crate::widget::{BubbleMode, TimerRef, TimerWidget};
use super::relay::WindowRelay;

/// One floating timer bubble with its dismiss zone and debug panel
///
/// Owns the bubble placement and the widget. Pointer events go through
/// [`OverlayWindow::handle_pointer`]; intents surface on the installed
/// [`BubbleEventListener`].
pub struct OverlayWindow<W: TimerWidget> {
    id: OverlayId,
    platform: Rc<dyn WindowPlatform>,
    config: Rc<OverlayConfig>,
    widget: W,
    placement: Placement,
    positioner: Positioner,
    handler: TouchEventHandler,
    dismiss: DismissZoneManager,
    debug: DebugOverlayManager,
    listener: Option<Box<dyn BubbleEventListener>>,
    share: Option<Rc<dyn ShareRequester>>,
    open: bool,
}

impl<W: TimerWidget> OverlayWindow<W> {
    /// Build a closed overlay window at its initial placement
    ///
    /// Fails when the platform reports unusable screen bounds or the widget
    /// has not been measured.
    pub fn new(
        id: OverlayId,
        platform: Rc<dyn WindowPlatform>,
        mut widget: W,
        mode: BubbleMode,
        config: Rc<OverlayConfig>,
    ) -> Result<Self, OverlayError> {
        widget.set_mode(mode);

        let positioner = Positioner::new(config.clone(), platform.as_ref())?;
        widget.set_screen_dimensions(positioner.usable_size());
        let placement = positioner.initial_placement(widget.size(), mode)?;

        debug!(
            "overlay {} created: mode={:?} usable={:?} placement={:?}",
            id,
            mode,
            positioner.usable_size(),
            placement
        );

        Ok(Self {
            id,
            dismiss: DismissZoneManager::new(id, platform.clone(), config.clone()),
            debug: DebugOverlayManager::new(id, platform.clone()),
            handler: TouchEventHandler::new(config.clone()),
            platform,
            config,
            widget,
            placement,
            positioner,
            listener: None,
            share: None,
            open: false,
        })
    }

    #[inline]
    pub fn id(&self) -> OverlayId {
        self.id
    }

    #[inline]
    fn bubble_surface(&self) -> SurfaceId {
        SurfaceId::new(self.id, SurfaceKind::Bubble)
    }

    // === Lifecycle ===

    /// Attach the bubble surface; no-op when already open
    pub fn open(&mut self) {
        if self.open {
            debug!("overlay {} already open", self.id);
            return;
        }

        match self.platform.add_surface(self.bubble_surface(), self.placement) {
            Ok(()) => {
                self.open = true;
                info!("overlay {} opened at {:?}", self.id, self.placement.position);
            }
            Err(e) => error!("failed to open overlay {}: {}", self.id, e),
        }
    }

    /// Detach the bubble surface; no-op when already closed
    pub fn close(&mut self) {
        if !self.open {
            debug!("overlay {} already closed", self.id);
            return;
        }

        if self.handler.is_tracking() {
            debug!("overlay {} closing mid-gesture, cancelling", self.id);
            self.handle_pointer(PointerAction::Cancel, self.placement.position);
        }

        self.dismiss.hide();
        match self.platform.remove_surface(self.bubble_surface()) {
            Ok(()) | Err(PlatformError::NotAttached(_)) => {
                self.open = false;
                info!("overlay {} closed", self.id);
            }
            Err(e) => error!("failed to close overlay {}: {}", self.id, e),
        }
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Close the window and release its dismiss zone, debug panel and
    /// listeners
    pub fn cleanup(&mut self) {
        self.close();
        self.dismiss.cleanup();
        self.debug.cleanup();
        self.handler = TouchEventHandler::new(self.config.clone());
        self.listener = None;
        self.share = None;
        info!("overlay {} cleaned up", self.id);
    }

    // === Input ===

    /// Feed one pointer sample in screen coordinates
    ///
    /// Returns whether the event was consumed. Closed windows consume
    /// nothing.
    pub fn handle_pointer(&mut self, action: PointerAction, raw: Vec2) -> bool {
        if !self.open {
            return false;
        }

        let local = Positioner::screen_to_overlay(raw, &self.placement);
        let event = PointerEvent::new(action, raw, local);
        let surface = self.bubble_surface();
        let screen = self.positioner.usable_size();

        let mut relay = WindowRelay {
            debug: &mut self.debug,
            app: self.listener.as_mut(),
        };
        let mut ctx = TouchContext {
            widget: &mut self.widget,
            placement: &mut self.placement,
            dismiss: &mut self.dismiss,
            platform: self.platform.as_ref(),
            surface,
            screen,
            share: self.share.as_deref(),
            listener: &mut relay,
        };
        let consumed = self.handler.handle(&event, &mut ctx);

        // A debug toggle whose panel failed to attach leaves debug mode off
        if self.handler.is_debug_mode_enabled() != self.debug.is_debug_mode_enabled() {
            self.handler.set_debug_mode(self.debug.is_debug_mode_enabled());
        }
        consumed
    }

    /// True while a gesture is in progress
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.handler.is_tracking()
    }

    // === Collaborators ===

    pub fn set_listener(&mut self, listener: Box<dyn BubbleEventListener>) {
        self.listener = Some(listener);
        debug!("overlay {} listener set", self.id);
    }

    pub fn set_share_requester(&mut self, requester: Rc<dyn ShareRequester>) {
        self.share = Some(requester);
    }

    pub fn set_render_dispatcher(&mut self, dispatcher: Arc<dyn RenderDispatcher>) {
        self.debug.set_render_dispatcher(Some(dispatcher));
    }

    // === Timer ===

    /// Replace the timer the bubble renders
    pub fn update_timer(&mut self, timer: TimerRef) {
        debug!("overlay {} timer updated to {}", self.id, timer.id);
        self.widget.set_timer(timer);
    }

    // === Sharing ===

    /// The share behind `request` was rejected; drop its friend again
    ///
    /// Only `request.added` is removed. Returns whether the share set changed.
    pub fn share_failed(&mut self, request: &ShareRequest, reason: &str) -> bool {
        error!("sharing timer {} with {} failed: {}", request.timer.id, request.added, reason);
        self.revert_share(request)
    }

    /// The share behind `request` went through, except for `failed_users`
    ///
    /// Reverts the added friend when it is among the failed users.
    pub fn share_delivered(&mut self, request: &ShareRequest, failed_users: &[String]) -> bool {
        if failed_users.is_empty() {
            info!("timer {} shared with {}", request.timer.id, request.added);
            return false;
        }

        warn!("timer {} not shared with {:?}", request.timer.id, failed_users);
        if failed_users.contains(&request.added) {
            self.revert_share(request)
        } else {
            false
        }
    }

    fn revert_share(&mut self, request: &ShareRequest) -> bool {
        if request.timer.id != self.widget.timer().id {
            warn!(
                "overlay {} ignoring share result for timer {}",
                self.id, request.timer.id
            );
            return false;
        }

        let mut shared_with = self.widget.shared_with();
        if !shared_with.remove(&request.added) {
            debug!("{} already removed from sharing", request.added);
            return false;
        }

        self.widget.set_shared_with(shared_with);
        self.widget.refresh_menu_layout();
        warn!("reverted share with {}", request.added);
        if let Some(listener) = self.listener.as_mut() {
            listener.on_timer_updated(self.widget.timer());
        }
        true
    }

    #[inline]
    pub fn widget(&self) -> &W {
        &self.widget
    }

    #[inline]
    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    // === Placement ===

    #[inline]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Move the bubble anchor, e.g. to restore a saved position
    pub fn set_position(&mut self, position: Vec2) {
        self.placement.position = position;
        self.commit_placement();
    }

    /// Re-derive screen bounds after a rotation and pull the bubble back on
    /// screen if it no longer fits
    ///
    /// A small bubble hanging past a side edge by no more than the snap
    /// overlap keeps its x.
    pub fn refresh_layout(&mut self) {
        if let Err(e) = self.positioner.update_screen_dimensions(self.platform.as_ref()) {
            error!("overlay {} screen refresh failed: {}", self.id, e);
        }
        self.dismiss.refresh_layout();

        let usable = self.positioner.usable_size();
        self.widget.set_screen_dimensions(usable);

        let size = self.widget.size();
        if !size.is_empty() {
            self.placement.size = size;
        }

        let position = self.placement.position;
        if self.positioner.is_position_valid(position, size) {
            return;
        }

        let overlap = match self.widget.mode() {
            BubbleMode::Small => snap_overlap(&self.config, size.width).unwrap_or(0) as f32,
            BubbleMode::Expanded => 0.0,
        };
        let x_fits = position.x >= -overlap && position.x + size.width <= usable.width + overlap;

        let mut constrained = self.positioner.constrain_to_screen(position, size);
        if x_fits {
            constrained.x = position.x;
        }

        if constrained != position {
            debug!("overlay {} re-constrained {:?} -> {:?}", self.id, position, constrained);
            self.placement.position = constrained;
            self.commit_placement();
        }
    }

    /// Cached usable screen size
    #[inline]
    pub fn screen_size(&self) -> Size {
        self.positioner.usable_size()
    }

    // === Debug ===

    /// Enable or disable debug instrumentation and the debug panel together
    pub fn set_debug_mode(&mut self, enabled: bool) {
        self.debug.set_debug_mode(enabled);
        self.handler.set_debug_mode(self.debug.is_debug_mode_enabled());
        debug!("overlay {} debug mode set to {}", self.id, self.handler.is_debug_mode_enabled());
    }

    #[inline]
    pub fn is_debug_mode_enabled(&self) -> bool {
        self.handler.is_debug_mode_enabled()
    }

    #[inline]
    pub fn debug_overlay(&self) -> &DebugOverlayManager {
        &self.debug
    }

    /// Thread-safe writer for the debug panel
    pub fn debug_handle(&self) -> DebugHandle {
        self.debug.debug_handle()
    }

    #[inline]
    pub fn dismiss_zone(&self) -> &DismissZoneManager {
        &self.dismiss
    }

    fn commit_placement(&self) {
        if !self.open {
            return;
        }
        if let Err(e) = self.platform.update_placement(self.bubble_surface(), self.placement) {
            error!("failed to update overlay {} placement: {}", self.id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeTimerWidget, RecordingPlatform};

    fn window(mode: BubbleMode) -> (Rc<RecordingPlatform>, OverlayWindow<FakeTimerWidget>) {
        let platform = Rc::new(RecordingPlatform::new(Size::new(1080.0, 1920.0)));
        let widget = FakeTimerWidget::new(TimerRef::default(), Size::new(160.0, 160.0));
        let window = OverlayWindow::new(1, platform.clone(), widget, mode, Rc::new(OverlayConfig::default())).unwrap();
        (platform, window)
    }

    fn bubble() -> SurfaceId {
        SurfaceId::new(1, SurfaceKind::Bubble)
    }

    #[test]
    fn test_new_small_uses_initial_offset() {
        let (_platform, window) = window(BubbleMode::Small);
        let placement = window.placement();
        assert!((placement.position.x - 0.0).abs() < 0.001);
        assert!((placement.position.y - 192.0).abs() < 0.001);
        assert_eq!(window.widget().screen_dimensions(), Size::new(1080.0, 1920.0));
    }

    #[test]
    fn test_new_expanded_is_centred() {
        let (_platform, window) = window(BubbleMode::Expanded);
        let placement = window.placement();
        assert!((placement.position.x - 460.0).abs() < 0.001);
        assert!((placement.position.y - 880.0).abs() < 0.001);
        assert_eq!(window.widget().mode(), BubbleMode::Expanded);
    }

    #[test]
    fn test_new_rejects_unmeasured_widget() {
        let platform = Rc::new(RecordingPlatform::new(Size::new(1080.0, 1920.0)));
        let widget = FakeTimerWidget::new(TimerRef::default(), Size::ZERO);
        let result = OverlayWindow::new(1, platform, widget, BubbleMode::Small, Rc::new(OverlayConfig::default()));
        assert!(matches!(result, Err(OverlayError::Geometry(_))));
    }

    #[test]
    fn test_open_close_are_idempotent() {
        let (platform, mut window) = window(BubbleMode::Small);
        window.open();
        window.open();
        assert!(window.is_open());
        assert_eq!(platform.add_count(bubble()), 1);

        window.close();
        window.close();
        assert!(!window.is_open());
        assert_eq!(platform.remove_count(bubble()), 1);
    }

    #[test]
    fn test_closed_window_ignores_pointer() {
        let (_platform, mut window) = window(BubbleMode::Small);
        assert!(!window.handle_pointer(PointerAction::Down, Vec2::new(80.0, 272.0)));
    }

    #[test]
    fn test_update_timer_replaces_widget_timer() {
        let (_platform, mut window) = window(BubbleMode::Small);
        let timer = TimerRef::new("t2", "me", "Eggs", std::time::Duration::from_secs(420));
        window.update_timer(timer.clone());
        assert_eq!(window.widget().timer(), &timer);
    }

    #[test]
    fn test_refresh_layout_reconstrains_after_rotation() {
        let (platform, mut window) = window(BubbleMode::Expanded);
        window.open();
        window.set_position(Vec2::new(900.0, 1700.0));
        platform.set_display_size(Size::new(1920.0, 1080.0));
        window.refresh_layout();

        let placement = window.placement();
        assert!((placement.position.x - 900.0).abs() < 0.001);
        assert!((placement.position.y - 920.0).abs() < 0.001);
        assert_eq!(platform.placement_of(bubble()), Some(placement));
    }

    #[test]
    fn test_refresh_layout_keeps_left_snap_overhang() {
        let (platform, mut window) = window(BubbleMode::Small);
        window.open();
        window.set_position(Vec2::new(-32.0, 300.0));
        platform.set_bottom_inset(Some(100.0));
        window.refresh_layout();
        assert!((window.placement().position.x - (-32.0)).abs() < 0.001);
    }

    #[test]
    fn test_refresh_layout_pulls_back_right_overhang_after_rotation() {
        let (platform, mut window) = window(BubbleMode::Small);
        platform.set_display_size(Size::new(1920.0, 1080.0));
        window.refresh_layout();
        window.open();
        window.set_position(Vec2::new(1792.0, 300.0));

        platform.set_display_size(Size::new(1080.0, 1920.0));
        window.refresh_layout();
        assert!((window.placement().position.x - 920.0).abs() < 0.001);
        assert!((window.placement().position.y - 300.0).abs() < 0.001);
    }

    #[test]
    fn test_set_debug_mode_syncs_handler_and_panel() {
        let (platform, mut window) = window(BubbleMode::Small);
        window.set_debug_mode(true);
        assert!(window.is_debug_mode_enabled());
        assert!(window.debug_overlay().is_visible());
        assert!(platform.is_attached(SurfaceId::new(1, SurfaceKind::DebugOverlay)));
    }

    #[test]
    fn test_cleanup_detaches_everything() {
        let (platform, mut window) = window(BubbleMode::Small);
        window.open();
        window.set_debug_mode(true);
        window.cleanup();
        assert!(!window.is_open());
        assert!(!platform.is_attached(bubble()));
        assert!(!platform.is_attached(SurfaceId::new(1, SurfaceKind::DebugOverlay)));
        assert!(!window.is_debug_mode_enabled());
    }
}
