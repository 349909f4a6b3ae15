//! Dismiss zone surface lifecycle and target queries

use std::rc::Rc;

use log::{debug, error, warn};

use crate::config::OverlayConfig;
use crate::error::PlatformError;
use crate::math::{Size, Vec2};
use crate::platform::{OverlayId, SurfaceId, SurfaceKind, WindowPlatform};
use crate::position::Placement;
use super::target::{default_layout, nearest, DismissTarget};

/// Owns the dismiss zone surface of one overlay window
///
/// The surface covers the whole raw display. Platform failures are logged and
/// leave the visibility flag unchanged.
pub struct DismissZoneManager {
    platform: Rc<dyn WindowPlatform>,
    config: Rc<OverlayConfig>,
    surface: SurfaceId,
    screen: Size,
    targets: Vec<DismissTarget>,
    showing: bool,
}

impl DismissZoneManager {
    /// Create a hidden dismiss zone laid out for the current display
    pub fn new(overlay: OverlayId, platform: Rc<dyn WindowPlatform>, config: Rc<OverlayConfig>) -> Self {
        let screen = platform.display_size();
        let targets = default_layout(&config, screen);
        Self {
            platform,
            config,
            surface: SurfaceId::new(overlay, SurfaceKind::DismissZone),
            screen,
            targets,
            showing: false,
        }
    }

    /// Attach the dismiss zone surface; no-op when already showing
    pub fn show(&mut self) {
        if self.showing {
            debug!("dismiss zone {} already showing", self.surface.overlay);
            return;
        }

        self.update_screen_dimensions();

        if self.platform.is_attached(self.surface) {
            warn!("dismiss zone {} has a stale surface, removing", self.surface.overlay);
            if let Err(e) = self.platform.remove_surface(self.surface) {
                error!("failed to remove stale dismiss zone: {}", e);
                return;
            }
        }

        match self.platform.add_surface(self.surface, self.placement()) {
            Ok(()) => {
                self.showing = true;
                debug!("dismiss zone {} shown", self.surface.overlay);
            }
            Err(e) => error!("failed to show dismiss zone: {}", e),
        }
    }

    /// Detach the dismiss zone surface; no-op when already hidden
    pub fn hide(&mut self) {
        if !self.showing {
            return;
        }

        match self.platform.remove_surface(self.surface) {
            Ok(()) => {
                self.showing = false;
                debug!("dismiss zone {} hidden", self.surface.overlay);
            }
            Err(PlatformError::NotAttached(_)) => {
                warn!("dismiss zone {} was already detached", self.surface.overlay);
                self.showing = false;
            }
            Err(e) => error!("failed to hide dismiss zone: {}", e),
        }
    }

    /// Closest configured target to `point`
    pub fn nearest_target(&self, point: Vec2) -> Option<DismissTarget> {
        let target = nearest(&self.targets, point);
        debug!("nearest dismiss target to {:?}: {:?}", point, target);
        target
    }

    /// Re-query the display, recompute the layout and re-apply the surface
    /// placement when showing
    pub fn refresh_layout(&mut self) {
        self.update_screen_dimensions();
        if self.showing {
            if let Err(e) = self.platform.update_placement(self.surface, self.placement()) {
                error!("failed to refresh dismiss zone layout: {}", e);
            }
        }
    }

    #[inline]
    pub fn is_showing(&self) -> bool {
        self.showing
    }

    #[inline]
    pub fn targets(&self) -> &[DismissTarget] {
        &self.targets
    }

    /// Raw display size the targets are laid out against
    #[inline]
    pub fn screen(&self) -> Size {
        self.screen
    }

    /// Hide the surface and drop all targets
    pub fn cleanup(&mut self) {
        self.hide();
        self.targets.clear();
    }

    fn update_screen_dimensions(&mut self) {
        let screen = self.platform.display_size();
        if screen.is_empty() {
            warn!("ignoring invalid display size {:?}", screen);
            return;
        }
        if screen != self.screen || self.targets.is_empty() {
            debug!("dismiss zone screen {:?} -> {:?}", self.screen, screen);
            self.screen = screen;
            self.targets = default_layout(&self.config, screen);
        }
    }

    fn placement(&self) -> Placement {
        Placement::new(Vec2::ZERO, self.screen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dismiss::DismissKind;
    use crate::testing::RecordingPlatform;

    fn setup() -> (Rc<RecordingPlatform>, DismissZoneManager) {
        let platform = Rc::new(RecordingPlatform::new(Size::new(1080.0, 1920.0)));
        let manager = DismissZoneManager::new(1, platform.clone(), Rc::new(OverlayConfig::default()));
        (platform, manager)
    }

    fn zone() -> SurfaceId {
        SurfaceId::new(1, SurfaceKind::DismissZone)
    }

    #[test]
    fn test_layout_ignores_bottom_inset() {
        let platform = Rc::new(RecordingPlatform::new(Size::new(1080.0, 1920.0)).with_bottom_inset(Some(300.0)));
        let mut manager = DismissZoneManager::new(1, platform, Rc::new(OverlayConfig::default()));
        manager.show();
        assert_eq!(manager.screen(), Size::new(1080.0, 1920.0));
        let stop = manager.targets().iter().find(|t| t.kind == DismissKind::Stop).unwrap();
        assert!((stop.center.y - 1640.0).abs() < 0.001);
    }

    #[test]
    fn test_show_is_idempotent() {
        let (platform, mut manager) = setup();
        manager.show();
        manager.show();
        assert!(manager.is_showing());
        assert!(platform.is_attached(zone()));
        assert_eq!(platform.add_count(zone()), 1);
    }

    #[test]
    fn test_hide_is_idempotent() {
        let (platform, mut manager) = setup();
        manager.hide();
        assert_eq!(platform.remove_count(zone()), 0);
        manager.show();
        manager.hide();
        manager.hide();
        assert!(!manager.is_showing());
        assert_eq!(platform.remove_count(zone()), 1);
    }

    #[test]
    fn test_show_removes_stale_surface_first() {
        let (platform, mut manager) = setup();
        platform.attach_externally(zone());
        manager.show();
        assert!(manager.is_showing());
        assert_eq!(platform.remove_count(zone()), 1);
        assert_eq!(platform.add_count(zone()), 1);
    }

    #[test]
    fn test_show_failure_is_swallowed() {
        let (platform, mut manager) = setup();
        platform.set_fail_adds(true);
        manager.show();
        assert!(!manager.is_showing());
    }

    #[test]
    fn test_nearest_target() {
        let (_platform, manager) = setup();
        let target = manager.nearest_target(Vec2::new(540.0, 1600.0)).unwrap();
        assert_eq!(target.kind, DismissKind::Stop);
    }

    #[test]
    fn test_refresh_layout_after_rotation() {
        let (platform, mut manager) = setup();
        manager.show();
        platform.set_display_size(Size::new(1920.0, 1080.0));
        manager.refresh_layout();

        let stop = manager.targets()[1];
        assert!((stop.center.x - 960.0).abs() < 0.001);
        assert!((stop.center.y - 800.0).abs() < 0.001);
        assert_eq!(platform.placement_of(zone()).unwrap().size, Size::new(1920.0, 1080.0));
    }

    #[test]
    fn test_cleanup_drops_targets() {
        let (platform, mut manager) = setup();
        manager.show();
        manager.cleanup();
        assert!(!manager.is_showing());
        assert!(!platform.is_attached(zone()));
        assert!(manager.targets().is_empty());
        assert!(manager.nearest_target(Vec2::ZERO).is_none());
    }
}
