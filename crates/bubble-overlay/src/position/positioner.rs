//! Screen bounds and placement rules for overlay bubbles

use std::rc::Rc;

use log::debug;

use crate::config::OverlayConfig;
use crate::error::GeometryError;
use crate::math::{distance, usable_screen_size, Size, Vec2};
use crate::platform::WindowPlatform;
use crate::widget::BubbleMode;
use super::Placement;

/// Computes initial and constrained bubble placements
///
/// Holds the usable screen size (display minus bottom system bars) derived
/// from the platform on the last [`Positioner::update_screen_dimensions`].
#[derive(Clone, Debug)]
pub struct Positioner {
    config: Rc<OverlayConfig>,
    usable: Size,
}

impl Positioner {
    /// Create a positioner and query the platform for screen bounds
    pub fn new(config: Rc<OverlayConfig>, platform: &dyn WindowPlatform) -> Result<Self, GeometryError> {
        let usable = usable_screen_size(platform.display_size(), platform.bottom_inset())?;
        Ok(Self { config, usable })
    }

    /// Re-query screen bounds, e.g. after a rotation
    ///
    /// On failure the previous bounds are kept.
    pub fn update_screen_dimensions(&mut self, platform: &dyn WindowPlatform) -> Result<Size, GeometryError> {
        let usable = usable_screen_size(platform.display_size(), platform.bottom_inset())?;
        if usable != self.usable {
            debug!("usable screen {:?} -> {:?}", self.usable, usable);
        }
        self.usable = usable;
        Ok(usable)
    }

    /// Cached usable screen size
    #[inline]
    pub fn usable_size(&self) -> Size {
        self.usable
    }

    /// Placement for a freshly opened bubble
    ///
    /// Expanded bubbles are centred. Small bubbles start at the left edge,
    /// offset down by a fraction of the usable height; the edge snap happens
    /// on first release.
    pub fn initial_placement(&self, bubble: Size, mode: BubbleMode) -> Result<Placement, GeometryError> {
        if bubble.is_empty() {
            return Err(GeometryError::InvalidArgument("bubble dimensions must be positive"));
        }
        let position = match mode {
            BubbleMode::Expanded => (self.usable.as_vec2() - bubble.as_vec2()) / 2.0,
            BubbleMode::Small => Vec2::new(0.0, self.usable.height * self.config.small_initial_offset_ratio),
        };
        Ok(Placement::new(position, bubble))
    }

    /// Clamp each axis so the surface stays on the usable screen
    pub fn constrain_to_screen(&self, position: Vec2, size: Size) -> Vec2 {
        let max = self.usable.as_vec2() - size.as_vec2();
        Vec2::new(position.x.min(max.x).max(0.0), position.y.min(max.y).max(0.0))
    }

    /// True when the surface lies fully on the usable screen
    pub fn is_position_valid(&self, position: Vec2, size: Size) -> bool {
        position.x >= 0.0
            && position.y >= 0.0
            && position.x + size.width <= self.usable.width
            && position.y + size.height <= self.usable.height
    }

    /// Screen point to surface-local coordinates
    #[inline]
    pub fn screen_to_overlay(screen: Vec2, placement: &Placement) -> Vec2 {
        screen - placement.position
    }

    /// Surface-local point to screen coordinates
    #[inline]
    pub fn overlay_to_screen(local: Vec2, placement: &Placement) -> Vec2 {
        local + placement.position
    }

    /// Distance from `point` to the centre of the placed bubble
    pub fn distance_from_center(point: Vec2, placement: &Placement) -> Result<f32, GeometryError> {
        Ok(distance(point, placement.center()?))
    }
}
