//! Platform windowing seam
//!
//! The overlay engine never talks to a window system directly. Everything it
//! needs from the host goes through [`WindowPlatform`], and deferred work for
//! the rendering thread goes through [`RenderDispatcher`].
//!
//! # Implementations
//!
//! - **Mobile host**: wraps the system window manager's overlay layer
//! - **Replay tool**: logs each call and keeps an in-memory surface table
//! - **Tests**: [`crate::testing::RecordingPlatform`]

use serde::Serialize;

use crate::error::PlatformError;
use crate::math::Size;
use crate::position::Placement;

/// Overlay window identifier
pub type OverlayId = u64;

/// Which of an overlay's surfaces a platform call refers to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceKind {
    /// The timer bubble itself
    Bubble,
    /// Full-screen layer drawing the dismiss targets
    DismissZone,
    /// Diagnostic text panel
    DebugOverlay,
}

/// Platform surface identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SurfaceId {
    /// Owning overlay window
    pub overlay: OverlayId,
    /// Surface role within that overlay
    pub kind: SurfaceKind,
}

impl SurfaceId {
    /// Create a surface id
    #[inline]
    pub const fn new(overlay: OverlayId, kind: SurfaceKind) -> Self {
        Self { overlay, kind }
    }
}

/// Platform windowing primitive
///
/// All methods are synchronous and take `&self`; implementations keep their
/// own surface table behind interior mutability. Every call happens on the UI
/// thread.
pub trait WindowPlatform {
    // === Surfaces ===

    /// Attach a surface at the given placement
    ///
    /// # Returns
    /// * `Ok(())` - Surface attached
    /// * `Err(PlatformError::AlreadyAttached)` - Surface was already attached
    fn add_surface(&self, surface: SurfaceId, placement: Placement) -> Result<(), PlatformError>;

    /// Detach a surface
    ///
    /// # Returns
    /// * `Ok(())` - Surface detached
    /// * `Err(PlatformError::NotAttached)` - Surface was not attached
    fn remove_surface(&self, surface: SurfaceId) -> Result<(), PlatformError>;

    /// Move or resize an attached surface
    ///
    /// # Returns
    /// * `Ok(())` - Placement applied
    /// * `Err(PlatformError::NotAttached)` - Surface was not attached
    fn update_placement(&self, surface: SurfaceId, placement: Placement) -> Result<(), PlatformError>;

    /// Check whether a surface is currently attached
    fn is_attached(&self, surface: SurfaceId) -> bool;

    // === Display ===

    /// Raw display size in pixels
    fn display_size(&self) -> Size;

    /// Height of the bottom system bars, if the platform reports insets
    fn bottom_inset(&self) -> Option<f32> {
        None
    }

    // === Host app ===

    /// Bring the host application to the foreground
    fn open_host_app(&self) -> Result<(), PlatformError>;
}

/// Deferred job for the rendering thread
pub type RenderJob = Box<dyn FnOnce() + Send + 'static>;

/// Runs closures on the rendering thread
pub trait RenderDispatcher: Send + Sync {
    /// Queue `job` to run on the rendering thread
    fn post(&self, job: RenderJob);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_id_equality() {
        let a = SurfaceId::new(1, SurfaceKind::Bubble);
        let b = SurfaceId::new(1, SurfaceKind::Bubble);
        let c = SurfaceId::new(1, SurfaceKind::DismissZone);
        let d = SurfaceId::new(2, SurfaceKind::Bubble);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_surface_id_serializes() {
        let json = serde_json::to_string(&SurfaceId::new(7, SurfaceKind::DebugOverlay)).unwrap();
        assert_eq!(json, r#"{"overlay":7,"kind":"debug_overlay"}"#);
    }
}
