//! Floating Timer Bubble Overlay Engine
//!
//! This crate provides the interaction core of a floating-overlay timer:
//! - Drag and click disambiguation for timer bubbles
//! - Pull-to-target dismissal and stop gestures
//! - Edge snapping for small bubbles
//! - Screen bounds and placement rules
//! - An optional debug panel mirroring touch data
//!
//! ## Architecture
//!
//! The crate is organized into focused modules:
//!
//! - [`math`]: Geometry types (`Vec2`, `Size`) and pure placement math
//! - [`input`]: Gesture snapshot, button contract and the touch state machine
//! - [`position`]: Placement and the positioner
//! - [`dismiss`]: Dismiss targets and the dismiss zone surface
//! - [`debug`]: Debug panel surface and formatting
//! - [`overlay`]: Overlay windows and their registry
//! - [`platform`], [`widget`], [`listener`]: Seams to the host
//!
//! ## Example
//!
//! ```rust
//! use bubble_overlay::{snap_x, OverlayConfig};
//!
//! let config = OverlayConfig::default();
//! // Released left of the midpoint: hang 20% of the bubble past the left edge
//! assert_eq!(snap_x(&config, 100.0, 1080.0, 160.0).unwrap(), -32);
//! ```
//!
//! ## Design Principles
//!
//! 1. **No window system**: the host is reached only through [`WindowPlatform`]
//! 2. **Single-threaded core**: events for one bubble arrive serially; only the
//!    debug text crosses threads, through [`DebugHandle`]
//! 3. **Injected constants**: every threshold comes from [`OverlayConfig`]

pub mod config;
pub mod debug;
pub mod dismiss;
pub mod error;
pub mod input;
pub mod listener;
pub mod math;
pub mod overlay;
pub mod platform;
pub mod position;
pub mod widget;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export main types
pub use config::OverlayConfig;
pub use debug::{DebugHandle, DebugOverlayManager};
pub use dismiss::{DismissKind, DismissTarget, DismissZoneManager};
pub use error::{ConfigError, GeometryError, OverlayError, PlatformError, WidgetError};
pub use input::{BubbleButton, PointerAction, PointerEvent, TouchContext, TouchEventHandler, TouchKind, TouchState};
pub use listener::{BubbleEventListener, ShareRequest, ShareRequester, TouchEventListener};
pub use math::*;
pub use overlay::{OverlayManager, OverlayWindow};
pub use platform::{OverlayId, RenderDispatcher, RenderJob, SurfaceId, SurfaceKind, WindowPlatform};
pub use position::{Placement, Positioner};
pub use widget::{BubbleMode, TimerRef, TimerWidget};
