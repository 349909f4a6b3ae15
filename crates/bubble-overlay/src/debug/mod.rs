//! Debug overlay: optional diagnostic panel mirroring touch and position data

mod format;
mod manager;

pub use format::{format_position_debug_info, format_touch_debug_info};
pub use manager::{Clock, DebugHandle, DebugOverlayManager, DEBUG_PLACEHOLDER};
