//! Touch input module
//!
//! Provides the gesture snapshot, button contract and the touch state machine
//! that drives bubble placement.

mod actions;
mod button;
mod event;
mod handler;
mod touch;

pub use button::{BubbleButton, SHARE_FRIEND_BASE, SHARE_FRIEND_LAST};
pub use event::{PointerAction, PointerEvent};
pub use handler::{TouchContext, TouchEventHandler};
pub use touch::{TouchKind, TouchState};
