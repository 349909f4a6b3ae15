//! Dismiss zone: drop targets that hide or stop a dragged bubble

mod manager;
mod target;

pub use manager::DismissZoneManager;
pub use target::{default_layout, nearest, DismissKind, DismissTarget};
