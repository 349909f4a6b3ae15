//! Overlay windows and their registry

mod manager;
mod relay;
mod window;

pub use manager::OverlayManager;
pub use window::OverlayWindow;
