//! Geometry types and pure placement math

mod vec2;
mod size;
mod geometry;

pub use vec2::Vec2;
pub use size::Size;
pub use geometry::{
    bubble_center, distance, is_left_side, is_within_action_threshold, is_within_pull_threshold,
    pull_to_position, snap_overlap, snap_x, usable_screen_size,
};
