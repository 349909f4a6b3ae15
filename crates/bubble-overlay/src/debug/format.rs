//! Standard debug panel texts

use crate::input::TouchState;
use crate::math::{Size, Vec2};
use crate::position::Placement;

/// Multi-line description of one pointer sample
pub fn format_touch_debug_info(action: &str, raw: Vec2, local: Vec2, touch: &TouchState) -> String {
    let delta = touch.delta();
    format!(
        "=== {} ===\nRaw: [{:.1},{:.1}]\nLocal: [{:.1},{:.1}]\nDelta: [{:.1},{:.1}]\nType: {:?}\nDistance: {:.1}px\n",
        action,
        raw.x,
        raw.y,
        local.x,
        local.y,
        delta.x,
        delta.y,
        touch.kind(),
        touch.total_distance()
    )
}

/// Multi-line description of a bubble placement on screen
pub fn format_position_debug_info(placement: &Placement, screen: Size) -> String {
    let pos = placement.position;
    let size = placement.size;
    let center = pos + size.as_vec2() / 2.0;
    format!(
        "=== Position Info ===\nOverlay: [{:.0},{:.0}]\nScreen: {:.0}x{:.0}\nView: {:.0}x{:.0}\nCenter: [{:.0},{:.0}]\n",
        pos.x, pos.y, screen.width, screen.height, size.width, size.height, center.x, center.y
    )
}
