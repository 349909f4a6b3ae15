//! Bubble placement and screen bounds

mod positioner;

pub use positioner::Positioner;

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::math::{bubble_center, Size, Vec2};

/// Top-left anchor of a surface plus its measured size
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: Vec2,
    pub size: Size,
}

impl Placement {
    /// Create a placement
    #[inline]
    pub const fn new(position: Vec2, size: Size) -> Self {
        Self { position, size }
    }

    /// Centre of the placed surface
    #[inline]
    pub fn center(&self) -> Result<Vec2, GeometryError> {
        bubble_center(self.position, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_center() {
        let placement = Placement::new(Vec2::new(-32.0, 192.0), Size::new(160.0, 160.0));
        let center = placement.center().unwrap();
        assert!((center.x - 48.0).abs() < 0.001);
        assert!((center.y - 272.0).abs() < 0.001);
    }

    #[test]
    fn test_unmeasured_placement_has_no_center() {
        assert!(Placement::default().center().is_err());
    }
}
