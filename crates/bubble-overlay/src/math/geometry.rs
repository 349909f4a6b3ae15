//! Pure placement math: distances, centring, pull-to-target and edge snapping
//!
//! Nothing here holds state. Thresholds and ratios are read from the injected
//! [`OverlayConfig`].

use crate::config::OverlayConfig;
use crate::error::GeometryError;
use super::{Size, Vec2};

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Centre of a bubble whose top-left corner sits at `corner`
pub fn bubble_center(corner: Vec2, size: Size) -> Result<Vec2, GeometryError> {
    if size.is_empty() {
        return Err(GeometryError::InvalidArgument("bubble dimensions must be positive"));
    }
    Ok(corner + size.as_vec2() / 2.0)
}

/// Anchor that centres the bubble on `target`, clamped to the screen.
///
/// The current anchor does not influence the result.
pub fn pull_to_position(
    _current: Vec2,
    target: Vec2,
    bubble: Size,
    screen: Size,
) -> Result<Vec2, GeometryError> {
    if bubble.is_empty() {
        return Err(GeometryError::InvalidArgument("bubble dimensions must be positive"));
    }
    if screen.is_empty() {
        return Err(GeometryError::InvalidArgument("screen dimensions must be positive"));
    }

    let centred = target - bubble.as_vec2() / 2.0;
    let max_x = screen.width - bubble.width;
    let max_y = screen.height - bubble.height;

    Ok(Vec2::new(
        centred.x.min(max_x).max(0.0),
        centred.y.min(max_y).max(0.0),
    ))
}

/// True when `a` and `b` are closer than the pull threshold
#[inline]
pub fn is_within_pull_threshold(config: &OverlayConfig, a: Vec2, b: Vec2) -> bool {
    distance(a, b) < config.pull_threshold
}

/// True when `a` and `b` are closer than the action threshold (exclusive)
#[inline]
pub fn is_within_action_threshold(config: &OverlayConfig, a: Vec2, b: Vec2) -> bool {
    distance(a, b) < config.action_threshold
}

/// Width of the bubble left hanging past the screen edge after a snap
pub fn snap_overlap(config: &OverlayConfig, bubble_width: f32) -> Result<i32, GeometryError> {
    if bubble_width <= 0.0 {
        return Err(GeometryError::InvalidArgument("bubble width must be positive"));
    }
    Ok((bubble_width * config.snap_overlap_ratio).round() as i32)
}

/// True when `touch_x` lies strictly left of the screen midpoint
pub fn is_left_side(touch_x: f32, screen_width: f32) -> Result<bool, GeometryError> {
    if screen_width <= 0.0 {
        return Err(GeometryError::InvalidArgument("screen width must be positive"));
    }
    Ok(touch_x < screen_width / 2.0)
}

/// Anchor x for snapping to the nearer screen edge.
///
/// The exact midpoint snaps right.
pub fn snap_x(
    config: &OverlayConfig,
    touch_x: f32,
    screen_width: f32,
    bubble_width: f32,
) -> Result<i32, GeometryError> {
    let overlap = snap_overlap(config, bubble_width)?;
    if is_left_side(touch_x, screen_width)? {
        Ok(-overlap)
    } else {
        Ok((screen_width - bubble_width).round() as i32 + overlap)
    }
}

/// Screen area left for overlays once the bottom system bars are removed.
///
/// Width is never reduced. Without inset data the raw size is returned.
pub fn usable_screen_size(raw: Size, bottom_inset: Option<f32>) -> Result<Size, GeometryError> {
    if raw.is_empty() {
        return Err(GeometryError::InvalidArgument("screen dimensions must be positive"));
    }
    match bottom_inset {
        Some(inset) if inset < 0.0 => {
            Err(GeometryError::InvalidArgument("system bar inset cannot be negative"))
        }
        Some(inset) => Ok(Size::new(raw.width, raw.height - inset)),
        None => Ok(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> OverlayConfig {
        OverlayConfig::default()
    }

    #[test]
    fn test_bubble_center() {
        let center = bubble_center(Vec2::new(100.0, 200.0), Size::new(160.0, 120.0)).unwrap();
        assert!((center.x - 180.0).abs() < 0.001);
        assert!((center.y - 260.0).abs() < 0.001);
    }

    #[test]
    fn test_bubble_center_holds_across_sizes() {
        for (x, y, w, h) in [(0.0, 0.0, 1.0, 1.0), (-40.0, 15.0, 161.0, 99.0), (900.0, 1700.0, 400.0, 400.0)] {
            let center = bubble_center(Vec2::new(x, y), Size::new(w, h)).unwrap();
            assert!((center.x - (x + w / 2.0)).abs() < 0.001);
            assert!((center.y - (y + h / 2.0)).abs() < 0.001);
        }
    }

    #[test]
    fn test_bubble_center_rejects_empty_size() {
        assert!(bubble_center(Vec2::ZERO, Size::new(0.0, 10.0)).is_err());
        assert!(bubble_center(Vec2::ZERO, Size::new(10.0, -5.0)).is_err());
    }

    #[test]
    fn test_action_threshold_is_exclusive() {
        let c = config();
        let origin = Vec2::ZERO;
        assert!(is_within_action_threshold(&c, origin, Vec2::new(49.9, 0.0)));
        assert!(!is_within_action_threshold(&c, origin, Vec2::new(50.0, 0.0)));
        assert!(!is_within_action_threshold(&c, origin, Vec2::new(30.0, 40.0)));
        assert!(is_within_action_threshold(&c, origin, Vec2::new(29.0, 40.0)));
    }

    #[test]
    fn test_pull_threshold_is_exclusive() {
        let c = config();
        assert!(is_within_pull_threshold(&c, Vec2::ZERO, Vec2::new(199.0, 0.0)));
        assert!(!is_within_pull_threshold(&c, Vec2::ZERO, Vec2::new(120.0, 160.0)));
    }

    #[test]
    fn test_thresholds_follow_injected_config() {
        let c = OverlayConfig {
            action_threshold: 10.0,
            ..OverlayConfig::default()
        };
        assert!(!is_within_action_threshold(&c, Vec2::ZERO, Vec2::new(20.0, 0.0)));
    }

    #[test]
    fn test_pull_to_position_centres_on_target() {
        let pos = pull_to_position(
            Vec2::new(10.0, 10.0),
            Vec2::new(540.0, 1640.0),
            Size::new(160.0, 160.0),
            Size::new(1080.0, 1920.0),
        )
        .unwrap();
        assert!((pos.x - 460.0).abs() < 0.001);
        assert!((pos.y - 1560.0).abs() < 0.001);
    }

    #[test]
    fn test_pull_to_position_clamps_to_screen() {
        let bubble = Size::new(160.0, 160.0);
        let screen = Size::new(1080.0, 1920.0);
        for target in [
            Vec2::new(-500.0, -500.0),
            Vec2::new(5000.0, 5000.0),
            Vec2::new(10.0, 1915.0),
            Vec2::new(1075.0, 3.0),
        ] {
            let pos = pull_to_position(Vec2::ZERO, target, bubble, screen).unwrap();
            assert!(pos.x >= 0.0 && pos.x <= screen.width - bubble.width);
            assert!(pos.y >= 0.0 && pos.y <= screen.height - bubble.height);
        }
    }

    #[test]
    fn test_pull_to_position_rejects_empty_sizes() {
        assert!(pull_to_position(Vec2::ZERO, Vec2::ZERO, Size::ZERO, Size::new(10.0, 10.0)).is_err());
        assert!(pull_to_position(Vec2::ZERO, Vec2::ZERO, Size::new(10.0, 10.0), Size::new(0.0, 10.0)).is_err());
    }

    #[test]
    fn test_snap_x_left_side() {
        let x = snap_x(&config(), 100.0, 1080.0, 160.0).unwrap();
        assert_eq!(x, -32);
    }

    #[test]
    fn test_snap_x_right_side() {
        let x = snap_x(&config(), 900.0, 1080.0, 160.0).unwrap();
        assert_eq!(x, 1080 - 160 + 32);
    }

    #[test]
    fn test_snap_x_midpoint_goes_right() {
        let x = snap_x(&config(), 540.0, 1080.0, 160.0).unwrap();
        assert_eq!(x, 952);
        assert!(!is_left_side(540.0, 1080.0).unwrap());
        assert!(is_left_side(539.9, 1080.0).unwrap());
    }

    #[test]
    fn test_snap_overlap_rounds() {
        let c = config();
        assert_eq!(snap_overlap(&c, 160.0).unwrap(), 32);
        assert_eq!(snap_overlap(&c, 243.0).unwrap(), 49);
        assert!(snap_overlap(&c, 0.0).is_err());
    }

    #[test]
    fn test_snap_x_rejects_bad_widths() {
        assert!(snap_x(&config(), 10.0, 0.0, 160.0).is_err());
        assert!(snap_x(&config(), 10.0, 1080.0, -1.0).is_err());
    }

    #[test]
    fn test_usable_screen_size_subtracts_bottom_inset() {
        let size = usable_screen_size(Size::new(1080.0, 1920.0), Some(120.0)).unwrap();
        assert!((size.width - 1080.0).abs() < 0.001);
        assert!((size.height - 1800.0).abs() < 0.001);
    }

    #[test]
    fn test_usable_screen_size_fallback_without_insets() {
        let size = usable_screen_size(Size::new(1920.0, 1200.0), None).unwrap();
        assert_eq!(size, Size::new(1920.0, 1200.0));
    }

    #[test]
    fn test_usable_screen_size_rejects_invalid() {
        assert!(usable_screen_size(Size::new(0.0, 1920.0), Some(0.0)).is_err());
        assert!(usable_screen_size(Size::new(1080.0, 1920.0), Some(-1.0)).is_err());
    }
}
