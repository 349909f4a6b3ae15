//! Dismiss targets and their screen layout

use serde::Serialize;

use crate::config::OverlayConfig;
use crate::math::{distance, Size, Vec2};

/// What releasing on a target does
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DismissKind {
    /// Hide the bubble, timer keeps running
    Dismiss,
    /// Stop the timer and hide the bubble
    Stop,
}

/// Drop target shown while a small bubble is dragged
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DismissTarget {
    pub center: Vec2,
    pub kind: DismissKind,
}

impl DismissTarget {
    #[inline]
    pub const fn new(center: Vec2, kind: DismissKind) -> Self {
        Self { center, kind }
    }
}

/// Standard layout: a dismiss target near the top edge and a stop target
/// near the bottom edge, both horizontally centred.
pub fn default_layout(config: &OverlayConfig, screen: Size) -> Vec<DismissTarget> {
    let inset = config.dismiss_target_margin + config.dismiss_target_radius;
    let x = screen.width / 2.0;
    vec![
        DismissTarget::new(Vec2::new(x, inset), DismissKind::Dismiss),
        DismissTarget::new(Vec2::new(x, screen.height - inset), DismissKind::Stop),
    ]
}

/// Target closest to `point`
pub fn nearest(targets: &[DismissTarget], point: Vec2) -> Option<DismissTarget> {
    targets
        .iter()
        .copied()
        .min_by(|a, b| distance(a.center, point).total_cmp(&distance(b.center, point)))
}
