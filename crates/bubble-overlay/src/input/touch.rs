//! Immutable snapshot of one in-progress gesture

use serde::Serialize;

use crate::math::Vec2;

/// Gesture classification
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchKind {
    #[default]
    NoTouch,
    /// Pointer is down and has not moved
    PotentialClick,
    /// Pointer is down and has moved
    Dragging,
    /// Released exactly where it went down
    Click,
    /// Released anywhere else
    DragRelease,
}

/// Gesture snapshot, replaced wholesale on every pointer event
///
/// Screen-space points. Click detection compares positions exactly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct TouchState {
    initial: Vec2,
    current: Vec2,
    kind: TouchKind,
    dragging: bool,
}

impl TouchState {
    /// State for a pointer that just went down at `point`
    pub fn new(point: Vec2) -> Self {
        Self {
            initial: point,
            current: point,
            kind: TouchKind::PotentialClick,
            dragging: false,
        }
    }

    /// Successor state after the pointer moved to `point`
    pub fn with_movement(&self, point: Vec2) -> Self {
        let moved = point != self.initial;
        Self {
            initial: self.initial,
            current: point,
            kind: if moved { TouchKind::Dragging } else { TouchKind::PotentialClick },
            dragging: moved,
        }
    }

    /// Final state after the pointer was released at `point`
    pub fn with_release(&self, point: Vec2) -> Self {
        let click = point == self.initial;
        Self {
            initial: self.initial,
            current: point,
            kind: if click { TouchKind::Click } else { TouchKind::DragRelease },
            dragging: !click,
        }
    }

    #[inline]
    pub fn initial(&self) -> Vec2 {
        self.initial
    }

    #[inline]
    pub fn current(&self) -> Vec2 {
        self.current
    }

    #[inline]
    pub fn kind(&self) -> TouchKind {
        self.kind
    }

    /// Offset of the current point from the initial one
    #[inline]
    pub fn delta(&self) -> Vec2 {
        self.current - self.initial
    }

    #[inline]
    pub fn total_distance(&self) -> f32 {
        self.delta().length()
    }

    /// True for a click release, or while the pointer still sits on its origin
    pub fn is_click(&self) -> bool {
        self.kind == TouchKind::Click || self.current == self.initial
    }

    /// True while moving or after a non-click release
    pub fn is_drag(&self) -> bool {
        matches!(self.kind, TouchKind::Dragging | TouchKind::DragRelease)
    }

    /// True once the pointer has left its origin
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}
