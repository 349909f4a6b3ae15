//! Pointer samples delivered by the host

use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// Pointer action
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerAction {
    Down,
    Move,
    Up,
    Cancel,
}

impl PointerAction {
    /// Label used in debug text
    pub fn label(self) -> &'static str {
        match self {
            PointerAction::Down => "Touch Down",
            PointerAction::Move => "Touch Move",
            PointerAction::Up => "Touch Up",
            PointerAction::Cancel => "Touch Cancel",
        }
    }
}

/// One pointer sample
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub action: PointerAction,
    /// Screen coordinates
    pub raw: Vec2,
    /// Coordinates relative to the bubble surface
    pub local: Vec2,
}

impl PointerEvent {
    #[inline]
    pub fn new(action: PointerAction, raw: Vec2, local: Vec2) -> Self {
        Self { action, raw, local }
    }
}
