//! Renderable timer widget contract
//!
//! The engine does not draw anything. It consumes the widget only through
//! hit-testing and the mutators below. Hit tests take overlay-local
//! coordinates.

use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::WidgetError;
use crate::math::{Size, Vec2};

/// Bubble representation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BubbleMode {
    /// Compact bubble supporting edge-snap and dismiss-by-pull
    #[default]
    Small,
    /// Enlarged bubble, centred on open
    Expanded,
}

/// Snapshot of the timer a bubble renders
///
/// The engine never interprets these fields. They are handed to listeners and
/// embedded in share requests.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerRef {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub total_duration_secs: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_secs: Option<u64>,
    /// RFC 3339 end time of a running timer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

impl TimerRef {
    /// Create a timer snapshot with no remaining/end time information
    pub fn new(id: impl Into<String>, user_id: impl Into<String>, name: impl Into<String>, total: Duration) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            name: name.into(),
            total_duration_secs: total.as_secs(),
            remaining_secs: None,
            end_time: None,
        }
    }
}

/// Renderable timer widget
pub trait TimerWidget {
    // === Hit testing ===

    /// Button code under `local`, if any
    fn hit_test_button(&self, local: Vec2) -> Option<u16>;

    /// Check whether `local` lies on the main bubble circle
    fn hit_test_main_circle(&self, local: Vec2) -> bool;

    // === Mode ===

    fn mode(&self) -> BubbleMode;

    fn set_mode(&mut self, mode: BubbleMode);

    #[inline]
    fn is_small_mode(&self) -> bool {
        self.mode() == BubbleMode::Small
    }

    #[inline]
    fn is_expanded_mode(&self) -> bool {
        self.mode() == BubbleMode::Expanded
    }

    /// True while the share menu replaces the normal buttons
    fn is_in_share_menu(&self) -> bool;

    // === Layout ===

    /// Tell the widget a drag started or ended
    fn set_dragging(&mut self, dragging: bool);

    /// Measured size of the widget surface
    fn size(&self) -> Size;

    fn set_screen_dimensions(&mut self, screen: Size);

    /// Re-lay out the share menu after its contents changed
    fn refresh_menu_layout(&mut self) {}

    // === Timer ===

    fn timer(&self) -> &TimerRef;

    fn set_timer(&mut self, timer: TimerRef);

    fn is_paused(&self) -> bool;

    fn pause(&mut self) -> Result<(), WidgetError>;

    fn unpause(&mut self) -> Result<(), WidgetError>;

    fn add_time(&mut self, amount: Duration);

    // === Sharing ===

    fn show_share_menu(&mut self);

    fn hide_share_menu(&mut self);

    /// Friends the timer is currently shared with
    fn shared_with(&self) -> BTreeSet<String>;

    fn set_shared_with(&mut self, friends: BTreeSet<String>);
}
