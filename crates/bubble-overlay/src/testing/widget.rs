//! Timer widget double with rectangular buttons and a circular body

use std::collections::BTreeSet;
use std::time::Duration;

use serde::Deserialize;

use crate::error::WidgetError;
use crate::math::{Size, Vec2};
use crate::widget::{BubbleMode, TimerRef, TimerWidget};

/// Rectangular hit region for one button code, in widget-local coordinates
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct ButtonRegion {
    pub code: u16,
    pub origin: Vec2,
    pub size: Size,
}

impl ButtonRegion {
    pub const fn new(code: u16, origin: Vec2, size: Size) -> Self {
        Self { code, origin, size }
    }

    fn contains(&self, point: Vec2) -> bool {
        point.x >= self.origin.x
            && point.y >= self.origin.y
            && point.x < self.origin.x + self.size.width
            && point.y < self.origin.y + self.size.height
    }
}

/// Widget whose main circle fills its bounding box
///
/// Buttons with codes below 100 are live outside the share menu, codes from
/// 100 up only inside it.
pub struct FakeTimerWidget {
    timer: TimerRef,
    mode: BubbleMode,
    size: Size,
    screen: Size,
    buttons: Vec<ButtonRegion>,
    in_share_menu: bool,
    paused: bool,
    fail_pause: bool,
    shared_with: BTreeSet<String>,
    added: Duration,
    dragging_calls: Vec<bool>,
    menu_refreshes: usize,
}

impl FakeTimerWidget {
    pub fn new(timer: TimerRef, size: Size) -> Self {
        Self {
            timer,
            mode: BubbleMode::Small,
            size,
            screen: Size::ZERO,
            buttons: Vec::new(),
            in_share_menu: false,
            paused: false,
            fail_pause: false,
            shared_with: BTreeSet::new(),
            added: Duration::ZERO,
            dragging_calls: Vec::new(),
            menu_refreshes: 0,
        }
    }

    pub fn with_mode(mut self, mode: BubbleMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_button(mut self, region: ButtonRegion) -> Self {
        self.buttons.push(region);
        self
    }

    pub fn with_share_menu(mut self, open: bool) -> Self {
        self.in_share_menu = open;
        self
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Make pause and unpause fail
    pub fn set_fail_pause(&mut self, fail: bool) {
        self.fail_pause = fail;
    }

    /// Every `set_dragging` argument, in order
    pub fn dragging_calls(&self) -> &[bool] {
        &self.dragging_calls
    }

    /// Total time added through `add_time`
    pub fn added_time(&self) -> Duration {
        self.added
    }

    pub fn menu_refreshes(&self) -> usize {
        self.menu_refreshes
    }

    pub fn screen_dimensions(&self) -> Size {
        self.screen
    }
}

impl TimerWidget for FakeTimerWidget {
    fn hit_test_button(&self, local: Vec2) -> Option<u16> {
        self.buttons
            .iter()
            .filter(|b| (b.code >= 100) == self.in_share_menu)
            .find(|b| b.contains(local))
            .map(|b| b.code)
    }

    fn hit_test_main_circle(&self, local: Vec2) -> bool {
        if self.size.is_empty() {
            return false;
        }
        let radius = self.size.width.min(self.size.height) / 2.0;
        local.distance(self.size.as_vec2() / 2.0) <= radius
    }

    fn mode(&self) -> BubbleMode {
        self.mode
    }

    fn set_mode(&mut self, mode: BubbleMode) {
        self.mode = mode;
    }

    fn is_in_share_menu(&self) -> bool {
        self.in_share_menu
    }

    fn set_dragging(&mut self, dragging: bool) {
        self.dragging_calls.push(dragging);
    }

    fn size(&self) -> Size {
        self.size
    }

    fn set_screen_dimensions(&mut self, screen: Size) {
        self.screen = screen;
    }

    fn refresh_menu_layout(&mut self) {
        self.menu_refreshes += 1;
    }

    fn timer(&self) -> &TimerRef {
        &self.timer
    }

    fn set_timer(&mut self, timer: TimerRef) {
        self.timer = timer;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn pause(&mut self) -> Result<(), WidgetError> {
        if self.fail_pause {
            return Err(WidgetError::InvalidState("timer already stopped".into()));
        }
        self.paused = true;
        Ok(())
    }

    fn unpause(&mut self) -> Result<(), WidgetError> {
        if self.fail_pause {
            return Err(WidgetError::InvalidState("timer already stopped".into()));
        }
        self.paused = false;
        Ok(())
    }

    fn add_time(&mut self, amount: Duration) {
        self.added += amount;
    }

    fn show_share_menu(&mut self) {
        self.in_share_menu = true;
    }

    fn hide_share_menu(&mut self) {
        self.in_share_menu = false;
    }

    fn shared_with(&self) -> BTreeSet<String> {
        self.shared_with.clone()
    }

    fn set_shared_with(&mut self, friends: BTreeSet<String>) {
        self.shared_with = friends;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_follow_menu_state() {
        let mut widget = FakeTimerWidget::new(TimerRef::default(), Size::new(160.0, 160.0))
            .with_button(ButtonRegion::new(0, Vec2::new(0.0, 0.0), Size::new(40.0, 40.0)))
            .with_button(ButtonRegion::new(100, Vec2::new(0.0, 0.0), Size::new(40.0, 40.0)));
        assert_eq!(widget.hit_test_button(Vec2::new(10.0, 10.0)), Some(0));
        widget.show_share_menu();
        assert_eq!(widget.hit_test_button(Vec2::new(10.0, 10.0)), Some(100));
        assert_eq!(widget.hit_test_button(Vec2::new(100.0, 100.0)), None);
    }

    #[test]
    fn test_main_circle_hit() {
        let widget = FakeTimerWidget::new(TimerRef::default(), Size::new(160.0, 160.0));
        assert!(widget.hit_test_main_circle(Vec2::new(80.0, 80.0)));
        assert!(widget.hit_test_main_circle(Vec2::new(100.0, 100.0)));
        assert!(!widget.hit_test_main_circle(Vec2::new(2.0, 2.0)));
        assert!(!widget.hit_test_main_circle(Vec2::new(-10.0, 80.0)));
    }
}
