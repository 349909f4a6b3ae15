//! Touch state machine for one bubble

use std::rc::Rc;

use log::{debug, error};

use crate::config::OverlayConfig;
use crate::debug::format_touch_debug_info;
use crate::dismiss::{DismissKind, DismissTarget, DismissZoneManager};
use crate::listener::{ShareRequester, TouchEventListener};
use crate::math::{
    is_within_action_threshold, is_within_pull_threshold, pull_to_position, snap_x, Size, Vec2,
};
use crate::platform::{SurfaceId, WindowPlatform};
use crate::position::Placement;
use crate::widget::TimerWidget;
use super::{BubbleButton, PointerAction, PointerEvent, TouchState};

/// Collaborators borrowed for the duration of one pointer event
pub struct TouchContext<'a> {
    pub widget: &'a mut dyn TimerWidget,
    /// Bubble placement, mutated in place during a drag
    pub placement: &'a mut Placement,
    pub dismiss: &'a mut DismissZoneManager,
    pub platform: &'a dyn WindowPlatform,
    /// Bubble surface that placement commits go to
    pub surface: SurfaceId,
    /// Usable screen size
    pub screen: Size,
    pub share: Option<&'a dyn ShareRequester>,
    pub listener: &'a mut dyn TouchEventListener,
}

impl TouchContext<'_> {
    /// Push the current placement to the platform
    pub(crate) fn commit_placement(&self) {
        if let Err(e) = self.platform.update_placement(self.surface, *self.placement) {
            error!("failed to update bubble placement: {}", e);
        }
    }
}

/// Active gesture
#[derive(Clone, Copy, Debug)]
struct Gesture {
    touch: TouchState,
    /// Offset from pointer to bubble anchor captured on pointer-down
    grab_offset: Vec2,
    /// Target the bubble is currently pulled onto
    pulled_to: Option<DismissTarget>,
}

/// Turns the raw pointer stream into placement updates and listener intents
///
/// Idle until a pointer-down lands on the bubble, then tracking until the
/// matching pointer-up or a cancel.
pub struct TouchEventHandler {
    pub(super) config: Rc<OverlayConfig>,
    gesture: Option<Gesture>,
    pub(super) debug_mode: bool,
}

impl TouchEventHandler {
    pub fn new(config: Rc<OverlayConfig>) -> Self {
        Self {
            config,
            gesture: None,
            debug_mode: false,
        }
    }

    /// Process one pointer event; returns whether it was consumed
    pub fn handle(&mut self, event: &PointerEvent, ctx: &mut TouchContext<'_>) -> bool {
        let button = ctx.widget.hit_test_button(event.local);
        let inside = button.is_some() || ctx.widget.hit_test_main_circle(event.local);

        debug!(
            "pointer {:?} raw=[{},{}] local=[{},{}] inside={} button={:?}",
            event.action, event.raw.x, event.raw.y, event.local.x, event.local.y, inside, button
        );

        match event.action {
            PointerAction::Down => self.handle_down(event, inside, ctx),
            PointerAction::Move => self.handle_move(event, ctx),
            PointerAction::Up => self.handle_up(event, inside, button, ctx),
            PointerAction::Cancel => self.handle_cancel(ctx),
        }
    }

    /// True between an accepted pointer-down and its pointer-up or cancel
    #[inline]
    pub fn is_tracking(&self) -> bool {
        self.gesture.is_some()
    }

    /// Current gesture snapshot
    pub fn touch_state(&self) -> Option<TouchState> {
        self.gesture.map(|g| g.touch)
    }

    /// Dismiss target the bubble is pulled onto, if any
    pub fn pulled_target(&self) -> Option<DismissTarget> {
        self.gesture.and_then(|g| g.pulled_to)
    }

    pub fn set_debug_mode(&mut self, enabled: bool) {
        self.debug_mode = enabled;
    }

    #[inline]
    pub fn is_debug_mode_enabled(&self) -> bool {
        self.debug_mode
    }

    fn handle_down(&mut self, event: &PointerEvent, inside: bool, ctx: &mut TouchContext<'_>) -> bool {
        if !inside {
            return false;
        }

        self.gesture = Some(Gesture {
            touch: TouchState::new(event.raw),
            grab_offset: ctx.placement.position - event.raw,
            pulled_to: None,
        });

        ctx.widget.set_dragging(true);
        ctx.listener.on_drag_state_changed(true);

        if ctx.widget.is_small_mode() {
            ctx.dismiss.show();
        }

        self.emit_debug_info(event, ctx);
        true
    }

    fn handle_move(&mut self, event: &PointerEvent, ctx: &mut TouchContext<'_>) -> bool {
        let mut gesture = match self.gesture {
            Some(gesture) => gesture,
            None => return false,
        };
        gesture.touch = gesture.touch.with_movement(event.raw);

        let raw = event.raw;
        let pull = if ctx.dismiss.is_showing() {
            ctx.dismiss
                .nearest_target(raw)
                .filter(|target| is_within_pull_threshold(&self.config, raw, target.center))
        } else {
            None
        };

        let position = match pull {
            Some(target) => {
                // Clamp in the frame the targets are laid out in
                let bubble = ctx.widget.size();
                let bounds = ctx.dismiss.screen();
                match pull_to_position(ctx.placement.position, target.center, bubble, bounds) {
                    Ok(position) => {
                        gesture.pulled_to = is_within_action_threshold(&self.config, raw, target.center)
                            .then_some(target);
                        position
                    }
                    Err(e) => {
                        error!("pull placement failed: {}", e);
                        self.gesture = Some(gesture);
                        return false;
                    }
                }
            }
            None => {
                gesture.pulled_to = None;
                raw + gesture.grab_offset
            }
        };

        self.gesture = Some(gesture);
        ctx.placement.position = position;
        ctx.commit_placement();

        self.emit_debug_info(event, ctx);
        true
    }

    fn handle_up(
        &mut self,
        event: &PointerEvent,
        inside: bool,
        button: Option<u16>,
        ctx: &mut TouchContext<'_>,
    ) -> bool {
        let gesture = match self.gesture.take() {
            Some(gesture) => gesture,
            None => return false,
        };
        let touch = gesture.touch.with_release(event.raw);

        if let Some(target) = gesture.pulled_to {
            let near = match ctx.placement.center() {
                Ok(center) => is_within_action_threshold(&self.config, center, target.center),
                Err(e) => {
                    error!("dismiss check failed: {}", e);
                    false
                }
            };
            debug!("dismiss check: near={} kind={:?}", near, target.kind);

            if near {
                match target.kind {
                    DismissKind::Stop => ctx.listener.on_timer_stopped(ctx.widget.timer()),
                    DismissKind::Dismiss => ctx.listener.on_bubble_dismiss(ctx.widget.timer()),
                }
                self.end_drag(ctx);
                return true;
            }
        }

        self.end_drag(ctx);

        if ctx.widget.is_in_share_menu() {
            return self.handle_share_menu(button, ctx);
        }

        if let Some(code) = button.filter(|code| BubbleButton::from_code(*code).is_some_and(BubbleButton::is_main)) {
            return self.handle_button(code, ctx);
        }

        if !inside {
            debug!("release outside bubble, not handled");
            return false;
        }

        if touch.is_click() {
            debug!("click detected");
            ctx.listener.on_bubble_click(ctx.widget.timer());
            return true;
        }

        if ctx.widget.is_small_mode() {
            let bubble_width = ctx.widget.size().width;
            match snap_x(&self.config, event.raw.x, ctx.screen.width, bubble_width) {
                Ok(x) => ctx.placement.position.x = x as f32,
                Err(e) => error!("edge snap failed: {}", e),
            }
        }

        ctx.commit_placement();
        true
    }

    fn handle_cancel(&mut self, ctx: &mut TouchContext<'_>) -> bool {
        debug!("pointer cancel");
        self.gesture = None;
        self.end_drag(ctx);
        true
    }

    fn end_drag(&self, ctx: &mut TouchContext<'_>) {
        ctx.widget.set_dragging(false);
        ctx.listener.on_drag_state_changed(false);
        ctx.dismiss.hide();
    }

    fn emit_debug_info(&self, event: &PointerEvent, ctx: &mut TouchContext<'_>) {
        if !self.debug_mode {
            return;
        }
        if let Some(gesture) = &self.gesture {
            let info = format_touch_debug_info(event.action.label(), event.raw, event.local, &gesture.touch);
            ctx.listener.on_debug_info_update(&info);
        }
    }
}
