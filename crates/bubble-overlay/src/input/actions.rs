//! Button dispatch for the main bubble and the share menu

use log::{debug, error, info, warn};

use crate::listener::ShareRequest;
use super::handler::{TouchContext, TouchEventHandler};
use super::BubbleButton;

impl TouchEventHandler {
    /// Run the action of a main bubble button (codes 0..=5)
    pub(super) fn handle_button(&mut self, code: u16, ctx: &mut TouchContext<'_>) -> bool {
        debug!("button {} pressed", code);

        match BubbleButton::from_code(code) {
            Some(BubbleButton::AddMinute) => {
                ctx.widget.add_time(self.config.add_time_step());
                ctx.listener.on_timer_updated(ctx.widget.timer());
            }
            Some(BubbleButton::TogglePause) => {
                let result = if ctx.widget.is_paused() {
                    ctx.widget.unpause()
                } else {
                    ctx.widget.pause()
                };
                match result {
                    Ok(()) => ctx.listener.on_timer_updated(ctx.widget.timer()),
                    Err(e) => error!("failed to toggle pause: {}", e),
                }
            }
            Some(BubbleButton::Dismiss) => ctx.listener.on_bubble_dismiss(ctx.widget.timer()),
            Some(BubbleButton::OpenHostApp) => {
                if let Err(e) = ctx.platform.open_host_app() {
                    error!("failed to open host app: {}", e);
                }
            }
            Some(BubbleButton::OpenShareMenu) => ctx.widget.show_share_menu(),
            Some(BubbleButton::ToggleDebug) => self.toggle_debug_mode(ctx),
            _ => {
                warn!("unknown button pressed: {}", code);
                return false;
            }
        }
        true
    }

    /// Interpret a release while the share menu is open
    pub(super) fn handle_share_menu(&mut self, button: Option<u16>, ctx: &mut TouchContext<'_>) -> bool {
        match button.and_then(BubbleButton::from_code) {
            Some(BubbleButton::ShareMenuBack) => {
                ctx.widget.hide_share_menu();
                true
            }
            Some(BubbleButton::ShareWithFriend(index)) => {
                let friend = match self.config.share_roster.get(index) {
                    Some(name) => name.clone(),
                    None => {
                        warn!("share button {} has no friend in the roster", index);
                        return false;
                    }
                };
                self.toggle_share(friend, ctx);
                true
            }
            _ => false,
        }
    }

    fn toggle_share(&self, friend: String, ctx: &mut TouchContext<'_>) {
        let mut shared_with = ctx.widget.shared_with();

        if shared_with.remove(&friend) {
            ctx.widget.set_shared_with(shared_with);
            info!("removed {} from sharing", friend);
        } else {
            shared_with.insert(friend.clone());
            ctx.widget.set_shared_with(shared_with.clone());
            info!("sharing timer {} with {}", ctx.widget.timer().id, friend);

            let request = ShareRequest {
                timer: ctx.widget.timer().clone(),
                shared_with,
                added: friend,
            };
            match ctx.share {
                Some(requester) => requester.request_share(request),
                None => warn!("no share requester installed, share with {} is local only", request.added),
            }
        }

        ctx.widget.refresh_menu_layout();
        ctx.listener.on_timer_updated(ctx.widget.timer());
    }

    fn toggle_debug_mode(&mut self, ctx: &mut TouchContext<'_>) {
        self.debug_mode = !self.debug_mode;
        debug!("debug mode toggled: {}", self.debug_mode);
        let state = if self.debug_mode { "ON" } else { "OFF" };
        ctx.listener.on_debug_info_update(&format!("Debug mode: {}", state));
        ctx.listener.on_debug_mode_changed(self.debug_mode);
    }
}
