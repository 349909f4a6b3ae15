//! Drives one overlay window through a script

use std::rc::Rc;

use anyhow::Result;
use bubble_overlay::testing::{
    FakeTimerWidget, ListenerEvent, PlatformCall, RecordingListener, RecordingPlatform, RecordingShareRequester,
};
use bubble_overlay::{
    OverlayConfig, OverlayWindow, Placement, PlatformError, PointerAction, ShareRequest, Size, SurfaceId,
    WindowPlatform,
};
use log::{info, warn};
use serde::Serialize;

use crate::script::Script;

/// Window platform that logs every call and keeps surfaces in memory
pub struct LoggingPlatform {
    inner: RecordingPlatform,
}

impl LoggingPlatform {
    pub fn new(display: Size, bottom_inset: Option<f32>) -> Self {
        Self {
            inner: RecordingPlatform::new(display).with_bottom_inset(bottom_inset),
        }
    }

    pub fn calls(&self) -> Vec<PlatformCall> {
        self.inner.calls()
    }
}

impl WindowPlatform for LoggingPlatform {
    fn add_surface(&self, surface: SurfaceId, placement: Placement) -> Result<(), PlatformError> {
        info!(
            "add {:?} at [{},{}] {}x{}",
            surface, placement.position.x, placement.position.y, placement.size.width, placement.size.height
        );
        self.inner.add_surface(surface, placement).inspect_err(|e| warn!("add failed: {}", e))
    }

    fn remove_surface(&self, surface: SurfaceId) -> Result<(), PlatformError> {
        info!("remove {:?}", surface);
        self.inner.remove_surface(surface).inspect_err(|e| warn!("remove failed: {}", e))
    }

    fn update_placement(&self, surface: SurfaceId, placement: Placement) -> Result<(), PlatformError> {
        info!("update {:?} to [{},{}]", surface, placement.position.x, placement.position.y);
        self.inner.update_placement(surface, placement).inspect_err(|e| warn!("update failed: {}", e))
    }

    fn is_attached(&self, surface: SurfaceId) -> bool {
        self.inner.is_attached(surface)
    }

    fn display_size(&self) -> Size {
        self.inner.display_size()
    }

    fn bottom_inset(&self) -> Option<f32> {
        self.inner.bottom_inset()
    }

    fn open_host_app(&self) -> Result<(), PlatformError> {
        info!("open host app");
        self.inner.open_host_app()
    }
}

/// Outcome of one replayed event
#[derive(Debug, Serialize)]
pub struct EventOutcome {
    pub index: usize,
    pub action: PointerAction,
    pub consumed: bool,
}

/// Everything a replay produced
#[derive(Debug, Serialize)]
pub struct Report {
    pub events: Vec<EventOutcome>,
    pub intents: Vec<ListenerEvent>,
    pub share_requests: Vec<ShareRequest>,
    pub placement: Placement,
    pub platform_calls: Vec<PlatformCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_text: Option<String>,
}

/// Play every event of `script` in order
pub fn run(script: &Script, config: OverlayConfig) -> Result<Report> {
    let platform = Rc::new(LoggingPlatform::new(script.screen, script.bottom_inset));

    let mut widget = FakeTimerWidget::new(script.timer(), script.bubble)
        .with_mode(script.mode)
        .with_share_menu(script.share_menu);
    for region in &script.buttons {
        widget = widget.with_button(*region);
    }

    let listener = RecordingListener::new();
    let requester = Rc::new(RecordingShareRequester::new());

    let mut window = OverlayWindow::new(1, platform.clone(), widget, script.mode, Rc::new(config))?;
    window.set_listener(Box::new(listener.clone()));
    window.set_share_requester(requester.clone());
    window.open();
    if let Some(position) = script.position {
        window.set_position(position);
    }
    if script.debug {
        window.set_debug_mode(true);
    }

    let events = script
        .events
        .iter()
        .enumerate()
        .map(|(index, event)| {
            let consumed = window.handle_pointer(event.action, event.raw());
            info!("event {} {:?} consumed={}", index, event.action, consumed);
            EventOutcome {
                index,
                action: event.action,
                consumed,
            }
        })
        .collect();

    let debug_text = script.debug.then(|| window.debug_overlay().text());
    let placement = window.placement();
    window.cleanup();

    Ok(Report {
        events,
        intents: listener.events(),
        share_requests: requester.requests(),
        placement,
        platform_calls: platform.calls(),
        debug_text,
    })
}
