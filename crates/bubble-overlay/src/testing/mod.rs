//! In-memory doubles for the platform, widget and listener seams
//!
//! Compiled for unit tests and behind the `testing` feature for integration
//! tests and the replay tool.

mod dispatcher;
mod listener;
mod platform;
mod widget;

pub use dispatcher::QueueDispatcher;
pub use listener::{ListenerEvent, RecordingListener, RecordingShareRequester};
pub use platform::{PlatformCall, RecordingPlatform};
pub use widget::{ButtonRegion, FakeTimerWidget};
