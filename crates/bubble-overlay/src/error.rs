//! Error types for the overlay engine
//!
//! Geometry errors are programmer errors and fail fast. Platform and widget
//! errors are recoverable and get logged at the seam where they occur.

use crate::platform::SurfaceId;

/// Invalid input to one of the pure geometry functions.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// A size, width or inset was outside its valid range.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// Failure reported by the platform windowing primitive.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    /// The surface is already attached to the window system.
    #[error("surface {0:?} is already attached")]
    AlreadyAttached(SurfaceId),

    /// The surface is not attached to the window system.
    #[error("surface {0:?} is not attached")]
    NotAttached(SurfaceId),

    /// The host application could not be brought to the foreground.
    #[error("host app unavailable: {0}")]
    HostAppUnavailable(String),

    /// Any other platform-specific failure.
    #[error("platform error: {0}")]
    Other(String),
}

/// Failure reported by the renderable timer widget.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WidgetError {
    /// The timer is in a state that does not allow the requested transition.
    #[error("invalid timer state: {0}")]
    InvalidState(String),
}

/// Configuration could not be loaded or failed validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration document was not valid JSON for `OverlayConfig`.
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field held a value outside its allowed range.
    #[error("invalid config field `{field}`: {reason}")]
    Invalid {
        /// Offending field name
        field: &'static str,
        /// Why the value was rejected
        reason: &'static str,
    },
}

/// Umbrella error for callers that want a single type.
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Widget(#[from] WidgetError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
