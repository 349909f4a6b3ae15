//! Overlay tuning constants
//!
//! Every threshold and ratio used by the geometry functions and the touch
//! handler comes from one [`OverlayConfig`] value, so tests can run the same
//! logic against alternate constants.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Distance under which a dismiss target starts attracting the bubble
pub const PULL_THRESHOLD: f32 = 200.0;
/// Distance under which releasing over a dismiss target triggers its action
pub const ACTION_THRESHOLD: f32 = 50.0;
/// Fraction of the bubble width left hanging off-screen after an edge snap
pub const SNAP_OVERLAP_RATIO: f32 = 0.2;
pub const SMALL_BUBBLE_RADIUS: f32 = 80.0;
pub const LITTLE_BUBBLE_RADIUS: f32 = 120.0;
pub const BIG_BUBBLE_RADIUS: f32 = 200.0;
/// Initial vertical offset of a small bubble, as a fraction of usable height
pub const SMALL_INITIAL_OFFSET_RATIO: f32 = 0.1;
pub const DISMISS_TARGET_RADIUS: f32 = 80.0;
/// Gap between a screen edge and the nearest rim of a dismiss target
pub const DISMISS_TARGET_MARGIN: f32 = 200.0;
/// Time added by the "+1 minute" button
pub const ADD_TIME_STEP_SECS: u64 = 60;

/// Overlay configuration value object
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub pull_threshold: f32,
    pub action_threshold: f32,
    pub snap_overlap_ratio: f32,
    pub small_bubble_radius: f32,
    pub little_bubble_radius: f32,
    pub big_bubble_radius: f32,
    pub small_initial_offset_ratio: f32,
    pub dismiss_target_radius: f32,
    pub dismiss_target_margin: f32,
    pub add_time_step_secs: u64,
    /// Friend names addressed by share-menu buttons 101.., in button order
    pub share_roster: Vec<String>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            pull_threshold: PULL_THRESHOLD,
            action_threshold: ACTION_THRESHOLD,
            snap_overlap_ratio: SNAP_OVERLAP_RATIO,
            small_bubble_radius: SMALL_BUBBLE_RADIUS,
            little_bubble_radius: LITTLE_BUBBLE_RADIUS,
            big_bubble_radius: BIG_BUBBLE_RADIUS,
            small_initial_offset_ratio: SMALL_INITIAL_OFFSET_RATIO,
            dismiss_target_radius: DISMISS_TARGET_RADIUS,
            dismiss_target_margin: DISMISS_TARGET_MARGIN,
            add_time_step_secs: ADD_TIME_STEP_SECS,
            share_roster: Vec::new(),
        }
    }
}

impl OverlayConfig {
    /// Parse a JSON document; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: OverlayConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the friend roster used by the share menu
    pub fn with_share_roster<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.share_roster = names.into_iter().map(Into::into).collect();
        self
    }

    /// Time added by the add-time button
    #[inline]
    pub fn add_time_step(&self) -> Duration {
        Duration::from_secs(self.add_time_step_secs)
    }

    /// Reject values the geometry functions cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("pull_threshold", self.pull_threshold),
            ("action_threshold", self.action_threshold),
            ("small_bubble_radius", self.small_bubble_radius),
            ("little_bubble_radius", self.little_bubble_radius),
            ("big_bubble_radius", self.big_bubble_radius),
            ("dismiss_target_radius", self.dismiss_target_radius),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::Invalid { field, reason: "must be positive" });
            }
        }
        if self.action_threshold > self.pull_threshold {
            return Err(ConfigError::Invalid {
                field: "action_threshold",
                reason: "must not exceed pull_threshold",
            });
        }
        if !(0.0..1.0).contains(&self.snap_overlap_ratio) {
            return Err(ConfigError::Invalid {
                field: "snap_overlap_ratio",
                reason: "must be in [0, 1)",
            });
        }
        if !(0.0..1.0).contains(&self.small_initial_offset_ratio) {
            return Err(ConfigError::Invalid {
                field: "small_initial_offset_ratio",
                reason: "must be in [0, 1)",
            });
        }
        if self.dismiss_target_margin < 0.0 {
            return Err(ConfigError::Invalid {
                field: "dismiss_target_margin",
                reason: "must not be negative",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let config = OverlayConfig::default();
        assert!((config.pull_threshold - 200.0).abs() < 0.001);
        assert!((config.action_threshold - 50.0).abs() < 0.001);
        assert!((config.snap_overlap_ratio - 0.2).abs() < 0.001);
        assert!((config.small_bubble_radius - 80.0).abs() < 0.001);
        assert!((config.little_bubble_radius - 120.0).abs() < 0.001);
        assert!((config.big_bubble_radius - 200.0).abs() < 0.001);
        assert!((config.small_initial_offset_ratio - 0.1).abs() < 0.001);
        assert_eq!(config.add_time_step(), Duration::from_secs(60));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial_keeps_defaults() {
        let config = OverlayConfig::from_json(r#"{"pull_threshold": 300.0, "share_roster": ["Ada"]}"#).unwrap();
        assert!((config.pull_threshold - 300.0).abs() < 0.001);
        assert!((config.action_threshold - 50.0).abs() < 0.001);
        assert_eq!(config.share_roster, vec!["Ada".to_string()]);
    }

    #[test]
    fn test_from_json_rejects_bad_ratio() {
        let err = OverlayConfig::from_json(r#"{"snap_overlap_ratio": 1.5}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "snap_overlap_ratio", .. }));
    }

    #[test]
    fn test_from_json_rejects_inverted_thresholds() {
        let err = OverlayConfig::from_json(r#"{"pull_threshold": 40.0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "action_threshold", .. }));
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(OverlayConfig::from_json("[1, 2"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_with_share_roster() {
        let config = OverlayConfig::default().with_share_roster(["Ada", "Grace"]);
        assert_eq!(config.share_roster.len(), 2);
        assert_eq!(config.share_roster[1], "Grace");
    }
}
