//! Gesture script format

use std::path::Path;

use anyhow::{bail, Context, Result};
use bubble_overlay::testing::ButtonRegion;
use bubble_overlay::{BubbleMode, OverlayConfig, PointerAction, Size, TimerRef, Vec2};
use serde::Deserialize;

/// One pointer sample in screen coordinates
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct ScriptEvent {
    pub action: PointerAction,
    pub x: f32,
    pub y: f32,
}

impl ScriptEvent {
    pub fn raw(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// A replay scenario
#[derive(Debug, Deserialize)]
pub struct Script {
    pub screen: Size,
    #[serde(default)]
    pub bottom_inset: Option<f32>,
    #[serde(default)]
    pub mode: BubbleMode,
    pub bubble: Size,
    #[serde(default)]
    pub timer: Option<TimerRef>,
    #[serde(default)]
    pub buttons: Vec<ButtonRegion>,
    #[serde(default)]
    pub share_menu: bool,
    /// Top-left anchor to place the bubble at after opening
    #[serde(default)]
    pub position: Option<Vec2>,
    #[serde(default)]
    pub debug: bool,
    pub events: Vec<ScriptEvent>,
}

impl Script {
    pub fn parse(json: &str) -> Result<Self> {
        let script: Script = serde_json::from_str(json).context("malformed gesture script")?;
        if script.screen.is_empty() {
            bail!("script screen must have positive dimensions");
        }
        if script.bubble.is_empty() {
            bail!("script bubble must have positive dimensions");
        }
        Ok(script)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        Self::parse(&json).with_context(|| format!("invalid script {}", path.display()))
    }

    /// Timer shown by the bubble, or a placeholder
    pub fn timer(&self) -> TimerRef {
        self.timer
            .clone()
            .unwrap_or_else(|| TimerRef::new("replay", "replay", "Replay", std::time::Duration::from_secs(300)))
    }
}

/// Load an override config, or the defaults
pub fn load_config(path: Option<&Path>) -> Result<OverlayConfig> {
    let config = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            OverlayConfig::from_json(&json).with_context(|| format!("invalid config {}", path.display()))?
        }
        None => OverlayConfig::default(),
    };
    config.validate()?;
    Ok(config)
}
