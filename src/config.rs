//! Runtime configuration
//!
//! Settings come from an optional YAML file, with a couple of environment
//! variables layered on top. Every value falls back to a sensible default.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::views::View;

/// Frames are never drawn faster than this
const MIN_FRAME_MS: u64 = 10;

/// Settings schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardSettings {
    #[serde(default)]
    pub refresh: RefreshSettings,
    #[serde(default)]
    pub simulation: SimulationSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshSettings {
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
}

fn default_frame_ms() -> u64 {
    50
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            frame_ms: default_frame_ms(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationSettings {
    /// Fixed seed for a reproducible board; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default)]
    pub default_view: View,
}

impl BoardSettings {
    /// Parse a settings document
    pub fn parse(content: &str) -> Result<Self> {
        // An empty file is a valid, all-default document
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).context("Invalid settings YAML")
    }

    /// Load settings from `path`.
    ///
    /// A missing file gives the defaults; an unreadable or invalid one is
    /// logged and also gives the defaults.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            debug!("No settings file at {}", path.display());
            return Self::default();
        }
        let parsed = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))
            .and_then(|content| Self::parse(&content));
        match parsed {
            Ok(settings) => {
                info!("Settings loaded from {}", path.display());
                settings
            }
            Err(e) => {
                warn!("Using default settings: {:#}", e);
                Self::default()
            }
        }
    }

    /// Settings from the configured file with environment overrides applied
    pub fn resolve() -> Self {
        let mut settings = Self::load(&settings_path());
        if let Some(seed) = seed_override() {
            settings.simulation.seed = Some(seed);
        }
        settings
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.refresh.frame_ms.max(MIN_FRAME_MS))
    }
}

/// Settings file path. Override with `CFB_SETTINGS`.
pub fn settings_path() -> PathBuf {
    if let Ok(path) = std::env::var("CFB_SETTINGS") {
        return PathBuf::from(path);
    }
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("capital-flow-board").join("settings.yaml");
    }
    PathBuf::from(".capital-flow-board.yaml")
}

/// Seed from `CFB_SEED`, if set to a valid u64
pub fn seed_override() -> Option<u64> {
    let raw = std::env::var("CFB_SEED").ok()?;
    let seed = parse_seed(&raw);
    if seed.is_none() {
        warn!("Ignoring CFB_SEED={:?}: not an unsigned integer", raw);
    }
    seed
}

fn parse_seed(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}
