//! Runtime settings for the native runner
//!
//! Read from an optional JSON file. Missing fields take their defaults, and
//! a missing or broken file falls back to defaults entirely.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::consts::SIM_STEP_MS;

/// Runner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed (derived from the clock when absent)
    pub seed: Option<u64>,
    /// Host frame length fed to the frame clock (ms)
    pub frame_ms: f64,
    /// Frames to run before exiting
    pub max_frames: u32,
    /// Print a text frame every N frames (0 = never)
    pub render_every: u32,
    /// Text frame size in characters
    pub render_cols: usize,
    pub render_rows: usize,
    /// Let the built-in demo pilot drive the ship
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            frame_ms: SIM_STEP_MS,
            max_frames: 3600,
            render_every: 600,
            render_cols: 96,
            render_rows: 32,
            autopilot: true,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("parsing settings in {}", path.display()))
    }

    /// Load from `path` if given, falling back to defaults on any error
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("{:#}; using default settings", err);
                Self::default()
            }
        }
    }

    /// Seed to use for this run
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        })
    }
}
