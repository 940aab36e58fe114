//! Runner settings
//!
//! Controls how the real-time driver runs, not the rules of the game.
//! Loaded from an optional JSON file; missing fields take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::MAX_CATCH_UP_TICKS;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Real-time runner preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerSettings {
    /// RNG seed for the AI's aim (None = derive from the clock)
    pub seed: Option<u64>,
    /// Cap on ticks run per loop iteration (0 = unbounded catch-up)
    pub max_catch_up_ticks: u32,
    /// Stop after this many seconds (None = run until interrupted)
    pub run_seconds: Option<f32>,
    /// How often the headless presenter logs a snapshot
    pub report_interval_ms: u64,
    /// Let the runner steer the player paddle
    pub autoplay: bool,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            seed: None,
            max_catch_up_ticks: MAX_CATCH_UP_TICKS,
            run_seconds: Some(30.0),
            report_interval_ms: 1000,
            autoplay: true,
        }
    }
}

impl RunnerSettings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
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
            Err(e) => {
                log::warn!("Could not load {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Seed to use, falling back to the wall clock
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}
