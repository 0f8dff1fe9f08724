//! JSON configuration parsing for headless mode
//!
//! Parses JSON duel configurations and resolves the tuning they refer to.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::duel::tuning::{load_duel_tuning, DuelTuning, DEFAULT_TUNING_PATH};

/// Who controls the player in a headless duel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerPilot {
    /// Stands at spawn with the blade pointed at the opponent
    Idle,
    /// Closes in, dashes from range and pushes up close
    #[default]
    Aggressor,
}

/// Headless duel configuration loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlessDuelConfig {
    /// Random seed for deterministic duel reproduction
    /// If provided, the duel will use a seeded RNG for reproducible results
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// Maximum duel duration in seconds (default: 300)
    #[serde(default = "default_max_duration")]
    pub max_duration_secs: f32,
    /// Fixed simulation step in milliseconds (default: one 60 Hz frame)
    #[serde(default = "default_step_ms")]
    pub step_ms: f32,
    /// Player controller (default: Aggressor)
    #[serde(default)]
    pub pilot: PlayerPilot,
    /// RON tuning file (optional, falls back to the bundled tuning)
    #[serde(default)]
    pub tuning_path: Option<String>,
}

/// Larger steps would be clamped by both bevy's virtual time and the tick delta cap.
const MAX_STEP_MS: f32 = 250.0;

fn default_max_duration() -> f32 {
    300.0
}

fn default_step_ms() -> f32 {
    1000.0 / 60.0
}

impl Default for HeadlessDuelConfig {
    fn default() -> Self {
        Self {
            random_seed: None,
            max_duration_secs: default_max_duration(),
            step_ms: default_step_ms(),
            pilot: PlayerPilot::default(),
            tuning_path: None,
        }
    }
}

impl HeadlessDuelConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self, String> {
        let config: HeadlessDuelConfig =
            serde_json::from_str(contents).map_err(|e| format!("Failed to parse JSON: {}", e))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.max_duration_secs > 0.0) {
            return Err("max_duration_secs must be positive".to_string());
        }
        if !(self.step_ms > 0.0) || self.step_ms > MAX_STEP_MS {
            return Err(format!(
                "step_ms must be within (0, {}], got {}",
                MAX_STEP_MS, self.step_ms
            ));
        }
        Ok(())
    }

    /// Tuning for this duel. An explicit `tuning_path` must load; otherwise
    /// the bundled file is tried and the built-in defaults are the fallback.
    pub fn resolve_tuning(&self) -> Result<DuelTuning, String> {
        match &self.tuning_path {
            Some(path) => load_duel_tuning(Path::new(path)),
            None => Ok(load_bundled_tuning()),
        }
    }
}

/// The tuning shipped in `assets/`, or the built-in defaults if it is missing or broken.
pub fn load_bundled_tuning() -> DuelTuning {
    match load_duel_tuning(Path::new(DEFAULT_TUNING_PATH)) {
        Ok(tuning) => tuning,
        Err(e) => {
            warn!("{}; using built-in duel tuning", e);
            DuelTuning::default()
        }
    }
}
