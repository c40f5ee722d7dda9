//! Application settings
//!
//! Read from a JSON file on native and LocalStorage in the browser. Any
//! missing field takes its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Application settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Font used for the score text
    pub font_path: String,
    /// RNG seed; a fresh one is picked at startup when absent
    pub seed: Option<u64>,
    /// Background grid
    pub show_grid: bool,
    /// Autopilot aims at the nearest obstacle and holds fire
    pub idle_mode: bool,
    /// Ticks the native headless demo runs for
    pub headless_ticks: u64,
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_path: "Arial.ttf".to_string(),
            seed: None,
            show_grid: true,
            idle_mode: false,
            headless_ticks: 3600,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Default settings file name next to the binary's working directory
    pub const FILE_NAME: &'static str = "arena.json";

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "turret_arena_settings";

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from `path` if it exists, defaults otherwise
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let settings = Self::load_from_path(path)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let t = &self.tuning;
        let positive = [
            ("map_width", t.map_width),
            ("map_height", t.map_height),
            ("view_width", t.view_width),
            ("view_height", t.view_height),
            ("player_speed", t.player_speed),
            ("player_radius", t.player_radius),
            ("turret_radius", t.turret_radius),
            ("projectile_radius", t.projectile_radius),
            ("projectile_speed_factor", t.projectile_speed_factor),
            ("projectile_range_factor", t.projectile_range_factor),
            ("block_size", t.block_size),
            ("orb_radius", t.orb_radius),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if t.block_spawn_percent > 100 {
            return Err(SettingsError::Invalid(format!(
                "block_spawn_percent must be at most 100, got {}",
                t.block_spawn_percent
            )));
        }
        if t.placement_attempts == 0 {
            return Err(SettingsError::Invalid(
                "placement_attempts must be at least 1".into(),
            ));
        }
        let player_size = t.player_radius * 2.0;
        if player_size > t.map_width || player_size > t.map_height {
            return Err(SettingsError::Invalid(
                "player does not fit on the map".into(),
            ));
        }
        if self.font_path.is_empty() {
            return Err(SettingsError::Invalid("font_path is empty".into()));
        }
        Ok(())
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage
            && let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY)
        {
            match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring stored settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native: read [`Self::FILE_NAME`], falling back to defaults on error
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::load_or_default(Self::FILE_NAME).unwrap_or_else(|e| {
            log::warn!("{}; using defaults", e);
            Self::default()
        })
    }
}
