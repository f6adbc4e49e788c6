//! Demo settings with persistence
//!
//! Settings are saved to `~/.config/parkour/settings.toml`

use std::fs;
use std::path::PathBuf;

use parkour_core::TimeConfig;
use parkour_locomotion::{AdvancedSettings, MovementConfig};
use serde::{Deserialize, Serialize};
use tracing::{info, warn, Level};

/// All demo settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// One of trace, debug, info, warn, error
    pub log_level: String,
    pub movement: MovementConfig,
    pub advanced: AdvancedSettings,
    pub body: BodySettings,
    pub demo: DemoSettings,
    pub time: TimeConfig,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            movement: MovementConfig::default(),
            advanced: AdvancedSettings::default(),
            body: BodySettings::default(),
            demo: DemoSettings::default(),
            time: TimeConfig::default(),
        }
    }
}

impl GameSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("parkour"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                warn!("Failed to parse settings: {}, using defaults", e);
                Self::default()
            }),
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Parse settings from TOML text; missing fields take their defaults
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };

        let path = dir.join("settings.toml");

        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Log level for the subscriber, INFO when unrecognized
    pub fn log_level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }
}

/// Character capsule settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BodySettings {
    /// Capsule height including both caps
    pub height: f32,
    /// Capsule radius
    pub radius: f32,
    /// Body mass in kilograms
    pub mass: f32,
}

impl Default for BodySettings {
    fn default() -> Self {
        Self {
            height: 2.0,
            radius: 0.5,
            mass: 1.0,
        }
    }
}

/// Headless demo run settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// Simulated seconds to run
    pub duration: f32,
    /// Host frames per second driving input sampling
    pub frame_rate: f32,
    /// Distance from the runner's center to the wall face at the start
    pub wall_clearance: f32,
    /// Write the settings file back after the run
    pub save_on_exit: bool,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            duration: 6.0,
            frame_rate: 144.0,
            wall_clearance: 0.7,
            save_on_exit: false,
        }
    }
}

impl DemoSettings {
    /// Host frame length in seconds
    pub fn frame_delta(&self) -> f32 {
        if self.frame_rate > 0.0 {
            1.0 / self.frame_rate
        } else {
            1.0 / 60.0
        }
    }
}
