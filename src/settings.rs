//! Game settings and tunables
//!
//! Loaded from a JSON file. Every field is optional; missing ones take the
//! defaults below.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable naming the settings file
pub const SETTINGS_ENV: &str = "BAMBOO_BREAKOUT_SETTINGS";
/// File looked up in the working directory when the variable is unset
pub const DEFAULT_SETTINGS_FILE: &str = "bamboo-breakout.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for the impulse-direction RNG
    pub seed: u64,

    // === Ball tuning ===
    /// Magnitude of each impulse component (sign is random)
    pub impulse_factor: f32,
    /// Above this speed the ball is braked harder
    pub max_speed: f32,
    /// Axis speed at or below which the ball gets a nudge on that axis
    pub min_axis_speed: f32,
    /// Linear damping while faster than `max_speed`
    pub fast_damping: f32,
    /// Linear damping otherwise
    pub cruise_damping: f32,

    // === Audio ===
    /// Emit sound cues
    pub sound: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5eed_b00,

            impulse_factor: 3.0,
            max_speed: 400.0,
            min_axis_speed: 10.0,
            fast_damping: 0.4,
            cruise_damping: 0.1,

            sound: true,
        }
    }
}

/// Failure to read or write a settings file
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "settings I/O error: {}", e),
            SettingsError::Json(e) => write!(f, "settings JSON error: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Json(e)
    }
}

impl Settings {
    /// Where [`Settings::load`] looks
    pub fn default_path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from the default path, falling back to defaults
    pub fn load() -> Self {
        let path = Self::default_path();
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "max_speed": 250.0, "sound": false }"#).unwrap();
        assert_eq!(settings.max_speed, 250.0);
        assert!(!settings.sound);
        assert_eq!(settings.impulse_factor, Settings::default().impulse_factor);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            Settings::from_json("{ \"max_speed\": \"fast\" }"),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!(
            "bamboo-breakout-settings-{}.json",
            std::process::id()
        ));
        let settings = Settings {
            seed: 42,
            ..Default::default()
        };

        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("bamboo-breakout-does-not-exist.json");
        assert!(matches!(Settings::load_from(path), Err(SettingsError::Io(_))));
    }
}
