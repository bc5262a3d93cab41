//! Persisted defaults read once at startup
//!
//! Stored as JSON. A missing or unreadable file yields the defaults, the
//! same way a fresh installation behaves.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::models::{Color, DEFAULT_NOMENCLATURE_COLOR};
use crate::core::resolver::APP_DIR_NAME;

/// Settings file name inside the config directory
pub const SETTINGS_FILE: &str = "settings.json";

/// User settings relevant to surface nomenclature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Label color as `"r,g,b"`
    #[serde(default = "default_color")]
    pub nomenclature_color: String,

    /// Whether labels start enabled
    #[serde(default)]
    pub flag_nomenclature_labels: bool,

    /// Extra data roots searched before the defaults
    #[serde(default)]
    pub data_dirs: Vec<PathBuf>,
}

fn default_color() -> String {
    DEFAULT_NOMENCLATURE_COLOR.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            nomenclature_color: default_color(),
            flag_nomenclature_labels: false,
            data_dirs: Vec::new(),
        }
    }
}

impl Settings {
    /// Parsed label color, falling back to the default on bad input
    pub fn color(&self) -> Color {
        match self.nomenclature_color.parse() {
            Ok(color) => color,
            Err(err) => {
                warn!(error = %err, "using default nomenclature color");
                DEFAULT_NOMENCLATURE_COLOR
            }
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load from file path, returning defaults if the file doesn't exist or is malformed
    pub fn load_from_file(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_json(&content).unwrap_or_else(|err| {
                warn!(file = %path.display(), error = %err, "malformed settings, using defaults");
                Self::default()
            }),
            Err(err) => {
                warn!(file = %path.display(), error = %err, "cannot read settings, using defaults");
                Self::default()
            }
        }
    }

    /// Save to file path, creating parent directories
    pub fn save_to_file(&self, path: &Path) -> crate::core::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Platform location of the settings file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(SETTINGS_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.color(), DEFAULT_NOMENCLATURE_COLOR);
        assert!(!settings.flag_nomenclature_labels);
        assert!(settings.data_dirs.is_empty());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{"flag_nomenclature_labels": true}"#).unwrap();
        assert!(settings.flag_nomenclature_labels);
        assert_eq!(settings.color(), DEFAULT_NOMENCLATURE_COLOR);
    }

    #[test]
    fn test_bad_color_falls_back() {
        let settings = Settings::from_json(r#"{"nomenclature_color": "green"}"#).unwrap();
        assert_eq!(settings.color(), DEFAULT_NOMENCLATURE_COLOR);
    }

    #[test]
    fn test_custom_color() {
        let settings = Settings::from_json(r#"{"nomenclature_color": "1.0,0.5,0.0"}"#).unwrap();
        assert_eq!(settings.color(), Color::new(1.0, 0.5, 0.0));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load_from_file(&dir.path().join("nope.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load_from_file(&path), Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILE);
        let settings = Settings {
            nomenclature_color: "0.2,0.3,0.4".to_string(),
            flag_nomenclature_labels: true,
            data_dirs: vec![PathBuf::from("/opt/planetarium")],
        };
        settings.save_to_file(&path).unwrap();
        assert_eq!(Settings::load_from_file(&path), settings);
    }
}
