use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration, shared by the launcher and the editor
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Catalog file configuration
    pub catalog: CatalogConfig,

    /// Launcher presentation configuration
    pub launcher: LauncherConfig,

    /// Editor window configuration
    pub editor: EditorConfig,
}

/// Catalog file configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path of the games file, relative paths resolve against the working directory
    pub path: PathBuf,
}

/// Launcher presentation configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LauncherConfig {
    /// Run full-screen
    pub fullscreen: bool,

    /// Window size when not full-screen
    pub window_width: f32,
    pub window_height: f32,

    /// Target frames per second for the animation tick
    pub frame_rate: u32,

    /// Image used for covers that are missing or fail to decode
    pub placeholder_cover: PathBuf,

    /// Optional TTF/OTF font replacing egui's default font
    pub font: Option<PathBuf>,

    /// Sound played on every navigation step
    pub navigate_sound: Option<PathBuf>,

    /// Sound played before launching a game
    pub select_sound: Option<PathBuf>,

    /// Stick deflection needed to count as a directional press
    pub axis_threshold: f32,

    /// Minimum time between two analog navigation steps
    pub axis_repeat_delay_ms: u64,
}

/// Editor window configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct EditorConfig {
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("games.json"),
        }
    }
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            fullscreen: true,
            window_width: 1024.0,
            window_height: 768.0,
            frame_rate: 60,
            placeholder_cover: PathBuf::from("covers/placeholder.png"),
            font: None,
            navigate_sound: None,
            select_sound: None,
            axis_threshold: 0.5,
            axis_repeat_delay_ms: 150,
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            window_width: 800.0,
            window_height: 600.0,
        }
    }
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("arcade-frontend")
            .join("config.toml")
    }

    /// Load configuration from file, falling back to defaults if it doesn't exist
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Configuration file not found, using defaults");
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        info!("Configuration loaded from {}", config_path.display());
        Ok(config)
    }

    /// Load configuration, never failing: broken files are reported and replaced by defaults
    pub fn load_or_default() -> Self {
        let config_path = Self::config_path();
        if !config_path.exists() {
            let config = Self::default();
            if let Err(e) = config.save_to(&config_path) {
                warn!("Could not write default configuration: {:#}", e);
            }
            return config;
        }

        match Self::load_from(&config_path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Error loading configuration: {:#}", e);
                Self::default()
            }
        }
    }

    /// Save configuration to file
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let config_str = toml::to_string(self)?;
        fs::write(config_path, config_str)?;

        info!("Configuration saved to {}", config_path.display());
        Ok(())
    }

    /// Apply a catalog path given on the command line
    pub fn with_catalog_override(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.catalog.path = path;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[launcher]\nfullscreen = false\nframe_rate = 30\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(!config.launcher.fullscreen);
        assert_eq!(config.launcher.frame_rate, 30);
        assert_eq!(config.launcher.axis_repeat_delay_ms, 150);
        assert_eq!(config.catalog.path, PathBuf::from("games.json"));
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.launcher.font = Some(PathBuf::from("fonts/arcade.ttf"));
        config.editor.window_width = 1000.0;

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn broken_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[launcher\nfullscreen = ").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn catalog_override_replaces_path() {
        let config = Config::default().with_catalog_override(Some(PathBuf::from("other.json")));
        assert_eq!(config.catalog.path, PathBuf::from("other.json"));
    }
}
