//! JSON configuration file.
//!
//! Stored in %APPDATA%/KeyViz/config.json. Every key is optional; missing
//! keys, a missing file or a malformed file all fall back to defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hotkey::{Modifiers, ParseModifiersError};
use crate::model::constants::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file i/o: {0}")]
    Io(#[from] io::Error),
    #[error("config file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    InvalidModifier(#[from] ParseModifiersError),
}

/// User settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Modifiers held with the layer number, e.g. `"ctrl"` or `"ctrl+alt"`.
    pub modifiers: String,
    /// Number of layers in the keymap.
    pub layer_count: usize,
    /// Ask the OS not to repeat the hotkey while it is held.
    pub no_repeat: bool,
    /// How often to check the modifier while peeking at a layer.
    pub hide_poll_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            modifiers: DEFAULT_MODIFIERS.to_string(),
            layer_count: DEFAULT_LAYER_COUNT,
            no_repeat: false,
            hide_poll_ms: DEFAULT_HIDE_POLL_MS,
        }
    }
}

impl Config {
    /// Read and validate a config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&contents)?;
        config.validate();
        Ok(config)
    }

    /// Load the user's config, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());
                Config::default()
            }
            Err(e) => {
                log::warn!("ignoring {}: {}", path.display(), e);
                Config::default()
            }
        }
    }

    /// Write pretty-printed JSON, creating the directory if needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Clamp values to their valid ranges.
    pub fn validate(&mut self) {
        self.layer_count = self.layer_count.max(MIN_LAYER_COUNT);
        self.hide_poll_ms = self.hide_poll_ms.clamp(MIN_HIDE_POLL_MS, MAX_HIDE_POLL_MS);
    }

    /// Modifier mask for the layer hotkeys.
    pub fn hotkey_modifiers(&self) -> Result<Modifiers, ConfigError> {
        let mut mods: Modifiers = self.modifiers.parse()?;
        if self.no_repeat {
            mods |= Modifiers::NOREPEAT;
        }
        Ok(mods)
    }
}

/// Config file path: %APPDATA%/KeyViz/config.json
pub fn config_path() -> PathBuf {
    let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(appdata).join("KeyViz").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = Config::default();
        assert_eq!(config.modifiers, "ctrl");
        assert_eq!(config.layer_count, DEFAULT_LAYER_COUNT);
        assert!(!config.no_repeat);
        assert_eq!(config.hotkey_modifiers().unwrap(), Modifiers::CONTROL);
    }

    #[test]
    fn missing_keys_take_defaults() {
        let config: Config = serde_json::from_str(r#"{ "layer_count": 3 }"#).unwrap();
        assert_eq!(config.layer_count, 3);
        assert_eq!(config.modifiers, DEFAULT_MODIFIERS);
        assert_eq!(config.hide_poll_ms, DEFAULT_HIDE_POLL_MS);
    }

    #[test]
    fn validate_clamps_ranges() {
        let mut config = Config {
            layer_count: 0,
            hide_poll_ms: 10,
            ..Config::default()
        };
        config.validate();
        assert_eq!(config.layer_count, MIN_LAYER_COUNT);
        assert_eq!(config.hide_poll_ms, MIN_HIDE_POLL_MS);

        config.hide_poll_ms = 60_000;
        config.validate();
        assert_eq!(config.hide_poll_ms, MAX_HIDE_POLL_MS);
    }

    #[test]
    fn no_repeat_adds_norepeat_flag() {
        let config = Config {
            modifiers: "ctrl+alt".to_string(),
            no_repeat: true,
            ..Config::default()
        };
        assert_eq!(
            config.hotkey_modifiers().unwrap(),
            Modifiers::CONTROL | Modifiers::ALT | Modifiers::NOREPEAT
        );
    }

    #[test]
    fn bad_modifier_is_an_error() {
        let config = Config {
            modifiers: "ctrl+banana".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            config.hotkey_modifiers(),
            Err(ConfigError::InvalidModifier(_))
        ));
    }

    #[test]
    fn save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("KeyViz").join("config.json");
        let config = Config {
            modifiers: "alt".to_string(),
            layer_count: 6,
            no_repeat: true,
            hide_poll_ms: 300,
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_io_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load_from(&dir.path().join("absent.json"));
        assert!(matches!(
            result,
            Err(ConfigError::Io(ref e)) if e.kind() == io::ErrorKind::NotFound
        ));
    }

    #[test]
    fn loaded_values_are_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "layer_count": 0, "hide_poll_ms": 5 }"#).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.layer_count, MIN_LAYER_COUNT);
        assert_eq!(config.hide_poll_ms, MIN_HIDE_POLL_MS);
    }
}
