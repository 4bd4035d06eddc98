//! Configuration management
//!
//! Persistent speech defaults live in `~/.ttsbridge.cfg`, applied to the
//! bridge at startup. Everything here is optional; an absent key leaves the
//! engine's own default in place.

use crate::{BridgeError, Result};
use ini::Ini;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Bridge configuration backed by an INI file
pub struct BridgeConfig {
    ini: Ini,
    path: PathBuf,
}

impl BridgeConfig {
    /// Load configuration from the default path, creating it if missing
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from an explicit path, creating it if missing
    pub fn load_from(path: PathBuf) -> Result<Self> {
        debug!("Loading config from {:?}", path);

        let ini = if path.exists() {
            Ini::load_from_file(&path)
                .map_err(|e| BridgeError::IniParse(format!("Failed to load config: {}", e)))?
        } else {
            info!("Config file not found, creating default");
            let default = Self::default_config();
            default
                .write_to_file(&path)
                .map_err(|e| BridgeError::IniParse(format!("Failed to write config: {}", e)))?;
            default
        };

        Ok(Self { ini, path })
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        debug!("Saving config to {:?}", self.path);
        self.ini
            .write_to_file(&self.path)
            .map_err(|e| BridgeError::Config(format!("Failed to save config: {}", e)))
    }

    /// Config file path (`~/.ttsbridge.cfg`)
    fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".ttsbridge.cfg")
    }

    /// Expose the config file path for display
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn default_config() -> Ini {
        let mut ini = Ini::new();

        // Speech defaults are all optional; the shipped file only pins the
        // transform flag so the scale of a configured rate is explicit.
        ini.with_section(Some("speech"))
            .set("skip_rate_transform", "false");

        ini
    }

    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.ini
            .get_from(Some(section), key)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    fn get_float(&self, section: &str, key: &str) -> Option<f32> {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.parse().ok())
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Set a value, creating the section as needed
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.ini.with_section(Some(section)).set(key, value);
    }

    // Speech defaults

    /// Default voice id or display name
    pub fn voice(&self) -> Option<String> {
        self.get_string("speech", "voice")
    }

    /// Default language tag, used when no voice is configured to match
    pub fn language(&self) -> Option<String> {
        self.get_string("speech", "language")
    }

    /// Default speaking rate
    pub fn rate(&self) -> Option<f32> {
        self.get_float("speech", "rate")
    }

    /// Whether the configured rate is already on the engine scale
    pub fn skip_rate_transform(&self) -> bool {
        self.get_bool("speech", "skip_rate_transform", false)
    }

    /// Default pitch
    pub fn pitch(&self) -> Option<f32> {
        self.get_float("speech", "pitch")
    }
}
