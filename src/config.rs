use crate::models::Typography;
use eyre::Result;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Typography and zoom configuration consumed by the reflow engine.
/// Unknown or missing fields fall back to defaults, so old configuration
/// files keep loading across upgrades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub font_size_px: f32,
    pub line_height: f32,
    pub default_zoom: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_size_px: 18.0,
            line_height: 1.6,
            default_zoom: 1.0,
        }
    }
}

impl Settings {
    pub fn typography(&self) -> Typography {
        Typography {
            font_size_px: self.font_size_px,
            line_height: self.line_height,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub settings: Settings,
    filepath: PathBuf,
}

impl Config {
    pub fn new() -> Result<Self> {
        let prefix = get_app_data_prefix()?;
        let filepath = prefix.join("configuration.json");
        Self::load_from(filepath)
    }

    /// Load configuration from a custom path, writing a default file if
    /// none exists yet. A malformed file falls back to defaults rather
    /// than refusing to start the reader.
    pub fn load_from(filepath: PathBuf) -> Result<Self> {
        let mut settings = Settings::default();

        if filepath.exists() {
            let config_str = fs::read_to_string(&filepath)?;
            if let Ok(user_settings) = serde_json::from_str::<Settings>(&config_str) {
                settings = user_settings;
            }
        } else {
            if let Some(parent) = filepath.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&filepath, serde_json::to_string_pretty(&settings)?)?;
        }

        Ok(Self { settings, filepath })
    }

    /// Get the configuration file path
    pub fn filepath(&self) -> &PathBuf {
        &self.filepath
    }

    /// Save current configuration to file
    pub fn save(&self) -> Result<()> {
        let config_str = serde_json::to_string_pretty(&self.settings)?;

        // Ensure directory exists before writing
        if let Some(parent) = self.filepath.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.filepath, config_str)?;
        Ok(())
    }
}

pub fn get_app_data_prefix() -> Result<PathBuf> {
    if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
        let path = PathBuf::from(config_home).join("folio");
        return Ok(path);
    } else if let Some(home) = std::env::var_os("HOME") {
        let path = PathBuf::from(home.clone()).join(".config").join("folio");
        if path.exists() {
            return Ok(path);
        } else {
            return Ok(PathBuf::from(home).join(".folio"));
        }
    } else if let Some(user_profile) = std::env::var_os("USERPROFILE") {
        return Ok(PathBuf::from(user_profile).join(".folio"));
    }

    Err(eyre::eyre!(
        "Could not determine application data directory"
    ))
}
