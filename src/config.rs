//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::constants::{APP_NAME, CONFIG_DIR_ENV};
use crate::models::{AccentColor, DEFAULT_ACCENT};
use crate::storage::FileStorage;

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Preferences file override (defaults to `preferences.toml` in the config dir)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<PathBuf>,
}

/// UI preferences configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Accent used when no valid preference is stored
    #[serde(default = "default_accent")]
    pub default_accent: AccentColor,
}

fn default_accent() -> AccentColor {
    DEFAULT_ACCENT
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_accent: default_accent(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - `$FOLIO_CONFIG_DIR/config.toml` when the variable is set
/// - Linux: `~/.config/Folio/config.toml`
/// - macOS: `~/Library/Application Support/Folio/config.toml`
/// - Windows: `%APPDATA%\Folio\config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the config directory path.
    ///
    /// `$FOLIO_CONFIG_DIR` wins when set and non-empty; otherwise the
    /// platform config directory joined with the application name.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Gets the path of the preferences file, honoring the override.
    pub fn preferences_path(&self) -> Result<PathBuf> {
        match &self.paths.preferences {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("preferences.toml")),
        }
    }

    /// Opens the preference storage this configuration points at.
    pub fn preference_storage(&self) -> Result<FileStorage> {
        Ok(FileStorage::new(self.preferences_path()?))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - the preferences override is not a directory
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.paths.preferences {
            if path.is_dir() {
                anyhow::bail!(
                    "Preferences path is a directory, expected a file: {}",
                    path.display()
                );
            }
        }

        Ok(())
    }
}
