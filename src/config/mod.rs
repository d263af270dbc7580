//! Configuration management for lectio

pub mod settings;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

pub use settings::{FileStore, KeyValueStore, MemoryStore, SettingsError, SettingsStore};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where book JSON files come from: an http(s) base URL or a directory
    pub source: String,

    /// Book opened on startup
    pub initial_book: String,

    /// Timeout for a single book request
    pub request_timeout_secs: u64,

    /// Vim mode enabled
    pub vim_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        let source = Self::data_dir()
            .map(|dir| dir.join("bible_books"))
            .unwrap_or_else(|_| PathBuf::from("bible_books"));
        Self {
            source: source.to_string_lossy().into_owned(),
            initial_book: "Genesis".to_string(),
            request_timeout_secs: 15,
            vim_mode: true,
        }
    }
}

impl Config {
    /// Load configuration from disk, or create default if not exists
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;
            serde_json::from_str(&contents).with_context(|| "Failed to parse config.json")
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;

        Ok(())
    }

    /// Request timeout as a [`Duration`]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "lectio").context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "lectio").context("Failed to determine data directory")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    /// Key-value file holding reader settings
    pub fn storage_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("storage.json"))
    }

    /// Log file used while the TUI owns the terminal
    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("lectio.log"))
    }

    /// Settings store in the data directory, or in memory if there is none
    pub fn settings_store() -> SettingsStore {
        match Self::storage_path() {
            Ok(path) => SettingsStore::new(FileStore::new(path)),
            Err(e) => {
                tracing::warn!("Settings will not persist: {}", e);
                SettingsStore::in_memory()
            }
        }
    }
}
