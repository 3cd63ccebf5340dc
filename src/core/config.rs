//! Configuration management for wibl.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::error::{Result, WiblError};
use crate::core::indexer::PROGRESS_INTERVAL;
use crate::core::search::MAX_HITS;
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub indexing: IndexingConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Indexing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexingConfig {
    /// Files between two progress events
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u64,
}

/// Search configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Matches collected before a query stops scanning
    #[serde(default = "default_max_hits")]
    pub max_hits: usize,

    /// Match against file names only unless told otherwise
    #[serde(default)]
    pub only_filename: bool,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory for index files written without an explicit path
    #[serde(default = "default_index_dir")]
    pub index_dir: PathBuf,
}

// Default value functions
fn default_progress_interval() -> u64 {
    PROGRESS_INTERVAL
}

fn default_max_hits() -> usize {
    MAX_HITS
}

fn default_index_dir() -> PathBuf {
    PathBuf::from("./indexes")
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            progress_interval: default_progress_interval(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_hits: default_max_hits(),
            only_filename: false,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            index_dir: default_index_dir(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| WiblError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. WIBL_CONFIG env var
    /// 2. XDG config file (~/.config/wibl/config.toml)
    /// 3. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("WIBL_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else {
                Self::default()
            }
        };

        // Default index location moves under the XDG data directory
        if config.storage.index_dir == default_index_dir() {
            config.storage.index_dir = xdg.indexes_dir();
        }

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        if let Ok(interval) = env::var("WIBL_PROGRESS_INTERVAL") {
            if let Ok(n) = interval.parse() {
                self.indexing.progress_interval = n;
            }
        }

        if let Ok(max_hits) = env::var("WIBL_MAX_HITS") {
            if let Ok(n) = max_hits.parse() {
                self.search.max_hits = n;
            }
        }
        if let Ok(only_filename) = env::var("WIBL_ONLY_FILENAME") {
            if let Ok(flag) = only_filename.parse() {
                self.search.only_filename = flag;
            }
        }

        if let Ok(index_dir) = env::var("WIBL_INDEX_DIR") {
            self.storage.index_dir = PathBuf::from(index_dir);
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.indexing.progress_interval == 0 {
            return Err(WiblError::ConfigError(
                "Progress interval must be non-zero".to_string(),
            ));
        }

        if self.search.max_hits == 0 {
            return Err(WiblError::ConfigError(
                "Max hits must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!(
            "  Progress interval: {} files",
            self.indexing.progress_interval
        );
        tracing::info!("  Max hits: {}", self.search.max_hits);
        tracing::info!("  Only filename: {}", self.search.only_filename);
        tracing::info!("  Index dir: {:?}", self.storage.index_dir);
    }
}
