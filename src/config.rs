//! Configuration management for chanscope
//!
//! Config is stored at ~/.config/chanscope/config.toml

use crate::error::{ChanError, ChanResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default API root (read-only JSON API)
pub const DEFAULT_API_URL: &str = "https://a.4cdn.org/";

/// Default search endpoint
pub const DEFAULT_SEARCH_URL: &str = "https://find.4chan.org/api";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Cache directory used when no platform cache dir is available
pub const FALLBACK_CACHE_DIR: &str = "a.4cdn.org";

/// Config directory name
const CONFIG_DIR: &str = "chanscope";

/// Config file name
const CONFIG_FILE: &str = "config.toml";

/// chanscope configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// API root; resource paths are appended to it
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Search endpoint
    #[serde(default = "default_search_url")]
    pub search_url: String,

    /// Where responses are cached
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_search_url() -> String {
    DEFAULT_SEARCH_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            search_url: default_search_url(),
            cache_dir: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Get the config directory path (~/.config/chanscope/)
    pub fn dir_path() -> ChanResult<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(CONFIG_DIR))
            .ok_or_else(|| ChanError::Config("Could not determine config directory".into()))
    }

    /// Get the config file path (~/.config/chanscope/config.toml)
    pub fn file_path() -> ChanResult<PathBuf> {
        Self::dir_path().map(|p| p.join(CONFIG_FILE))
    }

    /// Check if config file exists
    pub fn exists() -> bool {
        Self::file_path().map(|p| p.exists()).unwrap_or(false)
    }

    /// Load config from file, returning defaults if file doesn't exist
    pub fn load() -> ChanResult<Self> {
        let path = Self::file_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)?;
        Self::parse(&contents)
    }

    /// Parse config from TOML text; empty text yields defaults
    pub fn parse(contents: &str) -> ChanResult<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut config: Config = toml::from_str(contents)
            .map_err(|e| ChanError::Config(format!("Failed to parse config: {}", e)))?;
        config.normalize();
        config.validate()?;

        Ok(config)
    }

    /// Save config to file, creating directories if needed
    pub fn save(&self) -> ChanResult<()> {
        let dir = Self::dir_path()?;
        let path = Self::file_path()?;

        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| ChanError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&path, contents)?;

        Ok(())
    }

    /// API paths are appended directly, so the root must end in a slash
    pub fn normalize(&mut self) {
        if !self.api_url.ends_with('/') {
            self.api_url.push('/');
        }
    }

    /// Validate the config values
    pub fn validate(&self) -> ChanResult<()> {
        for (name, url) in [("API URL", &self.api_url), ("Search URL", &self.search_url)] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ChanError::Config(format!(
                    "{} must start with http:// or https://",
                    name
                )));
            }
        }

        if self.timeout_secs == 0 {
            return Err(ChanError::Config("Timeout must be at least 1 second".into()));
        }

        Ok(())
    }

    /// Cache directory to use: configured, platform cache dir, or ./a.4cdn.org
    pub fn resolved_cache_dir(&self) -> PathBuf {
        if let Some(dir) = &self.cache_dir {
            return dir.clone();
        }
        dirs::cache_dir()
            .map(|p| p.join(CONFIG_DIR))
            .unwrap_or_else(|| PathBuf::from(FALLBACK_CACHE_DIR))
    }
}
