use crate::error::GameResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "FACEOFF_CONFIG";

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Strikes before control passes to the other player
    pub max_strikes: u32,
    /// Names used when the CLI creates players
    pub player_names: [String; 2],
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_strikes: 3,
            player_names: ["Player 1".to_string(), "Player 2".to_string()],
            log_level: "INFO".to_string(),
        }
    }
}

impl Config {
    /// Load config from the default location, or fall back to defaults
    pub fn load() -> GameResult<Self> {
        Self::load_from(&config_path())
    }

    /// Load config from `path`
    ///
    /// A missing file yields defaults. A corrupt file is moved aside to
    /// `*.json.corrupt` and defaults are used.
    pub fn load_from(path: &Path) -> GameResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str::<Config>(&content) {
            Ok(config) => Ok(config.validated()),
            Err(e) => {
                tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                let backup_path = path.with_extension("json.corrupt");
                let _ = std::fs::rename(path, &backup_path);
                Ok(Self::default())
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> GameResult<()> {
        self.save_to(&config_path())
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> GameResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Replace out-of-range values with their defaults
    fn validated(mut self) -> Self {
        if self.max_strikes == 0 {
            let default = Self::default().max_strikes;
            tracing::warn!("⚠️ max_strikes must be at least 1, using {}", default);
            self.max_strikes = default;
        }
        self
    }
}

pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("faceoff")
        .join("config.json")
}
