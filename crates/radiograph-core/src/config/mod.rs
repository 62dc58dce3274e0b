//! Configuration management for Radiograph.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults. Every section implements `Default`, so a missing file or a
//! partial file both work.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use crate::prompt::Prompt;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for Radiograph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Web front-end settings
    pub server: ServerConfig,

    /// Upload limits
    pub limits: LimitsConfig,

    /// Inference service settings
    pub gemini: GeminiConfig,

    /// Instruction sent with each image
    pub prompt: PromptConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// - macOS: ~/Library/Application Support/com.radiograph.radiograph/config.toml
    /// - Linux: ~/.config/radiograph/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\radiograph\radiograph\config\config.toml
    ///
    /// Falls back to ~/.radiograph/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "radiograph", "radiograph")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".radiograph").join("config.toml")
            })
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

impl PromptConfig {
    /// Produce the prompt to send, reading `file` when set.
    pub fn resolve(&self) -> Result<Prompt, ConfigError> {
        let text = match &self.file {
            Some(file) => {
                let expanded = shellexpand::tilde(&file.to_string_lossy()).into_owned();
                std::fs::read_to_string(expanded)?
            }
            None => self.text.clone(),
        };
        Prompt::new(text)
            .ok_or_else(|| ConfigError::ValidationError("prompt must not be empty".into()))
    }
}
