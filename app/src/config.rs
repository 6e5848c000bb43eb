//! Application configuration storage
//!
//! Handles persistent storage of backend and server settings, plus the
//! environment overrides applied at startup.

use std::path::{Path, PathBuf};

use inference::constants::{backends, defaults as inference_defaults};
use inference::BackendConfig;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::constants::{defaults, env, paths};

/// Full application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Registry name of the backend ("gemini" or "openai-compatible")
    pub backend: String,
    /// Model used for extraction and synthesis
    pub model: String,
    /// Override for the backend's API host
    pub base_url: Option<String>,
    /// Credential for hosted APIs. Usually supplied through the environment.
    pub api_key: Option<String>,
    /// Thinking tokens granted to design extraction
    pub thinking_budget: u32,
    /// Address the HTTP server binds to
    pub bind_address: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: backends::GEMINI.to_string(),
            model: inference_defaults::MODEL.to_string(),
            base_url: None,
            api_key: None,
            thinking_budget: inference_defaults::THINKING_BUDGET,
            bind_address: defaults::BIND_ADDRESS.to_string(),
        }
    }
}

impl AppConfig {
    /// Platform config directory for Mirage, if the platform has one
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(paths::CONFIG_DIR_NAME))
    }

    /// Load configuration from disk
    pub async fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(paths::CONFIG_FILE_NAME);

        if !fs::try_exists(&config_path).await? {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path).await?;
        serde_json::from_str(&contents).map_err(ConfigError::Parse)
    }

    /// Save configuration to disk
    pub async fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        fs::create_dir_all(config_dir).await?;

        let config_path = config_dir.join(paths::CONFIG_FILE_NAME);
        let contents = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        fs::write(&config_path, contents).await?;

        log::info!("Configuration saved to {:?}", config_path);
        Ok(())
    }

    /// Apply environment overrides. Blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(key) = get(env::API_KEY).or_else(|| get(env::GEMINI_API_KEY)) {
            self.api_key = Some(key);
        }
        if let Some(bind) = get(env::BIND) {
            self.bind_address = bind;
        }
        if let Some(backend) = get(env::BACKEND) {
            self.backend = backend;
        }
        if let Some(model) = get(env::MODEL) {
            self.model = model;
        }
        if let Some(base_url) = get(env::BASE_URL) {
            self.base_url = Some(base_url);
        }
    }

    /// Check if a credential is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    /// Connection settings for the inference gateway
    ///
    /// The thinking budget is left to individual requests so that prompt
    /// synthesis runs without one.
    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig {
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            thinking_budget: None,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(serde_json::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(serde_json::Error),
}
