use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{HaleError, Result};

/// Top-level configuration for the Hale engine.
///
/// Loaded from a TOML file. Each section corresponds to one subsystem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HaleConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

impl HaleConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: HaleConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level used when `RUST_LOG` is not set: trace, debug, info, warn,
    /// error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Language-model service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Model identifier sent to the service.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum tokens the model may generate per response.
    pub max_output_tokens: u32,
    /// API key for the service. Usually left unset and supplied via the
    /// environment instead.
    pub api_key: Option<String>,
    /// Environment variable consulted when `api_key` is unset.
    pub api_key_env: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_output_tokens: 1024,
            api_key: None,
            api_key_env: "HALE_MODEL_API_KEY".to_string(),
        }
    }
}

impl ModelConfig {
    /// Check that the configuration is complete enough to reach the model
    /// service. Checked once at engine construction, before any request.
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(HaleError::Config("model identifier is empty".to_string()));
        }
        if self.resolve_api_key().is_none() {
            return Err(HaleError::Config(format!(
                "no API key configured: set model.api_key or the {} environment variable",
                self.api_key_env
            )));
        }
        Ok(())
    }

    /// The API key from config, falling back to the configured environment
    /// variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
    }
}

/// Knowledge dataset settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeConfig {
    /// Directory holding the dataset files.
    pub data_dir: String,
    /// Articles retrieved per request for context and citations.
    pub max_sources: usize,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            data_dir: "data/knowledge".to_string(),
            max_sources: 3,
        }
    }
}

/// Chat request limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Maximum user message length in characters.
    pub max_message_length: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_message_length: 2000,
        }
    }
}
