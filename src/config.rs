//! Configuration management for lessonsmith
//!
//! Settings live in `~/.lessonsmith/config.toml`. Every field has a default,
//! so the file is optional. Environment variables override the file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::llm::openrouter::OPENROUTER_API_URL;
use crate::llm::types::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use crate::llm::{GenerationParams, LlmClient, OpenRouterProvider};

/// Provider credential; when unset the service runs offline
pub const ENV_API_KEY: &str = "OPENROUTER_API_KEY";
pub const ENV_MODEL: &str = "LESSONSMITH_MODEL";
pub const ENV_PORT: &str = "LESSONSMITH_PORT";

/// LLM provider settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider credential. Usually supplied through the environment instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Socket timeout for provider calls
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: OPENROUTER_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: 60,
        }
    }
}

impl LlmConfig {
    /// Credential if present and non-blank
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    pub fn params(&self) -> GenerationParams {
        GenerationParams {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    /// Build the client: remote when a credential is configured, offline otherwise
    pub fn build_client(&self) -> Result<LlmClient> {
        match self.credential() {
            Some(key) => {
                let provider = OpenRouterProvider::new(
                    key.to_string(),
                    self.base_url.clone(),
                    Duration::from_secs(self.timeout_secs),
                )?;
                Ok(LlmClient::new(Arc::new(provider), self.params()))
            }
            None => Ok(LlmClient::offline()),
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    /// Load the bundled example lessons at startup
    pub seed_examples: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            seed_examples: true,
        }
    }
}

/// lessonsmith configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Version of config schema (for future migrations)
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            llm: LlmConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// Get the config file path (~/.lessonsmith/config.toml)
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".lessonsmith").join("config.toml"))
    }

    /// Load config from `path`, or return None if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(Some(config))
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;
        std::fs::write(path, content)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// File config (or defaults) with process environment overrides applied
    pub fn resolve(path: &Path) -> Result<Self> {
        let mut config = Self::load_from(path)?.unwrap_or_default();
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(key) = lookup(ENV_API_KEY) {
            self.llm.api_key = Some(key);
        }
        if let Some(model) = lookup(ENV_MODEL).filter(|m| !m.trim().is_empty()) {
            self.llm.model = model;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}: {}", ENV_PORT, port))?;
        }
        Ok(())
    }
}

/// Mask a credential for display, keeping only its last four characters
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}
