//! Configuration loading, validation, and management for the assistant.
//!
//! Loads configuration from `~/.carcare/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use carcare_core::provider::GenerationConfig;
use carcare_knowledge::KnowledgeTable;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The root configuration structure.
///
/// Maps directly to `~/.carcare/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key for the generative endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Remote endpoint settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Retry and timeout policy for the remote call
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Sampling parameters sent with every prompt
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Facts used by the offline fallback
    #[serde(default)]
    pub knowledge: KnowledgeTable,
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("provider", &self.provider)
            .field("resolver", &self.resolver)
            .field("generation", &self.generation)
            .field("knowledge", &self.knowledge)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL up to and including the API version segment
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_model")]
    pub model: String,
}

fn default_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".into()
}
fn default_model() -> String {
    "gemini-1.5-pro".into()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: default_model(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Total attempts against the remote endpoint (not extra retries)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Fixed pause between attempts
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,

    /// Per-attempt timeout
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_max_retries() -> u32 {
    3
}
fn default_retry_delay_secs() -> u64 {
    2
}
fn default_request_timeout_secs() -> u64 {
    30
}

impl ResolverConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_delay_secs: default_retry_delay_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.carcare/config.toml).
    ///
    /// Environment overrides:
    /// - `CARCARE_API_KEY`, then `GOOGLE_API_KEY` (only when the file has no key)
    /// - `CARCARE_MODEL`
    /// - `CARCARE_API_URL`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.api_key = config.api_key.filter(|k| !k.trim().is_empty());

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production).
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        // A blank file key counts as unset.
        self.api_key = self.api_key.take().filter(|k| !k.trim().is_empty());
        if self.api_key.is_none() {
            self.api_key = non_empty("CARCARE_API_KEY").or_else(|| non_empty("GOOGLE_API_KEY"));
        }

        if let Some(model) = non_empty("CARCARE_MODEL") {
            self.provider.model = model;
        }

        if let Some(url) = non_empty("CARCARE_API_URL") {
            self.provider.api_url = url;
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".carcare")
    }

    /// Get the configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolver.max_retries == 0 {
            return Err(ConfigError::ValidationError(
                "resolver.max_retries must be at least 1".into(),
            ));
        }

        if self.resolver.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "resolver.request_timeout_secs must be > 0".into(),
            ));
        }

        let g = &self.generation;
        if !(0.0..=2.0).contains(&g.temperature) {
            return Err(ConfigError::ValidationError(
                "generation.temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if !(0.0..=1.0).contains(&g.top_p) {
            return Err(ConfigError::ValidationError(
                "generation.top_p must be between 0.0 and 1.0".into(),
            ));
        }

        if g.max_output_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "generation.max_output_tokens must be > 0".into(),
            ));
        }

        if self.provider.api_url.trim().is_empty() || self.provider.model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "provider.api_url and provider.model must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> Result<String, ConfigError> {
        toml::to_string_pretty(&Self::default())
            .map_err(|e| ConfigError::WriteError(e.to_string()))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            provider: ProviderConfig::default(),
            resolver: ResolverConfig::default(),
            generation: GenerationConfig::default(),
            knowledge: KnowledgeTable::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    #[error("Failed to serialize config: {0}")]
    WriteError(String),
}

impl From<ConfigError> for carcare_core::Error {
    fn from(e: ConfigError) -> Self {
        carcare_core::Error::Config {
            message: e.to_string(),
        }
    }
}
