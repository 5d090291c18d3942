//! Application configuration.
//!
//! Read from an optional TOML file; every key has a default. The API key is
//! only ever taken from the environment.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::gateways::DEFAULT_LIST_LIMIT;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub generation: GenerationConfig,
    pub storage: StorageConfig,
    pub share: ShareConfig,
}

/// Chat-completions endpoint and request parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationConfig {
    /// Base URL; `/chat/completions` is appended
    pub api_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    /// End-user tag forwarded to the service
    pub user: Option<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 1000,
            timeout_secs: 60,
            user: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    pub dir: PathBuf,
    pub list_limit: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("saved_descriptions"),
            list_limit: DEFAULT_LIST_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ShareConfig {
    /// Scheme and host that share links are built on
    pub origin: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            origin: "http://localhost:3000".to_string(),
        }
    }
}

impl AppConfig {
    /// Parse TOML content; absent keys keep their defaults
    pub fn parse(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            details: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        debug!("Loaded configuration from {}", path.display());
        Self::parse(&content, &path.display().to_string())
    }

    /// Load `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.generation.model.trim().is_empty() {
            return Err(ConfigError::Invalid("generation.model cannot be empty".to_string()));
        }
        if self.generation.max_tokens == 0 {
            return Err(ConfigError::Invalid("generation.max_tokens must be positive".to_string()));
        }
        if self.generation.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "generation.timeout_secs must be positive".to_string(),
            ));
        }
        if self.storage.list_limit == 0 {
            return Err(ConfigError::Invalid("storage.list_limit must be positive".to_string()));
        }
        Ok(())
    }
}

/// Secret that never shows up in `Debug` output or logs
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(Self(key)),
            _ => Err(ConfigError::MissingApiKey),
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}
