//! Configuration for the generator.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (MUSEUM_HUNT_MODEL, MUSEUM_HUNT_API_BASE, MUSEUM_HUNT_ADDRESS)
//! 2. Config file (.museum-hunt/config.yaml)
//! 3. Defaults
//!
//! Config file discovery:
//! - Searches current directory and parents for .museum-hunt/config.yaml
//! - Falls back to <config_dir>/museum-hunt/config.yaml
//!
//! The model credential is only ever read from `HF_TOKEN`. Loading fails
//! when it is missing so the process stops at startup, not mid-generation.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::adapters::{DEFAULT_API_BASE, DEFAULT_MODEL};

/// Environment variable holding the model service credential
pub const TOKEN_ENV: &str = "HF_TOKEN";

const MODEL_ENV: &str = "MUSEUM_HUNT_MODEL";
const API_BASE_ENV: &str = "MUSEUM_HUNT_API_BASE";
const ADDRESS_ENV: &str = "MUSEUM_HUNT_ADDRESS";

const CONFIG_DIR_NAME: &str = ".museum-hunt";
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelConfig {
    /// Model identifier (e.g. "mistralai/Mixtral-8x7B-Instruct-v0.1")
    pub id: Option<String>,
    /// Base URL of the chat-completions API
    pub api_base: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfig {
    /// Address the web form binds to
    pub address: Option<String>,
}

/// Resolved model settings
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    pub model: String,
    pub api_base: String,
    pub timeout_seconds: u64,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_seconds: 300,
            max_tokens: 2048,
            temperature: 0.7,
        }
    }
}

/// Resolved server settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:7860".to_string(),
        }
    }
}

/// The model service credential. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// First few characters followed by a mask
    pub fn redacted(&self) -> String {
        let prefix: String = self.0.chars().take(3).collect();
        format!("{}****", prefix)
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiToken({})", self.redacted())
    }
}

/// Fully resolved configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub model: ModelSettings,
    pub server: ServerSettings,
    pub api_token: ApiToken,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Merge a parsed config file with environment lookups.
    ///
    /// `env` abstracts `std::env::var` so tests can supply their own values.
    pub fn resolve<F>(file: Option<&ConfigFile>, config_file: Option<PathBuf>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = env(TOKEN_ENV)
            .filter(|t| !t.trim().is_empty())
            .with_context(|| format!("{} environment variable is required", TOKEN_ENV))?;

        let defaults = ModelSettings::default();
        let model_cfg = file.map(|f| f.model.clone()).unwrap_or_default();
        let server_cfg = file.map(|f| f.server.clone()).unwrap_or_default();

        let model = ModelSettings {
            model: env(MODEL_ENV)
                .or(model_cfg.id)
                .unwrap_or(defaults.model),
            api_base: env(API_BASE_ENV)
                .or(model_cfg.api_base)
                .unwrap_or(defaults.api_base),
            timeout_seconds: model_cfg.timeout_seconds.unwrap_or(defaults.timeout_seconds),
            max_tokens: model_cfg.max_tokens.unwrap_or(defaults.max_tokens),
            temperature: model_cfg.temperature.unwrap_or(defaults.temperature),
        };

        let server = ServerSettings {
            address: env(ADDRESS_ENV)
                .or(server_cfg.address)
                .unwrap_or_else(|| ServerSettings::default().address),
        };

        Ok(Self {
            model,
            server,
            api_token: ApiToken::new(token),
            config_file,
        })
    }
}

/// Find config file by searching current directory and parents, then the
/// user config directory
fn find_config_file() -> Option<PathBuf> {
    if let Ok(mut current) = std::env::current_dir() {
        loop {
            let config_path = current.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }

            if !current.pop() {
                break;
            }
        }
    }

    let user_config = dirs::config_dir()?.join("museum-hunt").join(CONFIG_FILE_NAME);
    user_config.exists().then_some(user_config)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Load configuration from all sources
pub fn load_config() -> Result<ResolvedConfig> {
    let config_path = find_config_file();

    let file = match config_path {
        Some(ref path) => Some(load_config_file(path)?),
        None => None,
    };

    ResolvedConfig::resolve(file.as_ref(), config_path, |key| std::env::var(key).ok())
}
