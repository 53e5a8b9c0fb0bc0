//! Server configuration

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse the configuration file
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Completion provider settings
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSettings {
    /// Provider kind: `mock` or `ollama`
    #[serde(default = "default_provider_kind")]
    pub kind: String,

    /// Ollama endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Ollama model name
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_provider_kind() -> String {
    "mock".to_string()
}

fn default_endpoint() -> String {
    scribe_llm::ollama::DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    "llama3".to_string()
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            kind: default_provider_kind(),
            endpoint: default_endpoint(),
            model: default_model(),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// IP address to bind
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Port to bind
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Directory holding the persisted index artifacts
    #[serde(default = "default_index_dir")]
    pub index_dir: PathBuf,

    /// Embedding dimension the index was built with
    #[serde(default = "default_dimension")]
    pub embedding_dimension: usize,

    /// Completion provider settings
    #[serde(default)]
    pub provider: ProviderSettings,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    8080
}

fn default_index_dir() -> PathBuf {
    PathBuf::from("data/indexes")
}

fn default_dimension() -> usize {
    384
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            index_dir: default_index_dir(),
            embedding_dimension: default_dimension(),
            provider: ProviderSettings::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// The full bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
