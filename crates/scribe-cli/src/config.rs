//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Directory holding the markdown corpus
    #[serde(default = "default_corpus_dir")]
    pub corpus_dir: PathBuf,

    /// Directory holding the persisted index artifacts
    #[serde(default = "default_index_dir")]
    pub index_dir: PathBuf,

    /// Embedding dimension used for index build and query
    #[serde(default = "default_dimension")]
    pub embedding_dimension: usize,

    /// Completion provider for `scribe ask`
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Completion provider selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
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

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl CliConfig {
    /// Get the configuration file path.
    pub fn path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CliError::Config("Could not find config directory".into()))?;
        Ok(config_dir.join("scribe").join("config.toml"))
    }

    /// Load configuration from the given path, the default location, or
    /// fall back to defaults.
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path.clone(),
            None => Self::path()?,
        };

        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let config: CliConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, contents)?;
        Ok(())
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            corpus_dir: default_corpus_dir(),
            index_dir: default_index_dir(),
            embedding_dimension: default_dimension(),
            provider: ProviderConfig::default(),
            settings: Settings::default(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: default_provider_kind(),
            endpoint: default_endpoint(),
            model: default_model(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_corpus_dir() -> PathBuf {
    PathBuf::from("data/corpus")
}

fn default_index_dir() -> PathBuf {
    PathBuf::from("data/indexes")
}

fn default_dimension() -> usize {
    384
}

fn default_provider_kind() -> String {
    "mock".to_string()
}

fn default_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama3".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
