//! Configuration for index construction

use serde::{Deserialize, Serialize};

/// Configuration for the chunker
///
/// Sizes are in characters; chunking is deliberately token-free so the
/// index does not depend on any particular embedding model's tokenizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkConfig {
    /// Maximum chunk size (characters)
    pub max_chars: usize,

    /// Trailing characters of a closed chunk reused to seed the next one,
    /// so adjacent chunks share context across the boundary
    pub overlap_chars: usize,

    /// Metadata fields copied into the context header, in header order
    pub hint_fields: Vec<String>,
}

impl ChunkConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_chars == 0 {
            return Err("max_chars must be greater than 0".to_string());
        }
        if self.overlap_chars >= self.max_chars {
            return Err("overlap_chars must be smaller than max_chars".to_string());
        }
        Ok(())
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_chars: 1200,
            overlap_chars: 200,
            hint_fields: [
                "status",
                "system",
                "owner_team",
                "last_updated",
                "severity",
                "oncall_team",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}
