//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Corpus parsing error
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Index construction error
    #[error(transparent)]
    Index(#[from] scribe_index::IndexError),

    /// Retrieval error
    #[error(transparent)]
    Retrieval(#[from] scribe_retrieval::RetrievalError),

    /// Answer pipeline error
    #[error(transparent)]
    Answer(#[from] scribe_answer::AnswerError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
