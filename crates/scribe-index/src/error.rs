//! Error types for index construction

use thiserror::Error;

/// Errors that can occur while building the index
#[derive(Error, Debug)]
pub enum IndexError {
    /// Document has no title line; the document is unusable and produces
    /// no chunks
    #[error("Missing title line in {source_path}")]
    MissingTitle {
        /// Source location of the offending document
        source_path: String,
    },

    /// Embedding the chunk text failed
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Persisting or loading an index artifact failed
    #[error("Store error: {0}")]
    Store(#[from] scribe_store::StoreError),

    /// The corpus produced no chunks at all
    #[error("No chunks created. Check chunking configuration or document contents.")]
    EmptyCorpus,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
