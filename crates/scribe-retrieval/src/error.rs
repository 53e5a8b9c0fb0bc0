//! Error types for the retrieval core

use thiserror::Error;

/// Errors that can occur during a retrieval call
#[derive(Error, Debug)]
pub enum RetrievalError {
    /// A required persisted store is absent or unreadable
    #[error(transparent)]
    Store(#[from] scribe_store::StoreError),

    /// Embedding the query failed
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Vector search failed
    #[error("Search error: {0}")]
    Search(String),

    /// Query options outside their permitted bounds
    #[error("Invalid query options: {0}")]
    InvalidOptions(String),
}
