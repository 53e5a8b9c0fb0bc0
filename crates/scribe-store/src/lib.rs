//! Scribe Storage Layer
//!
//! Persists and reloads the artifacts of index construction: the chunk
//! store (newline-delimited JSON, one chunk record per line) and the vector
//! index used for similarity search.
//!
//! # Architecture
//!
//! - `JsonlChunkStore` holds the chunk records and maps search ordinals
//!   back to chunks
//! - `VectorIndex` wraps HNSW for nearest-neighbor search over embeddings
//! - `EmbeddingModel` is the seam to the external embedding collaborator;
//!   a deterministic hash-based model is provided for tests and local runs
//!
//! Both stores are loaded once at startup and treated as immutable for the
//! lifetime of the process; query traffic never mutates them, so concurrent
//! reads need no locking.
//!
//! # Examples
//!
//! ```no_run
//! use scribe_store::JsonlChunkStore;
//!
//! let store = JsonlChunkStore::load("data/indexes/chunks.jsonl").unwrap();
//! println!("{} chunks", store.len());
//! ```

#![warn(missing_docs)]

pub mod chunk_store;
pub mod embedding;
pub mod vector_index;

use std::path::PathBuf;
use thiserror::Error;

pub use chunk_store::JsonlChunkStore;
pub use embedding::{cosine_similarity, EmbeddingError, EmbeddingModel, HashEmbeddingModel};
pub use vector_index::{VectorIndex, VectorIndexError};

/// File name of the persisted chunk store inside an index directory
pub const CHUNKS_FILE: &str = "chunks.jsonl";

/// File name of the persisted vector list inside an index directory
pub const VECTORS_FILE: &str = "vectors.jsonl";

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Chunk store file does not exist; indexing has not been run
    #[error("Missing chunk store at {path}. Run `scribe index` first.")]
    MissingChunkStore {
        /// Expected location of the chunk store
        path: PathBuf,
    },

    /// Vector index file does not exist; indexing has not been run
    #[error("Missing vector index at {path}. Run `scribe index` first.")]
    MissingVectorIndex {
        /// Expected location of the vector index
        path: PathBuf,
    },

    /// I/O error reading or writing a store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A chunk record line failed to parse
    #[error("Malformed chunk record at line {line}: {source}")]
    MalformedRecord {
        /// 1-based line number in the chunk store file
        line: usize,
        /// Underlying JSON error
        source: serde_json::Error,
    },
}
