//! Scribe Index Construction
//!
//! Converts parsed documents into the persisted retrieval artifacts: the
//! chunk store and the vector index.
//!
//! # Overview
//!
//! Indexing runs offline, before any query traffic:
//!
//! ```text
//! Documents → Chunker → chunks.jsonl
//!                     → EmbeddingModel → vectors.jsonl
//! ```
//!
//! The chunker splits each document body into bounded, overlapping retrieval
//! units. Every chunk is prefixed with a synthesized context header (title
//! plus selected metadata hints) so the embedded text always carries
//! traceable identity, and inherits a frozen copy of the document's
//! metadata.
//!
//! # Example
//!
//! ```
//! use scribe_index::{ChunkConfig, Chunker};
//! use scribe_domain::{DocType, Document};
//! use std::collections::BTreeMap;
//!
//! let doc = Document::new(
//!     "STD-02",
//!     DocType::Std,
//!     "STD-02: Retry and Timeout Policy",
//!     BTreeMap::new(),
//!     "All calls set explicit timeouts.",
//!     "corpus/standards/STD-02.md",
//! );
//!
//! let chunker = Chunker::new(ChunkConfig::default());
//! let chunks = chunker.chunk_document(&doc).unwrap();
//! assert_eq!(chunks[0].doc_id, "STD-02");
//! ```

#![warn(missing_docs)]

mod builder;
mod chunker;
mod config;
mod error;

pub use builder::{BuildReport, IndexBuilder};
pub use chunker::Chunker;
pub use config::ChunkConfig;
pub use error::IndexError;
