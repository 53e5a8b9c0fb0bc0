//! Chunk module - the atomic retrieval unit

use crate::{DocType, GovernanceStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A retrieval unit: a bounded slice of a document's text
///
/// Chunks are created once at index-build time and never mutated. Many
/// chunks reference one document; the back-reference is by identifier, not
/// ownership. The metadata map is a frozen copy of the owning document's
/// metadata at chunk-creation time, extended with chunk-specific fields
/// (`doc_id`, `doc_type`, `title`, `source_path`, `chunk_index`), so a chunk
/// never drifts from the document state it was built against.
///
/// One chunk is serialized per line of the newline-delimited chunk store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk identifier: `{doc_id}::chunk-{index:03}`
    pub chunk_id: String,

    /// Identifier of the owning document
    pub doc_id: String,

    /// Type tag of the owning document, as written to the wire. The search
    /// layer is untrusted for completeness, so readers parse this on demand
    /// via [`Chunk::parsed_type`].
    pub doc_type: String,

    /// Chunk text, including the synthesized context header
    pub text: String,

    /// Frozen copy of the owning document's metadata plus chunk fields
    pub meta: BTreeMap<String, String>,
}

impl Chunk {
    /// Parse the document type tag, if it is a member of the closed
    /// enumeration
    pub fn parsed_type(&self) -> Option<DocType> {
        DocType::parse(&self.doc_type)
    }

    /// Governance status from metadata, if present and recognized
    pub fn status(&self) -> Option<GovernanceStatus> {
        self.meta.get("status").and_then(|s| GovernanceStatus::parse(s))
    }

    /// Owning system from metadata, lowercased for comparison
    pub fn system(&self) -> Option<String> {
        self.meta.get("system").map(|s| s.trim().to_lowercase())
    }

    /// Last-updated date string, falling back to the `date` field used by
    /// postmortems
    pub fn last_updated(&self) -> Option<&str> {
        self.meta
            .get("last_updated")
            .or_else(|| self.meta.get("date"))
            .map(String::as_str)
    }

    /// Title inherited from the owning document
    pub fn title(&self) -> &str {
        self.meta.get("title").map(String::as_str).unwrap_or("")
    }
}
