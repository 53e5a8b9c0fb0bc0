//! Document module - a governed engineering document after parsing

use crate::DocType;
use std::collections::BTreeMap;

/// A single governed document after parsing from its source markup
///
/// Documents are immutable once constructed. Parsing from raw markup is the
/// job of an external collaborator; this type is the structured record that
/// the indexing pipeline consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Type-prefixed identifier, e.g. `ADR-004` or `PM-2024-09`
    pub doc_id: String,

    /// Member of the closed document-type enumeration
    pub doc_type: DocType,

    /// Full title line text
    pub title: String,

    /// Parsed key/value metadata block (status, system, owner team,
    /// last-updated date, severity, ...)
    pub meta: BTreeMap<String, String>,

    /// Content after title and metadata
    pub body: String,

    /// File location for traceability
    pub source_path: String,
}

impl Document {
    /// Create a new document record
    pub fn new(
        doc_id: impl Into<String>,
        doc_type: DocType,
        title: impl Into<String>,
        meta: BTreeMap<String, String>,
        body: impl Into<String>,
        source_path: impl Into<String>,
    ) -> Self {
        Self {
            doc_id: doc_id.into(),
            doc_type,
            title: title.into(),
            meta,
            body: body.into(),
            source_path: source_path.into(),
        }
    }
}
