//! Result record module - the per-result shape returned to callers

use serde::{Deserialize, Serialize};

/// One entry of a query response, ordered by final score
///
/// This is the wire shape consumed by the presentation layer: identifier and
/// type of the source document, both scores, the full reason trail, and a
/// bounded text preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Identifier of the source document
    pub doc_id: String,

    /// Type tag of the source document
    pub doc_type: String,

    /// Document title
    pub title: String,

    /// Last-updated date string, empty when the document carries none
    pub last_updated: String,

    /// Final score after policy reranking
    pub score_final: f32,

    /// Raw similarity score from vector search
    pub score_sim: f32,

    /// Reason trail: every scoring adjustment, in application order
    pub reasons: Vec<String>,

    /// Trimmed chunk text; truncated with a `...` marker when cut
    pub preview: String,
}
