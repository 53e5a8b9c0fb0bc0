//! Error types for the answer pipeline

use thiserror::Error;

/// Errors that can occur while producing a grounded answer
#[derive(Error, Debug)]
pub enum AnswerError {
    /// Retrieval failed before the provider was ever invoked
    #[error(transparent)]
    Retrieval(#[from] scribe_retrieval::RetrievalError),

    /// The completion provider failed
    #[error("Completion error: {0}")]
    Completion(String),

    /// The generated answer cited documents outside the retrieved set
    ///
    /// Hard, non-recoverable failure for this answer request. Never
    /// auto-corrected or partially accepted.
    #[error("Answer cited unknown doc IDs: {illegal:?}. Allowed: {allowed:?}")]
    CitationViolation {
        /// Citations not present in the allowed set, in citation order
        illegal: Vec<String>,
        /// The full allowed identifier set for this query
        allowed: Vec<String>,
    },
}
