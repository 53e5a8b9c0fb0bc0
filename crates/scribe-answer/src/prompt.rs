//! Grounding prompt assembly
//!
//! The prompt forces the provider to answer only from the retrieved
//! sources, cite with bracketed document identifiers from the allowed set,
//! and refuse when the sources are insufficient.

use scribe_domain::ResultRecord;

/// Builds the grounding prompt for one answer request
pub struct PromptBuilder<'a> {
    query: &'a str,
    retrieved: &'a [ResultRecord],
}

impl<'a> PromptBuilder<'a> {
    /// Create a builder over the query and its retrieval result
    pub fn new(query: &'a str, retrieved: &'a [ResultRecord]) -> Self {
        Self { query, retrieved }
    }

    /// The allowed citation identifiers, in result order
    pub fn allowed_ids(&self) -> Vec<String> {
        self.retrieved.iter().map(|r| r.doc_id.clone()).collect()
    }

    /// Render the prompt
    pub fn build(&self) -> String {
        let allowed = self.allowed_ids().join(", ");

        let sources: Vec<String> = self
            .retrieved
            .iter()
            .map(|r| {
                format!(
                    "- {} ({} | updated={})\n  title: {}\n  excerpt: {}",
                    r.doc_id, r.doc_type, r.last_updated, r.title, r.preview
                )
            })
            .collect();

        format!(
            "You are an internal engineering knowledge assistant.\n\
             You must answer the user's question using ONLY the SOURCES below.\n\
             If the sources do not contain enough information, say: \"Insufficient information in provided sources.\"\n\
             \n\
             Citation rules:\n\
             - Every factual claim MUST be backed by at least one citation in square brackets.\n\
             - Citations MUST be one of these doc IDs: {allowed}\n\
             - Use this exact format: [DOC-ID] (example: [STD-02])\n\
             - Do not cite any other IDs.\n\
             \n\
             User question:\n\
             {query}\n\
             \n\
             SOURCES:\n\
             {sources}\n\
             \n\
             Return:\n\
             1) A short answer (4-8 bullets max)\n\
             2) A final line: \"Citations: [ID1], [ID2], ...\"",
            allowed = allowed,
            query = self.query,
            sources = sources.join("\n"),
        )
    }
}
