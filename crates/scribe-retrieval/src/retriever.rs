//! Query pipeline orchestration
//!
//! Wires the stages together for one query: embed, search, gate, classify,
//! rerank, select, and shape the final result records. The retriever holds
//! only the shared read-only stores; every call is independent, so
//! concurrent queries need no synchronization.

use crate::{
    quotas_for_intent, select_with_quotas, CandidateGate, GateDecision, PolicyReranker,
    QueryIntent, RetrievalError,
};
use scribe_domain::{Candidate, ResultRecord};
use scribe_store::{EmbeddingModel, JsonlChunkStore, VectorIndex, CHUNKS_FILE, VECTORS_FILE};
use std::path::Path;
use tracing::{debug, info};

/// Search quality parameter passed to HNSW
const EF_SEARCH: usize = 64;

/// Maximum preview length in the result record, before the marker
const PREVIEW_MAX_CHARS: usize = 280;

/// Per-call query parameters
#[derive(Debug, Clone, Copy)]
pub struct QueryOptions {
    /// Target result count (1-10)
    pub top_k: usize,

    /// Candidate pool size requested from vector search before filtering
    /// (5-200)
    pub candidates: usize,

    /// Whether draft-status material is allowed for this call
    pub allow_draft: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            top_k: 5,
            candidates: 30,
            allow_draft: false,
        }
    }
}

impl QueryOptions {
    /// Validate bounds
    pub fn validate(&self) -> Result<(), RetrievalError> {
        if !(1..=10).contains(&self.top_k) {
            return Err(RetrievalError::InvalidOptions(format!(
                "top_k must be in 1..=10, got {}",
                self.top_k
            )));
        }
        if !(5..=200).contains(&self.candidates) {
            return Err(RetrievalError::InvalidOptions(format!(
                "candidates must be in 5..=200, got {}",
                self.candidates
            )));
        }
        Ok(())
    }
}

/// The policy-aware retriever
///
/// Owns the read-only chunk store and vector index for the lifetime of the
/// process.
pub struct Retriever<E: EmbeddingModel> {
    store: JsonlChunkStore,
    index: VectorIndex,
    embedder: E,
}

impl<E: EmbeddingModel> Retriever<E> {
    /// Create a retriever from stores already in memory
    pub fn new(store: JsonlChunkStore, index: VectorIndex, embedder: E) -> Self {
        Self {
            store,
            index,
            embedder,
        }
    }

    /// Load the persisted index artifacts from `index_dir`
    ///
    /// # Errors
    ///
    /// Fails fast with the store's missing-artifact errors when indexing
    /// has not been run.
    pub fn open(index_dir: &Path, embedder: E) -> Result<Self, RetrievalError> {
        let store = JsonlChunkStore::load(index_dir.join(CHUNKS_FILE))?;
        let index = VectorIndex::load(index_dir.join(VECTORS_FILE), embedder.dimension())?;
        info!(chunks = store.len(), "index artifacts loaded");
        Ok(Self::new(store, index, embedder))
    }

    /// Number of chunks available for retrieval
    pub fn chunk_count(&self) -> usize {
        self.store.len()
    }

    /// Run the full policy pipeline for one query
    pub fn query(
        &self,
        query: &str,
        options: &QueryOptions,
    ) -> Result<Vec<ResultRecord>, RetrievalError> {
        options.validate()?;

        let query_vector = self
            .embedder
            .embed(query)
            .map_err(|e| RetrievalError::Embedding(e.to_string()))?;

        let hits = self
            .index
            .search(&query_vector, options.candidates, EF_SEARCH)
            .map_err(|e| RetrievalError::Search(e.to_string()))?;

        // The search layer is untrusted for completeness: hits that do not
        // resolve to a stored chunk are dropped.
        let raw: Vec<Candidate> = hits
            .into_iter()
            .filter_map(|(ordinal, sim)| {
                self.store.get(ordinal).map(|chunk| Candidate {
                    chunk: chunk.clone(),
                    sim,
                })
            })
            .collect();

        let gate = CandidateGate::new(options.allow_draft);
        let mut admitted = Vec::with_capacity(raw.len());
        for candidate in raw {
            match gate.evaluate(&candidate) {
                GateDecision::Admitted => admitted.push(candidate),
                GateDecision::Rejected { reason } => {
                    debug!(chunk_id = %candidate.chunk.chunk_id, %reason, "candidate gated out");
                }
            }
        }

        let intent = QueryIntent::classify(query);
        let ranked = PolicyReranker::new().rerank(&intent, admitted);
        let quotas = quotas_for_intent(&intent);
        let selected = select_with_quotas(&ranked, options.top_k, &quotas);

        info!(
            top_k = options.top_k,
            pool = ranked.len(),
            selected = selected.len(),
            "query pipeline complete"
        );

        Ok(selected
            .into_iter()
            .map(|scored| {
                let reasons = scored.reasons();
                let chunk = &scored.candidate.chunk;
                ResultRecord {
                    doc_id: chunk.doc_id.clone(),
                    doc_type: chunk.doc_type.clone(),
                    title: chunk.title().to_string(),
                    last_updated: chunk.last_updated().unwrap_or("").to_string(),
                    score_final: scored.score,
                    score_sim: scored.candidate.sim,
                    reasons,
                    preview: preview(&chunk.text),
                }
            })
            .collect())
    }
}

/// Flatten newlines and bound the preview length, appending a marker when
/// the text was cut
fn preview(text: &str) -> String {
    let flat = text.replace('\n', " ");
    if flat.len() <= PREVIEW_MAX_CHARS {
        return flat;
    }
    let mut end = PREVIEW_MAX_CHARS;
    while !flat.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &flat[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_domain::Chunk;
    use scribe_store::HashEmbeddingModel;
    use std::collections::BTreeMap;

    const DIM: usize = 32;

    fn chunk(doc_id: &str, doc_type: &str, text: &str, meta: &[(&str, &str)]) -> Chunk {
        let meta: BTreeMap<String, String> = meta
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Chunk {
            chunk_id: format!("{}::chunk-000", doc_id),
            doc_id: doc_id.to_string(),
            doc_type: doc_type.to_string(),
            text: text.to_string(),
            meta,
        }
    }

    fn retriever(chunks: Vec<Chunk>) -> Retriever<HashEmbeddingModel> {
        let embedder = HashEmbeddingModel::new(DIM);
        let mut index = VectorIndex::new(DIM);
        for chunk in &chunks {
            let vector = embedder.embed(&chunk.text).unwrap();
            index.add(&vector).unwrap();
        }
        Retriever::new(JsonlChunkStore::from_chunks(chunks), index, embedder)
    }

    fn corpus() -> Vec<Chunk> {
        vec![
            chunk(
                "STD-02",
                "STD",
                "STD-02: Retry and Timeout Policy\n\nAll calls set explicit timeouts.",
                &[("status", "approved"), ("title", "STD-02: Retry and Timeout Policy")],
            ),
            chunk(
                "STD-09",
                "STD",
                "STD-09: Logging Standard\n\nUse structured logs.",
                &[("status", "deprecated"), ("title", "STD-09: Logging Standard")],
            ),
            chunk(
                "RBK-07",
                "RBK",
                "RBK-07: Token Validation Outage\n\nCheck signing keys.",
                &[("status", "draft"), ("title", "RBK-07: Token Validation Outage")],
            ),
            chunk(
                "ADR-004",
                "ADR",
                "ADR-004: Choose OAuth\n\nWe picked OAuth for delegation.",
                &[("status", "approved"), ("title", "ADR-004: Choose OAuth")],
            ),
        ]
    }

    #[test]
    fn test_deprecated_never_surfaces() {
        let retriever = retriever(corpus());
        let records = retriever
            .query("logging standard", &QueryOptions::default())
            .unwrap();

        assert!(records.iter().all(|r| r.doc_id != "STD-09"));
    }

    #[test]
    fn test_draft_excluded_unless_allowed() {
        let retriever = retriever(corpus());

        let closed = retriever
            .query("token outage runbook", &QueryOptions::default())
            .unwrap();
        assert!(closed.iter().all(|r| r.doc_id != "RBK-07"));

        let open = retriever
            .query(
                "token outage runbook",
                &QueryOptions {
                    allow_draft: true,
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(open.iter().any(|r| r.doc_id == "RBK-07"));
    }

    #[test]
    fn test_no_document_repeats() {
        let mut chunks = corpus();
        let mut second = chunks[0].clone();
        second.chunk_id = "STD-02::chunk-001".to_string();
        second.text.push_str("\n\nRetries use exponential backoff.");
        chunks.push(second);

        let retriever = retriever(chunks);
        let records = retriever
            .query("retry timeout", &QueryOptions::default())
            .unwrap();

        let mut seen = std::collections::HashSet::new();
        for record in &records {
            assert!(seen.insert(record.doc_id.clone()));
        }
    }

    #[test]
    fn test_records_carry_reason_trails() {
        let retriever = retriever(corpus());
        let records = retriever
            .query("retry and timeout policy", &QueryOptions::default())
            .unwrap();

        assert!(!records.is_empty());
        for record in &records {
            assert!(record.reasons[0].starts_with("sim="));
        }
    }

    #[test]
    fn test_options_bounds_enforced() {
        let retriever = retriever(corpus());

        let too_many = QueryOptions {
            top_k: 11,
            ..Default::default()
        };
        assert!(matches!(
            retriever.query("anything", &too_many),
            Err(RetrievalError::InvalidOptions(_))
        ));

        let tiny_pool = QueryOptions {
            candidates: 2,
            ..Default::default()
        };
        assert!(matches!(
            retriever.query("anything", &tiny_pool),
            Err(RetrievalError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_preview_bounded_with_marker() {
        let long_text = "word ".repeat(200);
        let mut chunks = corpus();
        chunks[0].text = long_text;

        let retriever = retriever(chunks);
        let records = retriever
            .query("retry and timeout policy", &QueryOptions::default())
            .unwrap();

        for record in &records {
            assert!(record.preview.len() <= PREVIEW_MAX_CHARS + 3);
            if record.preview.len() > PREVIEW_MAX_CHARS {
                assert!(record.preview.ends_with("..."));
            }
            assert!(!record.preview.contains('\n'));
        }
    }
}
