//! Answer orchestration
//!
//! Runs retrieval, assembles the grounding prompt, invokes the completion
//! provider, and gates the generated text against the allowed citation set.

use crate::{validate_citations, AnswerError, PromptBuilder};
use scribe_domain::traits::CompletionProvider;
use scribe_domain::ResultRecord;
use scribe_retrieval::{QueryOptions, Retriever};
use scribe_store::EmbeddingModel;
use tracing::{debug, info};

/// Canonical refusal returned when retrieval produces no sources
pub const REFUSAL_TEXT: &str = "Insufficient information in provided sources.";

/// A validated, grounded answer
#[derive(Debug, Clone)]
pub struct Answer {
    /// The original query
    pub query: String,

    /// Generated answer text
    pub answer: String,

    /// Validated citations, in first-occurrence order
    pub citations: Vec<String>,

    /// The result records the answer was grounded on
    pub retrieved: Vec<ResultRecord>,
}

/// Produces grounded answers from the retriever and a completion provider
pub struct Answerer<E: EmbeddingModel, P: CompletionProvider> {
    retriever: Retriever<E>,
    provider: P,
}

impl<E, P> Answerer<E, P>
where
    E: EmbeddingModel,
    P: CompletionProvider,
    P::Error: std::fmt::Display,
{
    /// Create an answerer
    pub fn new(retriever: Retriever<E>, provider: P) -> Self {
        Self {
            retriever,
            provider,
        }
    }

    /// Access the underlying retriever
    pub fn retriever(&self) -> &Retriever<E> {
        &self.retriever
    }

    /// Answer one query
    ///
    /// An empty retrieval returns the canonical refusal without invoking
    /// the provider. A citation outside the retrieved set is a hard
    /// failure: [`AnswerError::CitationViolation`], never auto-corrected.
    pub fn answer(&self, query: &str, options: &QueryOptions) -> Result<Answer, AnswerError> {
        let retrieved = self.retriever.query(query, options)?;

        if retrieved.is_empty() {
            debug!("no sources retrieved, refusing without provider call");
            return Ok(Answer {
                query: query.to_string(),
                answer: REFUSAL_TEXT.to_string(),
                citations: Vec::new(),
                retrieved,
            });
        }

        let builder = PromptBuilder::new(query, &retrieved);
        let prompt = builder.build();
        let allowed = builder.allowed_ids();

        let draft = self
            .provider
            .complete(&prompt)
            .map_err(|e| AnswerError::Completion(e.to_string()))?;

        let citations = validate_citations(&draft, &allowed)?;

        info!(
            sources = retrieved.len(),
            citations = citations.len(),
            "answer validated"
        );

        Ok(Answer {
            query: query.to_string(),
            answer: draft,
            citations,
            retrieved,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_domain::Chunk;
    use scribe_llm::MockProvider;
    use scribe_store::{HashEmbeddingModel, JsonlChunkStore, VectorIndex};
    use std::collections::BTreeMap;

    const DIM: usize = 32;

    fn chunk(doc_id: &str, doc_type: &str, text: &str) -> Chunk {
        let mut meta = BTreeMap::new();
        meta.insert("status".to_string(), "approved".to_string());
        meta.insert("title".to_string(), format!("{}: Title", doc_id));
        Chunk {
            chunk_id: format!("{}::chunk-000", doc_id),
            doc_id: doc_id.to_string(),
            doc_type: doc_type.to_string(),
            text: text.to_string(),
            meta,
        }
    }

    fn answerer(chunks: Vec<Chunk>, provider: MockProvider) -> Answerer<HashEmbeddingModel, MockProvider> {
        let embedder = HashEmbeddingModel::new(DIM);
        let mut index = VectorIndex::new(DIM);
        for chunk in &chunks {
            index.add(&embedder.embed(&chunk.text).unwrap()).unwrap();
        }
        let retriever = Retriever::new(JsonlChunkStore::from_chunks(chunks), index, embedder);
        Answerer::new(retriever, provider)
    }

    fn corpus() -> Vec<Chunk> {
        vec![
            chunk("STD-02", "STD", "Timeout rules for all calls."),
            chunk("RBK-07", "RBK", "Token outage runbook steps."),
        ]
    }

    #[test]
    fn test_grounded_answer_accepted() {
        let provider =
            MockProvider::new("Set timeouts [STD-02]. Rotate keys [RBK-07]. Citations: [STD-02], [RBK-07]");
        let answerer = answerer(corpus(), provider);

        let answer = answerer
            .answer("retry and timeout policy", &QueryOptions::default())
            .unwrap();

        assert_eq!(answer.citations, vec!["STD-02", "RBK-07"]);
        assert_eq!(answer.retrieved.len(), 2);
    }

    #[test]
    fn test_hallucinated_citation_rejected_with_exact_ids() {
        let provider = MockProvider::new("Per [STD-02] and [RBK-07] and also [ADR-099].");
        let answerer = answerer(corpus(), provider);

        let err = answerer
            .answer("retry and timeout policy", &QueryOptions::default())
            .unwrap_err();

        match err {
            AnswerError::CitationViolation { illegal, allowed } => {
                assert_eq!(illegal, vec!["ADR-099"]);
                assert!(allowed.contains(&"STD-02".to_string()));
                assert!(allowed.contains(&"RBK-07".to_string()));
            }
            other => panic!("Expected CitationViolation, got {}", other),
        }
    }

    #[test]
    fn test_empty_retrieval_refuses_without_provider_call() {
        // Every chunk is deprecated, so the gate empties the pool
        let mut chunks = corpus();
        for chunk in &mut chunks {
            chunk
                .meta
                .insert("status".to_string(), "deprecated".to_string());
        }

        let provider = MockProvider::new("should never be called");
        let answerer = answerer(chunks, provider.clone());

        let answer = answerer
            .answer("retry and timeout policy", &QueryOptions::default())
            .unwrap();

        assert_eq!(answer.answer, REFUSAL_TEXT);
        assert!(answer.citations.is_empty());
        assert!(answer.retrieved.is_empty());
        assert_eq!(provider.call_count(), 0);
    }
}
