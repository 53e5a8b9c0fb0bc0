//! Index build orchestration
//!
//! Drives the offline pipeline: chunk every document, embed every chunk,
//! and persist the chunk store and vector list under the index directory.

use crate::{ChunkConfig, Chunker, IndexError};
use scribe_domain::Document;
use scribe_store::{EmbeddingModel, JsonlChunkStore, VectorIndex, CHUNKS_FILE, VECTORS_FILE};
use std::path::Path;
use tracing::{debug, info};

/// Summary of one index build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildReport {
    /// Documents consumed
    pub documents: usize,

    /// Chunks produced and embedded
    pub chunks: usize,
}

/// Builds the retrieval index from parsed documents
pub struct IndexBuilder<E: EmbeddingModel> {
    embedder: E,
    chunker: Chunker,
}

impl<E: EmbeddingModel> IndexBuilder<E> {
    /// Create a builder with the given embedding model and chunk config
    pub fn new(embedder: E, config: ChunkConfig) -> Result<Self, IndexError> {
        config.validate().map_err(IndexError::Config)?;
        Ok(Self {
            embedder,
            chunker: Chunker::new(config),
        })
    }

    /// Chunk and embed the corpus, returning in-memory stores
    ///
    /// Chunk ordinals in the vector index line up with positions in the
    /// chunk store.
    pub fn build(
        &self,
        documents: &[Document],
    ) -> Result<(JsonlChunkStore, VectorIndex), IndexError> {
        let mut chunks = Vec::new();
        for doc in documents {
            let doc_chunks = self.chunker.chunk_document(doc)?;
            debug!(doc_id = %doc.doc_id, count = doc_chunks.len(), "chunked document");
            chunks.extend(doc_chunks);
        }

        if chunks.is_empty() {
            return Err(IndexError::EmptyCorpus);
        }

        info!(
            documents = documents.len(),
            chunks = chunks.len(),
            "chunking complete, embedding"
        );

        let mut index = VectorIndex::new(self.embedder.dimension());
        for chunk in &chunks {
            let vector = self
                .embedder
                .embed(&chunk.text)
                .map_err(|e| IndexError::Embedding(e.to_string()))?;
            index
                .add(&vector)
                .map_err(|e| IndexError::Embedding(e.to_string()))?;
        }

        Ok((JsonlChunkStore::from_chunks(chunks), index))
    }

    /// Build and persist both artifacts under `index_dir`
    pub fn build_and_persist(
        &self,
        documents: &[Document],
        index_dir: &Path,
    ) -> Result<BuildReport, IndexError> {
        let (store, index) = self.build(documents)?;

        std::fs::create_dir_all(index_dir).map_err(scribe_store::StoreError::Io)?;
        store.save(index_dir.join(CHUNKS_FILE))?;
        index.save(index_dir.join(VECTORS_FILE))?;

        info!(
            index_dir = %index_dir.display(),
            chunks = store.len(),
            "index artifacts written"
        );

        Ok(BuildReport {
            documents: documents.len(),
            chunks: store.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_domain::DocType;
    use scribe_store::HashEmbeddingModel;
    use std::collections::BTreeMap;

    fn corpus() -> Vec<Document> {
        let mut meta = BTreeMap::new();
        meta.insert("status".to_string(), "approved".to_string());

        vec![
            Document::new(
                "STD-02",
                DocType::Std,
                "STD-02: Retry and Timeout Policy",
                meta.clone(),
                "All calls must set explicit timeouts.\n\nRetries use exponential backoff.",
                "corpus/standards/STD-02.md",
            ),
            Document::new(
                "RBK-07",
                DocType::Rbk,
                "RBK-07: Token Validation Outage",
                meta,
                "Check the token signing keys first.",
                "corpus/runbooks/RBK-07.md",
            ),
        ]
    }

    #[test]
    fn test_build_aligns_store_and_index() {
        let builder =
            IndexBuilder::new(HashEmbeddingModel::new(64), ChunkConfig::default()).unwrap();
        let (store, index) = builder.build(&corpus()).unwrap();

        assert_eq!(store.len(), index.len());
        assert!(store.chunks().iter().any(|c| c.doc_id == "STD-02"));
        assert!(store.chunks().iter().any(|c| c.doc_id == "RBK-07"));
    }

    #[test]
    fn test_empty_corpus_is_an_error() {
        let builder =
            IndexBuilder::new(HashEmbeddingModel::new(64), ChunkConfig::default()).unwrap();
        assert!(matches!(builder.build(&[]), Err(IndexError::EmptyCorpus)));
    }

    #[test]
    fn test_missing_title_fails_the_build() {
        let mut docs = corpus();
        docs[0].title = String::new();

        let builder =
            IndexBuilder::new(HashEmbeddingModel::new(64), ChunkConfig::default()).unwrap();
        assert!(matches!(
            builder.build(&docs),
            Err(IndexError::MissingTitle { .. })
        ));
    }

    #[test]
    fn test_persist_writes_both_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let builder =
            IndexBuilder::new(HashEmbeddingModel::new(64), ChunkConfig::default()).unwrap();
        let report = builder.build_and_persist(&corpus(), dir.path()).unwrap();

        assert_eq!(report.documents, 2);
        assert!(report.chunks >= 2);
        assert!(dir.path().join(CHUNKS_FILE).exists());
        assert!(dir.path().join(VECTORS_FILE).exists());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ChunkConfig {
            max_chars: 0,
            ..ChunkConfig::default()
        };
        assert!(matches!(
            IndexBuilder::new(HashEmbeddingModel::new(64), config),
            Err(IndexError::Config(_))
        ));
    }
}
