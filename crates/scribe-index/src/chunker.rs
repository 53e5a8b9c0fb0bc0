//! Document chunking
//!
//! Splits a document body into bounded retrieval units. Consecutive
//! paragraphs are packed greedily up to the size bound; when a chunk
//! closes, the next one is seeded with a trailing slice of it so adjacent
//! chunks share context. A single paragraph larger than the bound is
//! hard-split into fixed-size slices with no overlap.
//!
//! Packing is an explicit fold over paragraphs: each step consumes the
//! previous accumulator state and returns the next, and the overlap seed is
//! computed from the just-closed chunk text alone.

use crate::{ChunkConfig, IndexError};
use regex::Regex;
use scribe_domain::{Chunk, Document};

/// Splits documents into chunks according to a [`ChunkConfig`]
pub struct Chunker {
    config: ChunkConfig,
    blank_runs: Regex,
    space_runs: Regex,
}

/// Accumulator for paragraph packing
///
/// `closed` holds finished chunks; `pending` holds the paragraphs (and
/// possibly an overlap seed) of the chunk under construction.
struct PackState {
    closed: Vec<String>,
    pending: Vec<String>,
    pending_len: usize,
}

impl PackState {
    fn empty() -> Self {
        Self {
            closed: Vec::new(),
            pending: Vec::new(),
            pending_len: 0,
        }
    }

    /// One fold step: place the next paragraph
    fn step(mut self, para: &str, max_chars: usize, overlap_chars: usize) -> Self {
        if self.pending_len + para.len() + 2 <= max_chars {
            self.pending_len += para.len() + 2;
            self.pending.push(para.to_string());
            return self;
        }

        // Close the chunk under construction and derive the overlap seed
        // from its text.
        let seed = match self.close() {
            Some(chunk) => {
                let seed = tail_slice(&chunk, overlap_chars).to_string();
                self.closed.push(chunk);
                seed
            }
            None => String::new(),
        };

        if para.len() > max_chars {
            // Oversized paragraph: fixed-size slices, no overlap
            self.closed.extend(hard_split(para, max_chars));
            self.pending = Vec::new();
            self.pending_len = 0;
        } else if !seed.is_empty() && seed.len() + para.len() + 4 <= max_chars {
            self.pending_len = seed.len() + para.len() + 4;
            self.pending = vec![seed, para.to_string()];
        } else {
            // Seed would push the new chunk over the bound; start clean
            self.pending = vec![para.to_string()];
            self.pending_len = para.len() + 2;
        }

        self
    }

    fn close(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let chunk = self.pending.join("\n\n").trim().to_string();
        self.pending = Vec::new();
        self.pending_len = 0;
        Some(chunk)
    }

    fn finish(mut self) -> Vec<String> {
        if let Some(chunk) = self.close() {
            self.closed.push(chunk);
        }
        self.closed
    }
}

impl Chunker {
    /// Create a chunker with the given configuration
    pub fn new(config: ChunkConfig) -> Self {
        Self {
            config,
            blank_runs: Regex::new(r"\n{3,}").expect("static pattern"),
            space_runs: Regex::new(r"[ \t]{2,}").expect("static pattern"),
        }
    }

    /// Chunk one document into retrieval units
    ///
    /// Every chunk text is prefixed with a context header (title plus the
    /// configured metadata hints) and carries a frozen copy of the
    /// document's metadata extended with chunk-specific fields.
    ///
    /// # Errors
    ///
    /// A document without a title is an unrecoverable parse failure:
    /// [`IndexError::MissingTitle`] is returned and no chunks are emitted.
    pub fn chunk_document(&self, doc: &Document) -> Result<Vec<Chunk>, IndexError> {
        if doc.title.trim().is_empty() {
            return Err(IndexError::MissingTitle {
                source_path: doc.source_path.clone(),
            });
        }

        let header = self.context_header(doc);
        let full_text = format!("{}\n\n{}", header, doc.body);

        let chunks = self
            .chunk_text(&full_text)
            .into_iter()
            .enumerate()
            .map(|(idx, text)| {
                let mut meta = doc.meta.clone();
                meta.insert("doc_id".to_string(), doc.doc_id.clone());
                meta.insert("doc_type".to_string(), doc.doc_type.as_str().to_string());
                meta.insert("title".to_string(), doc.title.clone());
                meta.insert("source_path".to_string(), doc.source_path.clone());
                meta.insert("chunk_index".to_string(), idx.to_string());

                Chunk {
                    chunk_id: format!("{}::chunk-{:03}", doc.doc_id, idx),
                    doc_id: doc.doc_id.clone(),
                    doc_type: doc.doc_type.as_str().to_string(),
                    text,
                    meta,
                }
            })
            .collect();

        Ok(chunks)
    }

    /// Chunk raw text into bounded, overlapping slices
    pub fn chunk_text(&self, text: &str) -> Vec<String> {
        let text = self.normalize(text);
        if text.is_empty() {
            return Vec::new();
        }

        let paragraphs = text
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty());

        paragraphs
            .fold(PackState::empty(), |state, para| {
                state.step(para, self.config.max_chars, self.config.overlap_chars)
            })
            .finish()
    }

    /// Collapse excessive whitespace: runs of 3+ newlines become a single
    /// blank line, runs of horizontal whitespace become one space
    fn normalize(&self, text: &str) -> String {
        let text = self.blank_runs.replace_all(text, "\n\n");
        let text = self.space_runs.replace_all(&text, " ");
        text.trim().to_string()
    }

    /// Synthesized context header: title line plus `key=value` hints for
    /// the configured metadata fields that are present
    fn context_header(&self, doc: &Document) -> String {
        let hints: Vec<String> = self
            .config
            .hint_fields
            .iter()
            .filter_map(|k| doc.meta.get(k).map(|v| format!("{}={}", k, v)))
            .collect();

        if hints.is_empty() {
            doc.title.clone()
        } else {
            format!("{}\n{}", doc.title, hints.join(" | "))
        }
    }
}

/// Trailing slice of at most `max_bytes`, aligned to a char boundary
fn tail_slice(text: &str, max_bytes: usize) -> &str {
    if max_bytes == 0 || text.len() <= max_bytes {
        return if max_bytes == 0 { "" } else { text };
    }
    let mut start = text.len() - max_bytes;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    &text[start..]
}

/// Split into fixed-size slices, aligned to char boundaries
fn hard_split(text: &str, max_bytes: usize) -> Vec<String> {
    let mut parts = Vec::new();
    let mut start = 0;
    while start < text.len() {
        let mut end = (start + max_bytes).min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        parts.push(text[start..end].to_string());
        start = end;
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_domain::DocType;
    use std::collections::BTreeMap;

    fn config(max_chars: usize, overlap_chars: usize) -> ChunkConfig {
        ChunkConfig {
            max_chars,
            overlap_chars,
            ..ChunkConfig::default()
        }
    }

    fn document(title: &str, body: &str) -> Document {
        let mut meta = BTreeMap::new();
        meta.insert("status".to_string(), "approved".to_string());
        meta.insert("system".to_string(), "identity".to_string());
        Document::new(
            "STD-02",
            DocType::Std,
            title,
            meta,
            body,
            "corpus/standards/STD-02.md",
        )
    }

    #[test]
    fn test_small_body_single_chunk() {
        let chunker = Chunker::new(ChunkConfig::default());
        let chunks = chunker
            .chunk_document(&document("STD-02: Retries", "Keep retries bounded."))
            .unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].chunk_id, "STD-02::chunk-000");
    }

    #[test]
    fn test_context_header_prepended() {
        let chunker = Chunker::new(ChunkConfig::default());
        let chunks = chunker
            .chunk_document(&document("STD-02: Retries", "Keep retries bounded."))
            .unwrap();

        let text = &chunks[0].text;
        assert!(text.starts_with("STD-02: Retries"));
        assert!(text.contains("status=approved"));
        assert!(text.contains("system=identity"));
    }

    #[test]
    fn test_missing_title_produces_no_chunks() {
        let chunker = Chunker::new(ChunkConfig::default());
        let result = chunker.chunk_document(&document("   ", "Body text."));
        assert!(matches!(result, Err(IndexError::MissingTitle { .. })));
    }

    #[test]
    fn test_chunk_meta_is_superset_of_document_meta() {
        let chunker = Chunker::new(ChunkConfig::default());
        let doc = document("STD-02: Retries", "Keep retries bounded.");
        let chunks = chunker.chunk_document(&doc).unwrap();

        for (key, value) in &doc.meta {
            assert_eq!(chunks[0].meta.get(key), Some(value));
        }
        assert_eq!(chunks[0].meta.get("chunk_index").unwrap(), "0");
        assert_eq!(chunks[0].meta.get("doc_id").unwrap(), "STD-02");
    }

    #[test]
    fn test_paragraphs_pack_up_to_bound() {
        let chunker = Chunker::new(config(100, 0));
        let chunks = chunker.chunk_text("first paragraph\n\nsecond paragraph\n\nthird paragraph");
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].contains("first paragraph"));
        assert!(chunks[0].contains("third paragraph"));
    }

    #[test]
    fn test_overflow_closes_chunk_and_seeds_overlap() {
        let p1 = "a".repeat(60);
        let p2 = "b".repeat(60);
        let chunker = Chunker::new(config(100, 20));
        let chunks = chunker.chunk_text(&format!("{}\n\n{}", p1, p2));

        assert_eq!(chunks.len(), 2);
        // The second chunk starts with the tail of the first
        let tail = &chunks[0][chunks[0].len() - 20..];
        assert!(chunks[1].starts_with(tail));
        assert!(chunks[1].ends_with(&p2));
    }

    #[test]
    fn test_hard_split_three_slices() {
        // One 3000-char paragraph against a 1200-char bound: exactly three
        // slices, each within the bound, concatenation lossless.
        let para = "x".repeat(3000);
        let chunker = Chunker::new(config(1200, 0));
        let chunks = chunker.chunk_text(&para);

        assert_eq!(chunks.len(), 3);
        for chunk in &chunks {
            assert!(chunk.len() <= 1200);
        }
        assert_eq!(chunks.concat(), para);
    }

    #[test]
    fn test_hard_split_respects_char_boundaries() {
        let para = "é".repeat(50); // 2 bytes per char
        let chunker = Chunker::new(config(33, 0));
        let chunks = chunker.chunk_text(&para);

        assert!(chunks.len() > 1);
        assert_eq!(chunks.concat(), para);
        for chunk in &chunks {
            assert!(chunk.len() <= 33);
        }
    }

    #[test]
    fn test_whitespace_normalization() {
        let chunker = Chunker::new(ChunkConfig::default());
        let chunks = chunker.chunk_text("line one\n\n\n\n\nline two\t\t  with   gaps");
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].contains("line two with gaps"));
    }

    #[test]
    fn test_empty_body_yields_no_chunks() {
        let chunker = Chunker::new(ChunkConfig::default());
        assert!(chunker.chunk_text("").is_empty());
        assert!(chunker.chunk_text("   \n\n  ").is_empty());
    }

    #[test]
    fn test_chunk_ids_are_sequential() {
        let body = (0..40)
            .map(|i| format!("paragraph number {} with some filler text", i))
            .collect::<Vec<_>>()
            .join("\n\n");
        let chunker = Chunker::new(config(160, 40));
        let doc = document("STD-02: Retries", &body);
        let chunks = chunker.chunk_document(&doc).unwrap();

        assert!(chunks.len() > 1);
        for (idx, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.chunk_id, format!("STD-02::chunk-{:03}", idx));
        }
    }
}
