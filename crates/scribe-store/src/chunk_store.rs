//! Newline-delimited chunk record store
//!
//! One chunk record is stored as one JSON object per line. The store is
//! written once at index-build time and read whole at query-process startup;
//! the in-memory order of records matches the insertion order used when the
//! vector index was built, so a search ordinal indexes directly into it.

use crate::StoreError;
use scribe_domain::Chunk;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// In-memory chunk store backed by a newline-delimited JSON file
#[derive(Debug, Clone)]
pub struct JsonlChunkStore {
    chunks: Vec<Chunk>,
}

impl JsonlChunkStore {
    /// Create a store from chunks already in memory (index-build path)
    pub fn from_chunks(chunks: Vec<Chunk>) -> Self {
        Self { chunks }
    }

    /// Load a chunk store from disk
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingChunkStore`] if the file does not exist
    /// (the caller has not run indexing) and [`StoreError::MalformedRecord`]
    /// if any line fails to parse.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StoreError::MissingChunkStore {
                path: path.to_path_buf(),
            });
        }

        let reader = BufReader::new(File::open(path)?);
        let mut chunks = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let chunk: Chunk =
                serde_json::from_str(line).map_err(|source| StoreError::MalformedRecord {
                    line: idx + 1,
                    source,
                })?;
            chunks.push(chunk);
        }

        Ok(Self { chunks })
    }

    /// Write the store to disk, one record per line
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StoreError> {
        let mut writer = BufWriter::new(File::create(path)?);
        for chunk in &self.chunks {
            // Serialization of a map of strings cannot fail; treat it as I/O
            let line = serde_json::to_string(chunk)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Look up a chunk by its search ordinal
    pub fn get(&self, ordinal: usize) -> Option<&Chunk> {
        self.chunks.get(ordinal)
    }

    /// All chunks, in insertion order
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Number of chunks in the store
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the store holds no chunks
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}
