//! HNSW vector index for similarity search
//!
//! Wraps the HNSW algorithm for nearest-neighbor search over chunk
//! embeddings. The index itself is an in-memory structure; persistence is
//! the raw vector list, written at index-build time and re-inserted on
//! load. Vectors are keyed by chunk ordinal, which indexes directly into
//! the chunk store.
//!
//! # HNSW Parameters
//!
//! - **M**: bi-directional links per node (16)
//! - **efConstruction**: candidate-list size during construction (200)
//! - **efSearch**: candidate-list size during search (caller-supplied,
//!   64 is a sensible default)

use crate::StoreError;
use hnsw_rs::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

const DEFAULT_M: usize = 16;
const DEFAULT_EF_CONSTRUCTION: usize = 200;
const DEFAULT_MAX_ELEMENTS: usize = 1_000_000;

/// Errors that can occur during vector index operations
#[derive(Error, Debug)]
pub enum VectorIndexError {
    /// Invalid embedding dimension
    #[error("Invalid embedding dimension: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension provided
        actual: usize,
    },
}

/// A wrapper around HNSW for similarity search over chunk embeddings
///
/// Search results are `(chunk ordinal, similarity)` pairs with similarity
/// descending. The raw vectors are retained so the index can be persisted
/// and rebuilt.
pub struct VectorIndex {
    dimension: usize,
    hnsw: Hnsw<'static, f32, DistCosine>,
    vectors: Vec<Vec<f32>>,
}

impl std::fmt::Debug for VectorIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorIndex")
            .field("dimension", &self.dimension)
            .field("vectors", &self.vectors.len())
            .finish_non_exhaustive()
    }
}

impl VectorIndex {
    /// Create an empty index for vectors of the given dimension
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            hnsw: Self::fresh_hnsw(),
            vectors: Vec::new(),
        }
    }

    fn fresh_hnsw() -> Hnsw<'static, f32, DistCosine> {
        let nb_layer = 16.min((DEFAULT_MAX_ELEMENTS as f32).ln().trunc() as usize);
        Hnsw::<'static, f32, DistCosine>::new(
            DEFAULT_M,
            DEFAULT_MAX_ELEMENTS,
            nb_layer,
            DEFAULT_EF_CONSTRUCTION,
            DistCosine {},
        )
    }

    /// Append a chunk embedding. The vector's ordinal is its insertion
    /// position and must line up with the chunk store.
    pub fn add(&mut self, embedding: &[f32]) -> Result<usize, VectorIndexError> {
        if embedding.len() != self.dimension {
            return Err(VectorIndexError::DimensionMismatch {
                expected: self.dimension,
                actual: embedding.len(),
            });
        }

        let ordinal = self.vectors.len();
        let vector = embedding.to_vec();
        self.hnsw.insert((&vector, ordinal));
        self.vectors.push(vector);
        Ok(ordinal)
    }

    /// Search for the k nearest neighbors of the query vector
    ///
    /// Returns `(chunk ordinal, similarity)` pairs, similarity descending.
    pub fn search(
        &self,
        query: &[f32],
        k: usize,
        ef_search: usize,
    ) -> Result<Vec<(usize, f32)>, VectorIndexError> {
        if query.len() != self.dimension {
            return Err(VectorIndexError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let neighbours = self.hnsw.search(query, k, ef_search);

        // HNSW returns cosine distance; similarity = 1 - distance
        Ok(neighbours
            .into_iter()
            .map(|n| (n.d_id, 1.0 - n.distance))
            .collect())
    }

    /// Number of vectors in the index
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the index holds no vectors
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Expected embedding dimension
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Persist the raw vectors, one JSON array per line, ordinal order
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StoreError> {
        let mut writer = BufWriter::new(File::create(path)?);
        for vector in &self.vectors {
            let line = serde_json::to_string(vector)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Load persisted vectors and rebuild the in-memory HNSW structure
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingVectorIndex`] if the file does not
    /// exist (the caller has not run indexing).
    pub fn load<P: AsRef<Path>>(path: P, dimension: usize) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StoreError::MissingVectorIndex {
                path: path.to_path_buf(),
            });
        }

        let reader = BufReader::new(File::open(path)?);
        let mut index = Self::new(dimension);

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let vector: Vec<f32> =
                serde_json::from_str(line).map_err(|source| StoreError::MalformedRecord {
                    line: idx + 1,
                    source,
                })?;
            index.add(&vector).map_err(|e| {
                std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
            })?;
        }

        Ok(index)
    }
}
