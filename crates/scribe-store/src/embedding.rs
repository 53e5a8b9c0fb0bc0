//! Embedding seam for text vectorization
//!
//! The real embedding model is an external collaborator; this module defines
//! the trait the rest of the pipeline programs against and a deterministic
//! hash-based implementation used for tests and offline development.
//!
//! Hash embeddings carry no semantics, but they are deterministic, unit
//! length, and distinct per input, which is all the pipeline plumbing needs
//! to be exercised end to end.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Errors that can occur during embedding generation
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// Input text was empty
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Model inference failed
    #[error("Model inference failed: {0}")]
    InferenceFailed(String),
}

/// Trait for embedding models
///
/// Vectors are expected to be pre-normalized to unit length so that cosine
/// similarity equals the inner product.
pub trait EmbeddingModel {
    /// Generate an embedding vector for the given text
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Dimension of the vectors this model produces
    fn dimension(&self) -> usize;
}

/// Deterministic hash-based embedding model
///
/// Each component is derived by hashing the input text together with the
/// component index, then the whole vector is normalized to unit length.
/// Same text in, same vector out.
pub struct HashEmbeddingModel {
    dimension: usize,
}

impl HashEmbeddingModel {
    /// Create a model producing vectors of the given dimension
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    fn component(text: &str, seed: u64) -> f32 {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        seed.hash(&mut hasher);
        // Map the hash onto [-1, 1]
        let unit = hasher.finish() as f64 / u64::MAX as f64;
        (unit * 2.0 - 1.0) as f32
    }
}

impl EmbeddingModel for HashEmbeddingModel {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.is_empty() {
            return Err(EmbeddingError::InvalidInput(
                "empty text cannot be embedded".to_string(),
            ));
        }

        let mut vector: Vec<f32> = (0..self.dimension)
            .map(|i| Self::component(text, i as u64))
            .collect();

        let magnitude: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut vector {
                *value /= magnitude;
            }
        }

        Ok(vector)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Cosine similarity between two vectors of equal length
///
/// Returns a value in [-1, 1]; zero-magnitude inputs yield 0.0.
///
/// # Panics
///
/// Panics if the vectors differ in length.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "Vectors must have same length");

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }

    dot / (mag_a * mag_b)
}
