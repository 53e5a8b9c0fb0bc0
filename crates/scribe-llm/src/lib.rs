//! Scribe Completion Provider Layer
//!
//! Pluggable natural-language completion backends.
//!
//! # Architecture
//!
//! This crate provides implementations of the `CompletionProvider` trait
//! from `scribe-domain`. The answer pipeline treats completion as an opaque
//! call: providers own their timeout and retry policy, and their failures
//! propagate unchanged.
//!
//! # Providers
//!
//! - `MockProvider`: deterministic mock for testing and offline development
//! - `OllamaProvider`: local Ollama API integration
//!
//! # Examples
//!
//! ```
//! use scribe_llm::MockProvider;
//! use scribe_domain::traits::CompletionProvider;
//!
//! let provider = MockProvider::new("Set timeouts everywhere. Citations: [STD-02]");
//! let answer = provider.complete("any prompt").unwrap();
//! assert!(answer.contains("[STD-02]"));
//! ```

#![warn(missing_docs)]

pub mod ollama;

use scribe_domain::traits::CompletionProvider;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use ollama::OllamaProvider;

/// Errors that can occur during completion operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the provider
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Model not available on the provider
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic provider error
    #[error("Completion error: {0}")]
    Other(String),
}

/// Mock completion provider for deterministic testing
///
/// Returns pre-configured responses without any network calls. Specific
/// prompts can be mapped to specific responses; everything else gets the
/// default response.
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockProvider {
    /// Create a provider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(prompt.into(), response.into());
    }

    /// Number of times `complete` was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Insufficient information in provided sources.")
    }
}

impl CompletionProvider for MockProvider {
    type Error = LlmError;

    fn complete(&self, prompt: &str) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        let responses = self.responses.lock().unwrap();
        if let Some(response) = responses.get(prompt) {
            return Ok(response.clone());
        }

        Ok(self.default_response.clone())
    }
}

/// A provider selected at runtime by kind name
///
/// Lets binaries pick the backend from configuration without carrying a
/// generic parameter per provider type.
pub enum Provider {
    /// Deterministic mock, for development and tests
    Mock(MockProvider),

    /// Local Ollama instance
    Ollama(OllamaProvider),
}

impl Provider {
    /// Build a provider by kind name (`mock` or `ollama`)
    pub fn by_kind(kind: &str, endpoint: &str, model: &str) -> Result<Self, LlmError> {
        match kind.to_lowercase().as_str() {
            "mock" => Ok(Provider::Mock(MockProvider::default())),
            "ollama" => Ok(Provider::Ollama(OllamaProvider::new(endpoint, model))),
            other => Err(LlmError::Other(format!(
                "Unsupported provider '{}'. Use 'mock' or 'ollama'.",
                other
            ))),
        }
    }
}

impl CompletionProvider for Provider {
    type Error = LlmError;

    fn complete(&self, prompt: &str) -> Result<String, Self::Error> {
        match self {
            Provider::Mock(provider) => provider.complete(prompt),
            Provider::Ollama(provider) => provider.complete(prompt),
        }
    }
}
