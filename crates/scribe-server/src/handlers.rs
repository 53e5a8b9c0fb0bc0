//! HTTP request handlers
//!
//! Implements the query, answer, and health endpoints using axum. Grounding
//! violations surface as an upstream-validation failure (502) with a
//! distinct error kind, never as a plain retrieval failure (500).

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router as AxumRouter,
};
use scribe_answer::{Answerer, AnswerError};
use scribe_domain::ResultRecord;
use scribe_llm::Provider;
use scribe_retrieval::{QueryOptions, RetrievalError};
use scribe_store::HashEmbeddingModel;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared application state
///
/// The answerer (and the stores beneath it) is read-only for the process
/// lifetime; concurrent requests share it without locking.
#[derive(Clone)]
pub struct AppState {
    /// The answer pipeline over the loaded index
    pub answerer: Arc<Answerer<HashEmbeddingModel, Provider>>,
}

/// Query string parameters shared by `/query` and `/answer`
#[derive(Debug, Deserialize)]
pub struct QueryParams {
    /// The natural-language question
    pub q: String,

    /// Target result count
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Candidate pool size fed to vector search
    #[serde(default = "default_candidates")]
    pub candidates: usize,

    /// Allow draft-status material for this call
    #[serde(default)]
    pub allow_draft: bool,
}

fn default_top_k() -> usize {
    5
}

fn default_candidates() -> usize {
    30
}

impl QueryParams {
    fn validate(&self) -> Result<QueryOptions, AppError> {
        if self.q.trim().len() < 3 {
            return Err(AppError::InvalidRequest(
                "q must be at least 3 characters".to_string(),
            ));
        }
        Ok(QueryOptions {
            top_k: self.top_k,
            candidates: self.candidates,
            allow_draft: self.allow_draft,
        })
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Chunks available for retrieval
    pub chunks: usize,
}

/// Response shape of `/query`
#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResponse {
    /// The original query
    pub query: String,
    /// Requested result count
    pub top_k: usize,
    /// Requested candidate pool size
    pub candidates: usize,
    /// Ordered result records
    pub results: Vec<ResultRecord>,
}

/// Response shape of `/answer`
#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerResponse {
    /// The original query
    pub query: String,
    /// Generated, citation-validated answer text
    pub answer: String,
    /// Validated citations in first-occurrence order
    pub citations: Vec<String>,
    /// The result records the answer was grounded on
    pub retrieved: Vec<ResultRecord>,
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable failure kind
    pub kind: String,
    /// Human-readable message
    pub error: String,
}

/// Application-level errors mapped to HTTP statuses
#[derive(Debug)]
pub enum AppError {
    /// Malformed request parameters (400)
    InvalidRequest(String),

    /// Retrieval failed (500)
    Retrieval(RetrievalError),

    /// The completion provider failed (502)
    Completion(String),

    /// The generated answer cited documents outside the retrieved set (502,
    /// distinct kind)
    CitationViolation {
        /// The offending identifiers
        illegal: Vec<String>,
        /// The allowed identifier set
        allowed: Vec<String>,
    },

    /// Internal error (500)
    Internal(String),
}

impl From<RetrievalError> for AppError {
    fn from(e: RetrievalError) -> Self {
        match e {
            RetrievalError::InvalidOptions(msg) => AppError::InvalidRequest(msg),
            other => AppError::Retrieval(other),
        }
    }
}

impl From<AnswerError> for AppError {
    fn from(e: AnswerError) -> Self {
        match e {
            AnswerError::Retrieval(e) => AppError::from(e),
            AnswerError::Completion(msg) => AppError::Completion(msg),
            AnswerError::CitationViolation { illegal, allowed } => {
                AppError::CitationViolation { illegal, allowed }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg)
            }
            AppError::Retrieval(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "retrieval_failure",
                e.to_string(),
            ),
            AppError::Completion(msg) => (StatusCode::BAD_GATEWAY, "completion_failure", msg),
            AppError::CitationViolation { illegal, allowed } => (
                StatusCode::BAD_GATEWAY,
                "citation_violation",
                format!(
                    "Answer cited unknown doc IDs: {:?}. Allowed: {:?}",
                    illegal, allowed
                ),
            ),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg),
        };

        let body = Json(ErrorResponse {
            kind: kind.to_string(),
            error: message,
        });
        (status, body).into_response()
    }
}

/// GET /health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        chunks: state.answerer.retriever().chunk_count(),
    })
}

/// GET /query - policy-aware retrieval only
async fn query(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<QueryResponse>, AppError> {
    let options = params.validate()?;
    let results = state.answerer.retriever().query(&params.q, &options)?;

    Ok(Json(QueryResponse {
        query: params.q,
        top_k: options.top_k,
        candidates: options.candidates,
        results,
    }))
}

/// GET /answer - retrieval plus grounded generation
async fn answer(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<AnswerResponse>, AppError> {
    let options = params.validate()?;

    // Provider calls block; keep them off the async worker threads
    let answerer = Arc::clone(&state.answerer);
    let question = params.q.clone();
    let result = tokio::task::spawn_blocking(move || answerer.answer(&question, &options))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    Ok(Json(AnswerResponse {
        query: result.query,
        answer: result.answer,
        citations: result.citations,
        retrieved: result.retrieved,
    }))
}

/// Build the axum router over the application state
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/health", get(health))
        .route("/query", get(query))
        .route("/answer", get(answer))
        .with_state(state)
}
