//! Integration tests for the HTTP surface

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use scribe_answer::Answerer;
use scribe_domain::Chunk;
use scribe_llm::{MockProvider, Provider};
use scribe_retrieval::Retriever;
use scribe_server::handlers::{
    create_router, AnswerResponse, AppState, ErrorResponse, HealthResponse, QueryResponse,
};
use scribe_store::{EmbeddingModel, HashEmbeddingModel, JsonlChunkStore, VectorIndex};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower::ServiceExt; // for oneshot

const DIM: usize = 32;

fn chunk(doc_id: &str, doc_type: &str, status: &str, text: &str) -> Chunk {
    let mut meta = BTreeMap::new();
    meta.insert("status".to_string(), status.to_string());
    meta.insert("title".to_string(), format!("{}: Title", doc_id));
    Chunk {
        chunk_id: format!("{}::chunk-000", doc_id),
        doc_id: doc_id.to_string(),
        doc_type: doc_type.to_string(),
        text: text.to_string(),
        meta,
    }
}

fn create_test_state(provider: MockProvider) -> AppState {
    let chunks = vec![
        chunk("STD-02", "STD", "approved", "Timeout rules for all calls."),
        chunk("RBK-07", "RBK", "approved", "Token outage runbook steps."),
        chunk("STD-11", "STD", "deprecated", "Deploy only on Tuesdays."),
    ];

    let embedder = HashEmbeddingModel::new(DIM);
    let mut index = VectorIndex::new(DIM);
    for c in &chunks {
        index.add(&embedder.embed(&c.text).unwrap()).unwrap();
    }

    let retriever = Retriever::new(JsonlChunkStore::from_chunks(chunks), index, embedder);
    AppState {
        answerer: Arc::new(Answerer::new(retriever, Provider::Mock(provider))),
    }
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_router(create_test_state(MockProvider::default()));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let health: HealthResponse = body_json(response).await;
    assert_eq!(health.status, "ok");
    assert_eq!(health.chunks, 3);
}

#[tokio::test]
async fn test_query_excludes_deprecated() {
    let app = create_router(create_test_state(MockProvider::default()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/query?q=retry%20timeout%20policy")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let payload: QueryResponse = body_json(response).await;
    assert!(!payload.results.is_empty());
    assert!(payload.results.iter().all(|r| r.doc_id != "STD-11"));
}

#[tokio::test]
async fn test_query_rejects_out_of_bounds_top_k() {
    let app = create_router(create_test_state(MockProvider::default()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/query?q=retry%20policy&top_k=99")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = body_json(response).await;
    assert_eq!(error.kind, "invalid_request");
}

#[tokio::test]
async fn test_query_rejects_short_question() {
    let app = create_router(create_test_state(MockProvider::default()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/query?q=ab")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_answer_returns_validated_citations() {
    let provider = MockProvider::new("Set timeouts [STD-02]. Citations: [STD-02]");
    let app = create_router(create_test_state(provider));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/answer?q=retry%20timeout%20policy")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let payload: AnswerResponse = body_json(response).await;
    assert_eq!(payload.citations, vec!["STD-02"]);
    assert!(!payload.retrieved.is_empty());
}

#[tokio::test]
async fn test_answer_citation_violation_is_distinct_upstream_failure() {
    let provider = MockProvider::new("Per [ADR-099], use gRPC. Citations: [ADR-099]");
    let app = create_router(create_test_state(provider));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/answer?q=retry%20timeout%20policy")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let error: ErrorResponse = body_json(response).await;
    assert_eq!(error.kind, "citation_violation");
    assert!(error.error.contains("ADR-099"));
}
