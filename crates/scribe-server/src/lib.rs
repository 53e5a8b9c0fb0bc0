//! Scribe HTTP Server
//!
//! Serves the knowledge agent over HTTP: `/query` for policy-aware
//! retrieval, `/answer` for grounded generation with citation validation,
//! and `/health`.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use handlers::{create_router, AppState};
use scribe_answer::Answerer;
use scribe_llm::Provider;
use scribe_retrieval::Retriever;
use scribe_store::HashEmbeddingModel;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Completion provider could not be constructed
    #[error("Provider error: {0}")]
    Provider(String),

    /// Index artifacts missing or unreadable
    #[error(transparent)]
    Retrieval(#[from] scribe_retrieval::RetrievalError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the HTTP server
///
/// Loads the index artifacts once, builds the configured provider, and
/// serves until interrupted. Fails fast when indexing has not been run.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    tracing_subscriber::fmt::init();

    info!("Starting Scribe server");
    info!("Bind address: {}", config.bind_addr());
    info!("Index directory: {}", config.index_dir.display());

    let embedder = HashEmbeddingModel::new(config.embedding_dimension);
    let retriever = Retriever::open(&config.index_dir, embedder)?;
    let provider = Provider::by_kind(
        &config.provider.kind,
        &config.provider.endpoint,
        &config.provider.model,
    )
    .map_err(|e| ServerError::Provider(e.to_string()))?;

    let state = AppState {
        answerer: Arc::new(Answerer::new(retriever, provider)),
    };

    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Scribe server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
