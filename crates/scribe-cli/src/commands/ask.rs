//! The `scribe ask` command.

use crate::cli::AskArgs;
use crate::config::CliConfig;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use scribe_answer::Answerer;
use scribe_llm::Provider;
use scribe_retrieval::{QueryOptions, Retriever};
use scribe_store::HashEmbeddingModel;

/// Produce a grounded, citation-validated answer.
pub fn execute_ask(args: AskArgs, config: &CliConfig, formatter: &Formatter) -> Result<()> {
    let index_dir = args.index_dir.unwrap_or_else(|| config.index_dir.clone());

    let embedder = HashEmbeddingModel::new(config.embedding_dimension);
    let retriever = Retriever::open(&index_dir, embedder)?;

    let provider = Provider::by_kind(
        &config.provider.kind,
        &config.provider.endpoint,
        &config.provider.model,
    )
    .map_err(|e| CliError::Config(e.to_string()))?;

    let answerer = Answerer::new(retriever, provider);

    let options = QueryOptions {
        top_k: args.top_k,
        candidates: args.candidates,
        allow_draft: args.allow_draft,
    };

    let answer = answerer.answer(&args.query, &options)?;
    println!("{}", formatter.format_answer(&answer)?);

    Ok(())
}
