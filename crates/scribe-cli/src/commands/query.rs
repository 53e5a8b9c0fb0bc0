//! The `scribe query` command.

use crate::cli::QueryArgs;
use crate::config::CliConfig;
use crate::error::Result;
use crate::output::Formatter;
use scribe_retrieval::{QueryOptions, Retriever};
use scribe_store::HashEmbeddingModel;

/// Retrieve documents for a question without generation.
pub fn execute_query(args: QueryArgs, config: &CliConfig, formatter: &Formatter) -> Result<()> {
    let index_dir = args.index_dir.unwrap_or_else(|| config.index_dir.clone());

    let embedder = HashEmbeddingModel::new(config.embedding_dimension);
    let retriever = Retriever::open(&index_dir, embedder)?;

    let options = QueryOptions {
        top_k: args.top_k,
        candidates: args.candidates,
        allow_draft: args.allow_draft,
    };

    let records = retriever.query(&args.query, &options)?;
    println!("{}", formatter.format_results(&records)?);

    if args.reasons && !records.is_empty() {
        print!("{}", formatter.format_reasons(&records));
    }

    Ok(())
}
