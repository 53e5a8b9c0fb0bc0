//! The `scribe index` command.

use crate::cli::IndexArgs;
use crate::config::CliConfig;
use crate::corpus;
use crate::error::Result;
use crate::output::Formatter;
use scribe_index::{ChunkConfig, IndexBuilder};
use scribe_store::HashEmbeddingModel;

/// Build the retrieval index from the markdown corpus.
pub fn execute_index(args: IndexArgs, config: &CliConfig, formatter: &Formatter) -> Result<()> {
    let corpus_dir = args.corpus_dir.unwrap_or_else(|| config.corpus_dir.clone());
    let index_dir = args.index_dir.unwrap_or_else(|| config.index_dir.clone());

    let documents = corpus::load_corpus(&corpus_dir)?;
    println!(
        "{}",
        formatter.info(&format!(
            "Parsed {} documents from {}",
            documents.len(),
            corpus_dir.display()
        ))
    );

    let embedder = HashEmbeddingModel::new(config.embedding_dimension);
    let builder = IndexBuilder::new(embedder, ChunkConfig::default())?;
    let report = builder.build_and_persist(&documents, &index_dir)?;

    println!(
        "{}",
        formatter.success(&format!(
            "Indexed {} documents into {} chunks at {}",
            report.documents,
            report.chunks,
            index_dir.display()
        ))
    );

    Ok(())
}
