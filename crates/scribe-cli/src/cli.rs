//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Scribe CLI - ask questions against governed engineering documents.
#[derive(Debug, Parser)]
#[command(name = "scribe")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (doc IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the retrieval index from the document corpus
    Index(IndexArgs),

    /// Retrieve documents for a question (no generation)
    Query(QueryArgs),

    /// Produce a grounded, citation-validated answer
    Ask(AskArgs),
}

/// Arguments for the index command.
#[derive(Debug, Parser)]
pub struct IndexArgs {
    /// Corpus directory (overrides config)
    #[arg(long)]
    pub corpus_dir: Option<PathBuf>,

    /// Index output directory (overrides config)
    #[arg(long)]
    pub index_dir: Option<PathBuf>,
}

/// Arguments for the query command.
#[derive(Debug, Parser)]
pub struct QueryArgs {
    /// The natural-language question
    pub query: String,

    /// Target result count (1-10)
    #[arg(short = 'k', long, default_value = "5")]
    pub top_k: usize,

    /// Candidate pool size fed to vector search (5-200)
    #[arg(long, default_value = "20")]
    pub candidates: usize,

    /// Include draft-status material
    #[arg(long)]
    pub allow_draft: bool,

    /// Print the full reason trail per result
    #[arg(long)]
    pub reasons: bool,

    /// Index directory (overrides config)
    #[arg(long)]
    pub index_dir: Option<PathBuf>,
}

/// Arguments for the ask command.
#[derive(Debug, Parser)]
pub struct AskArgs {
    /// The natural-language question
    pub query: String,

    /// Target result count (1-10)
    #[arg(short = 'k', long, default_value = "5")]
    pub top_k: usize,

    /// Candidate pool size fed to vector search (5-200)
    #[arg(long, default_value = "30")]
    pub candidates: usize,

    /// Include draft-status material
    #[arg(long)]
    pub allow_draft: bool,

    /// Index directory (overrides config)
    #[arg(long)]
    pub index_dir: Option<PathBuf>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_command_parsing() {
        let cli = Cli::parse_from(["scribe", "query", "what is the retry policy", "-k", "3"]);
        match cli.command {
            Command::Query(args) => {
                assert_eq!(args.query, "what is the retry policy");
                assert_eq!(args.top_k, 3);
                assert_eq!(args.candidates, 20);
                assert!(!args.allow_draft);
            }
            _ => panic!("Expected Query command"),
        }
    }

    #[test]
    fn test_ask_command_parsing() {
        let cli = Cli::parse_from(["scribe", "ask", "why did we choose oauth", "--allow-draft"]);
        match cli.command {
            Command::Ask(args) => {
                assert!(args.allow_draft);
                assert_eq!(args.candidates, 30);
            }
            _ => panic!("Expected Ask command"),
        }
    }

    #[test]
    fn test_index_command_parsing() {
        let cli = Cli::parse_from(["scribe", "index", "--corpus-dir", "data/corpus"]);
        match cli.command {
            Command::Index(args) => {
                assert_eq!(args.corpus_dir, Some(PathBuf::from("data/corpus")));
            }
            _ => panic!("Expected Index command"),
        }
    }
}
