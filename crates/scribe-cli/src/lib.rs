//! Scribe CLI - command-line interface for the governed knowledge agent.

pub mod cli;
pub mod commands;
pub mod config;
pub mod corpus;
pub mod error;
pub mod output;

pub use cli::{Cli, CliFormat, Command};
pub use config::{CliConfig, OutputFormat};
pub use error::{CliError, Result};
pub use output::Formatter;
