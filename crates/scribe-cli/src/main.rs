//! Scribe CLI - ask questions against governed engineering documents.

use anyhow::Context;
use clap::Parser;
use scribe_cli::{commands, Cli, CliConfig, Command, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_ref()).context("loading configuration")?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Index(args) => commands::execute_index(args, &config, &formatter)?,
        Command::Query(args) => commands::execute_query(args, &config, &formatter)?,
        Command::Ask(args) => commands::execute_ask(args, &config, &formatter)?,
    }

    Ok(())
}
