//! Scribe server binary
//!
//! Starts the HTTP server over a previously built index.

use scribe_server::{config::ServerConfig, start_server, ServerError};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        ServerConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        ServerConfig::default()
    };

    start_server(config).await
}

fn print_help() {
    println!("Scribe Server - governed engineering knowledge over HTTP");
    println!();
    println!("USAGE:");
    println!("    scribe-server --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("ENDPOINTS:");
    println!("    GET /health        Service status and chunk count");
    println!("    GET /query         Policy-aware retrieval (q, top_k, candidates, allow_draft)");
    println!("    GET /answer        Grounded answer with citation validation");
    println!();
    println!("Run `scribe index` before starting the server.");
}
