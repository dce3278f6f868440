//! Docent server CLI
//!
//! Starts the HTTP API.

use clap::Parser;
use docent_server::{config::ServerConfig, start_server, ServerError};
use std::path::PathBuf;
use std::process;

/// Document portal with text extraction and grounded question answering
#[derive(Debug, Parser)]
#[command(name = "docent-server", version, about)]
struct Cli {
    /// Load configuration from TOML file
    #[arg(short, long, env = "DOCENT_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => {
            eprintln!("Warning: No config file specified, using default development configuration");
            eprintln!("Usage: docent-server --config <path-to-config.toml>");
            eprintln!();
            ServerConfig::default_dev_config()
        }
    };

    start_server(config).await
}
