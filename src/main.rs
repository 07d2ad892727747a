use anyhow::Context;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

/// The main entry point for the pensiondata API.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from the .env file, when there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => handle_serve(args).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// REST API over investment funds and their daily quotes.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server.
    Serve(ServeArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Path to the TOML configuration file. Missing files are ignored.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Listen address (e.g. "127.0.0.1:8080"), overrides the configuration.
    #[arg(long)]
    addr: Option<SocketAddr>,
}

// ==============================================================================
// Serve Command Logic
// ==============================================================================

async fn handle_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = configuration::load_config(&args.config)
        .with_context(|| format!("failed to load configuration from {}", args.config.display()))?;

    if let Some(addr) = args.addr {
        config.server.host = addr.ip().to_string();
        config.server.port = addr.port();
    }

    // Keep the guard alive so the file sink is flushed on exit.
    let _log_guard = configuration::init_tracing(&config.logging)?;

    tracing::info!(config = %args.config.display(), "Starting pensiondata API.");
    web_server::run_server(&config).await
}
