//! Emissary CLI — the main entry point.
//!
//! Commands:
//! - `onboard` — Initialize the config directory and default config
//! - `chat`    — Interactive chat or single-message mode
//! - `doctor`  — Diagnose configuration and content problems

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "emissary",
    about = "Emissary — a persona-constrained professional assistant",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration
    Onboard,

    /// Chat with the assistant
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,

        /// Print pipeline diagnostics after each response
        #[arg(short, long)]
        debug: bool,
    },

    /// Diagnose configuration and content problems
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Chat { message, debug } => commands::chat::run(message, debug).await?,
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
