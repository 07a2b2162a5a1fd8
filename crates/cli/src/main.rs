//! carcare CLI — the main entry point.
//!
//! Commands:
//! - `ask`      — Answer a single question
//! - `chat`     — Interactive chat session
//! - `onboard`  — Write a default config file
//! - `config`   — Show, locate or validate the config
//! - `doctor`   — Diagnose configuration and connectivity

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "carcare",
    about = "5K Car Care support assistant",
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
    /// Answer a single question
    Ask {
        /// The question to answer
        question: String,

        /// Answer from the built-in knowledge only, without calling the model
        #[arg(long)]
        offline: bool,
    },

    /// Start an interactive chat session
    Chat,

    /// Write a default configuration file
    Onboard,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Diagnose configuration and connectivity
    Doctor,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Validate the configuration
    Validate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Ask { question, offline } => {
            commands::ask::run(&question, offline, cli.verbose).await?
        }
        Commands::Chat => commands::chat::run().await?,
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show().await?,
            ConfigAction::Path => commands::config_cmd::path().await?,
            ConfigAction::Validate => commands::config_cmd::validate().await?,
        },
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
