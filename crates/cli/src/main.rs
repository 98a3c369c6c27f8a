//! webask CLI
//!
//! Main entry point for the webask command-line tool.
//! Answers questions from live web sources with a local or hosted model.

mod commands;
mod render;

use clap::{Parser, Subcommand};
use commands::{AskCommand, ChatCommand, SearchCommand};
use std::path::PathBuf;
use webask_core::{config::AppConfig, logging, AppResult};

/// webask - ask anything, answered from Wikipedia and DuckDuckGo
#[derive(Parser, Debug)]
#[command(name = "webask")]
#[command(about = "Answer questions grounded in live web search", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "WEBASK_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// Generation backend (local, hosted)
    #[arg(short, long, global = true, env = "WEBASK_BACKEND")]
    backend: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true, env = "WEBASK_MODEL")]
    model: Option<String>,

    /// Backend base URL
    #[arg(long, global = true, env = "WEBASK_ENDPOINT")]
    endpoint: Option<String>,

    /// API key for the hosted backend
    #[arg(long, global = true, env = "WEBASK_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer a single question
    Ask(AskCommand),

    /// Ask questions interactively
    Chat(ChatCommand),

    /// Show what the web sources return for a question
    Search(SearchCommand),
}

impl Commands {
    /// Whether the command calls the generation backend.
    fn generates_answers(&self) -> bool {
        matches!(self, Commands::Ask(_) | Commands::Chat(_))
    }
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load defaults, config file and environment
    let config = AppConfig::load(cli.config.as_deref())?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.backend,
        cli.model,
        cli.endpoint,
        cli.api_key,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("webask starting");
    tracing::debug!("Backend: {}", config.provider);
    tracing::debug!("Config file: {:?}", config.config_file);

    config.validate()?;
    if cli.command.generates_answers() {
        config.validate_credentials()?;
    }

    let command_name = match &cli.command {
        Commands::Ask(_) => "ask",
        Commands::Chat(_) => "chat",
        Commands::Search(_) => "search",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Chat(cmd) => cmd.execute(&config).await,
        Commands::Search(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
