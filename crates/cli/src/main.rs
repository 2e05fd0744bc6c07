//! SummAIze CLI
//!
//! Main entry point for the `summaize` binary: runs the HTTP API, summarizes
//! files offline, and reports which model variants are usable.

mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use commands::{ModelsCommand, ServeCommand, SummarizeCommand};
use std::path::PathBuf;
use summaize_core::{
    config::AppConfig,
    logging::{self, LogFormat},
};

/// SummAIze - summaries for long PDF documents
#[derive(Parser, Debug)]
#[command(name = "summaize")]
#[command(about = "Summaries for long PDF documents", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "SUMMAIZE_CONFIG")]
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

    /// Address to bind
    #[arg(long, global = true, env = "SUMMAIZE_HOST")]
    host: Option<String>,

    /// Port to bind
    #[arg(short, long, global = true, env = "SUMMAIZE_PORT")]
    port: Option<u16>,

    /// SQLite database path
    #[arg(long, global = true, env = "SUMMAIZE_DATABASE")]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Load the file and environment, apply flag overrides, and validate.
    ///
    /// Every subcommand goes through this, so no command runs with an
    /// invalid chunking or model setup.
    fn resolve_config(&mut self) -> anyhow::Result<AppConfig> {
        let config = AppConfig::load_from(self.config.take())
            .context("Failed to load configuration")?
            .with_overrides(
                self.host.take(),
                self.port.take(),
                self.database.take(),
                self.log_level.take(),
                self.verbose,
                self.no_color,
            );

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP API
    Serve(ServeCommand),

    /// Summarize a PDF or text file
    Summarize(SummarizeCommand),

    /// Check the configured models and show which are available
    Models(ModelsCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments first (needed for logging config)
    let mut cli = Cli::parse();

    let config = cli.resolve_config()?;

    logging::init_logging(
        config.logging.level.as_deref(),
        LogFormat::parse(&config.logging.format),
        !config.logging.color,
    )?;

    tracing::info!("SummAIze starting");
    tracing::debug!("Config file: {:?}", config.config_file);
    tracing::debug!("Database: {:?}", config.database.path);

    let command_name = match &cli.command {
        Commands::Serve(_) => "serve",
        Commands::Summarize(_) => "summarize",
        Commands::Models(_) => "models",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Serve(cmd) => cmd.execute(config).await,
        Commands::Summarize(cmd) => cmd.execute(&config).await,
        Commands::Models(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {:#}", e),
    }

    result
}
