//! Radiograph - upload a medical image and get an AI-generated fitness
//! assessment.
//!
//! The image and a fixed radiologist prompt are sent to a multimodal
//! inference service; the returned text is shown as-is.
//!
//! # Usage
//!
//! ```bash
//! # Start the web front-end
//! radiograph serve --port 8501
//!
//! # Diagnose a single file from the terminal
//! radiograph diagnose chest.jpg
//!
//! # View configuration
//! radiograph config show
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;
mod logging;
mod report;
mod server;

/// Radiograph - AI-assisted radiograph fitness assessment.
#[derive(Parser, Debug)]
#[command(name = "radiograph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file to use instead of the default location
    #[arg(short, long, global = true, env = "RADIOGRAPH_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the web front-end
    Serve(cli::serve::ServeArgs),

    /// Diagnose a single image file
    Diagnose(cli::diagnose::DiagnoseArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli::config_path(cli.config.as_deref());

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match cli::load_config(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `radiograph config path`."
            );
            radiograph_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Radiograph v{}", radiograph_core::VERSION);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Serve(args) => cli::serve::execute(args, config).await,
        Commands::Diagnose(args) => cli::diagnose::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args, config_path.as_deref()).await,
    }
}
