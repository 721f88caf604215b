//! picnicctl - teddy bear picnic API
//!
//! Entry point for:
//! - Serving the HTTP API (`serve`)
//! - Creating and migrating the SQLite store (`migrate`)
//! - Inspecting configuration (`config`)

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use commands::migrate::MigrateArgs;
use commands::serve::ServeArgs;
use config::ConfigArgs;

#[derive(Parser, Debug)]
#[command(
    name = "picnicctl",
    author,
    version,
    about = "Plan teddy bear picnics over a small JSON API"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (default: ~/.picnicctl/config.toml)
    #[arg(long, global = true, env = "PICNICCTL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(ServeArgs),
    /// Create the database if needed and apply the schema
    Migrate(MigrateArgs),
    /// Inspect configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // before parsing, so `.env` values can feed `env = ...` flags
    config::load_dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    let config_file = cli.config.as_deref();
    match cli.command {
        Commands::Serve(args) => {
            commands::run_serve(args, config::load_effective(config_file)?).await?
        }
        Commands::Migrate(args) => {
            commands::run_migrate(args, config::load_effective(config_file)?).await?
        }
        Commands::Config(args) => config::run_config(args, config_file)?,
    }
    Ok(())
}
