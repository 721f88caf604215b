//! `picnicctl config` and effective-config resolution

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use picnic_server::PicnicConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Print the effective configuration as TOML
    Show,
}

pub fn run_config(args: ConfigArgs, config_file: Option<&Path>) -> Result<()> {
    match args.command {
        ConfigCommands::Path => {
            println!("{}", config_path(config_file).display());
            Ok(())
        }
        ConfigCommands::Show => {
            let config = load_effective(config_file)?;
            let toml_str =
                toml::to_string_pretty(&config).context("Failed to serialize config to TOML")?;
            println!("{}", toml_str);
            Ok(())
        }
    }
}

fn config_path(config_file: Option<&Path>) -> PathBuf {
    config_file
        .map(Path::to_path_buf)
        .unwrap_or_else(PicnicConfig::config_path)
}

/// Config file (explicit or default) with `DATABASE_URL` applied on top.
pub fn load_effective(config_file: Option<&Path>) -> Result<PicnicConfig> {
    let mut config = match config_file {
        Some(path) => PicnicConfig::load_from(path)?,
        None => PicnicConfig::load()?,
    };
    config.apply_env();
    Ok(config)
}

/// Load `.env` from the working directory, then `~/.picnicctl/.env`.
/// Variables already set are never overwritten.
pub fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!("Loaded .env from {}", path.display());
    }

    if let Some(home) = dirs::home_dir() {
        let env_file = home.join(".picnicctl").join(".env");
        if env_file.exists() {
            if let Err(e) = dotenvy::from_path(&env_file) {
                tracing::debug!("Failed to load {}: {}", env_file.display(), e);
            }
        }
    }
}
