//! Schema migration command

use anyhow::{Context, Result};
use clap::Parser;

use picnic_server::db::{create_pool, migrations};
use picnic_server::PicnicConfig;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

/// Create the database if needed and apply the schema
pub async fn run_migrate(args: MigrateArgs, config: PicnicConfig) -> Result<()> {
    let url = args.database_url.unwrap_or(config.database.url);

    let pool = create_pool(&url)
        .await
        .with_context(|| format!("Failed to open database {}", url))?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;
    pool.close().await;

    println!("Migrations applied to {}", url);
    Ok(())
}
