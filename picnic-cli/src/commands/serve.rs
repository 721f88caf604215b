//! HTTP server command
//!
//! Opens the store, applies migrations and serves the picnic API until
//! Ctrl+C or SIGTERM.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use picnic_server::db::{create_pool_with_options, migrations};
use picnic_server::http::{run_server, AppState};
use picnic_server::swagger::SwaggerClient;
use picnic_server::PicnicConfig;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default from config: 127.0.0.1:3030)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long)]
    pub max_connections: Option<u32>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub request_timeout: Option<u64>,
}

impl ServeArgs {
    /// Flags win over file and environment.
    fn apply(&self, config: &mut PicnicConfig) {
        if let Some(bind) = self.bind {
            config.server.bind_addr = bind;
        }
        if self.cors_permissive {
            config.server.cors_permissive = true;
        }
        if let Some(url) = &self.database_url {
            config.database.url = url.clone();
        }
        if let Some(max) = self.max_connections {
            config.database.max_connections = max;
        }
        if let Some(secs) = self.request_timeout {
            config.server.request_timeout_secs = secs;
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, mut config: PicnicConfig) -> Result<()> {
    args.apply(&mut config);

    tracing::info!(
        bind = %config.server.bind_addr,
        database = %config.database.url,
        "Starting picnic server"
    );

    let pool = create_pool_with_options(&config.database.url, config.database.max_connections)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    let swagger = SwaggerClient::new(&config.swagger).context("Failed to build swagger client")?;

    // Run server (blocks until shutdown)
    run_server(AppState { pool, swagger }, config.server)
        .await
        .context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = ServeArgs::parse_from([
            "serve",
            "--bind",
            "0.0.0.0:8080",
            "--database-url",
            "sqlite://flag.db",
            "--request-timeout",
            "5",
        ]);
        let mut config = PicnicConfig::default();
        args.apply(&mut config);

        assert_eq!(config.server.bind_addr.port(), 8080);
        assert_eq!(config.database.url, "sqlite://flag.db");
        assert_eq!(config.server.request_timeout_secs, 5);
        assert!(!config.server.cors_permissive);
    }
}
