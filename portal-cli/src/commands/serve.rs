//! HTTP server command for the student portal API

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use portal_server::db::{
    create_pool_with_options, migrations, MemoryStore, PgStore, RecordStore,
};
use portal_server::http::server::DEFAULT_REQUEST_TIMEOUT_SECS;
use portal_server::{run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "PORTAL_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long, env = "PORTAL_CORS_PERMISSIVE")]
    pub cors_permissive: bool,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, env = "PORTAL_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,

    /// Per-request timeout in seconds
    #[arg(long, env = "PORTAL_REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,

    /// Keep records in process memory instead of PostgreSQL (lost on exit).
    /// Any database URL is ignored.
    #[arg(long)]
    pub in_memory: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let store: Arc<dyn RecordStore> = if args.in_memory {
        tracing::warn!("Using in-memory store; records are lost on shutdown");
        Arc::new(MemoryStore::new())
    } else {
        let database_url = args
            .database_url
            .as_deref()
            .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;

        let pool = create_pool_with_options(database_url, args.max_connections)
            .await
            .context("Failed to create database pool")?;

        migrations::run(&pool)
            .await
            .context("Failed to apply database migrations")?;

        Arc::new(PgStore::new(pool))
    };

    tracing::info!("Starting portal server on {}", args.bind);

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        request_timeout: Duration::from_secs(args.request_timeout_secs),
    };

    // Blocks until shutdown
    run_server(store, config).await.context("Server error")?;

    Ok(())
}
