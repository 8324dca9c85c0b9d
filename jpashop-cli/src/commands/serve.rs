//! HTTP server command

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use jpashop_server::{run_server, AppState, ServerConfig};

use super::{open_database, DbArgs};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default from config: 127.0.0.1:8080)
    #[arg(long, short = 'b', env = "JPASHOP_BIND")]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    #[command(flatten)]
    pub db: DbArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let mut config = args.db.load_config()?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if args.cors_permissive {
        config.cors_permissive = true;
    }

    tracing::info!("Starting jpashop server on {}", config.bind_addr);

    let pool = open_database(&config).await?;
    let server_config = ServerConfig::from(&config);

    // Run server (blocks until shutdown)
    run_server(AppState::new(pool, config), server_config)
        .await
        .context("Server error")?;

    Ok(())
}
