//! Command implementations for the jpashop CLI

pub mod migrate;
pub mod seed;
pub mod serve;

pub use migrate::run_migrate;
pub use seed::run_seed;
pub use serve::run_serve;

use anyhow::{Context, Result};
use clap::Args;
use sqlx::SqlitePool;

use jpashop_core::ShopConfig;
use jpashop_server::db::{create_pool_with_options, migrations};

/// Database selection shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct DbArgs {
    /// Database URL (overrides config file and environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

impl DbArgs {
    /// Load `ShopConfig` and apply the flag on top.
    pub fn load_config(&self) -> Result<ShopConfig> {
        let mut config = ShopConfig::load().context("Failed to load jpashop config")?;
        if let Some(url) = &self.database_url {
            config.database_url = url.clone();
        }
        Ok(config)
    }
}

/// Open the pool and bring the schema up to date.
pub(crate) async fn open_database(config: &ShopConfig) -> Result<SqlitePool> {
    tracing::debug!(database_url = %config.database_url, "opening database");

    let pool = create_pool_with_options(&config.database_url, config.max_connections)
        .await
        .with_context(|| format!("Failed to open database {}", config.database_url))?;

    migrations::run(&pool)
        .await
        .context("Failed to apply schema")?;

    Ok(pool)
}
