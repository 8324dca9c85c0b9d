//! Sample data command

use anyhow::{Context, Result};
use clap::Parser;

use jpashop_server::seed::seed;

use super::{open_database, DbArgs};

/// Arguments for the seed command
#[derive(Parser, Debug)]
pub struct SeedArgs {
    #[command(flatten)]
    pub db: DbArgs,
}

/// Insert userA/userB and their book orders, finishing any partial earlier run
pub async fn run_seed(args: SeedArgs) -> Result<()> {
    let config = args.db.load_config()?;
    let pool = open_database(&config).await?;

    let inserted = seed(&pool).await.context("Failed to insert sample data")?;
    pool.close().await;

    if inserted {
        println!("Inserted sample members, items and orders");
    } else {
        println!("Sample data already present; nothing inserted");
    }
    Ok(())
}
