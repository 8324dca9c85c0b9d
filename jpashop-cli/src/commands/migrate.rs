//! Schema command

use anyhow::Result;
use clap::Parser;

use super::{open_database, DbArgs};

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub db: DbArgs,
}

/// Create the tables if they are missing
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let config = args.db.load_config()?;
    let pool = open_database(&config).await?;
    pool.close().await;

    println!("Schema is up to date ({})", config.database_url);
    Ok(())
}
