//! Schema migration

use sqlx::SqlitePool;

/// Apply the schema. Every statement is `IF NOT EXISTS`, so this is
/// idempotent and runs on every server start.
pub async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Running schema migrations...");

    sqlx::raw_sql(include_str!("schema.sql"))
        .execute(pool)
        .await?;

    tracing::info!("Schema migrations complete");
    Ok(())
}
