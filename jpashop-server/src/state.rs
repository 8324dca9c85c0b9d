//! Application state shared across handlers

use sqlx::SqlitePool;

use jpashop_core::ShopConfig;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: ShopConfig,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: ShopConfig) -> Self {
        Self { pool, config }
    }

    /// Owner ids per `IN (...)` query when batch-fetching collections
    pub fn batch_fetch_size(&self) -> usize {
        self.config.default_batch_fetch_size
    }
}
