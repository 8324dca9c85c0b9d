//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Connection pool, never a shared single connection
//! - Every association is loaded by an explicit query; the listing
//!   endpoints pick the query shape (per-row loaders, joins, `IN` batches)
//! - DB constraints have the final word on conflicts
//! - Transactions for multi-step writes

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
