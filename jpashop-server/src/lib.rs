//! jpashop-server: HTTP API and persistence for the shop
//!
//! Members, items, categories and orders on SQLite, plus a family of
//! order listings that each load the same data with a different query
//! strategy.

pub mod db;
pub mod http;
pub mod models;
pub mod seed;
pub mod service;
pub mod state;

#[cfg(test)]
mod test_support;

pub use db::DbError;
pub use http::{build_router, run_server, ApiError, ServerConfig, ServerError};
pub use service::ServiceError;
pub use state::AppState;
