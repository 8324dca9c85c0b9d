//! Structured error types for jpashop-core.
//!
//! Business rule violations are ordinary values here; the server maps
//! them onto HTTP statuses and the binary wraps them with `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationError;

/// Main error type for domain operations
#[derive(Error, Debug)]
pub enum ShopError {
    /// Removing stock would drive the quantity below zero
    #[error("need more stock: requested {requested}, available {available}")]
    NotEnoughStock { requested: i32, available: i32 },

    /// Adding stock would push the quantity past `i32::MAX`
    #[error("stock overflow: cannot add {added} to {available}")]
    StockOverflow { added: i32, available: i32 },

    /// A member with the same name is already registered
    #[error("member '{name}' already exists")]
    DuplicateMember { name: String },

    /// Delivered orders cannot be cancelled
    #[error("order {order_id} has already been delivered and cannot be cancelled")]
    AlreadyDelivered { order_id: i64 },

    /// The order was cancelled before
    #[error("order {order_id} is already cancelled")]
    AlreadyCancelled { order_id: i64 },

    /// Input failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration file could not be read or parsed
    #[error("Configuration error in {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },
}

/// Result type alias for jpashop-core operations
pub type Result<T> = std::result::Result<T, ShopError>;

impl ShopError {
    /// Create a duplicate member error
    pub fn duplicate_member(name: impl Into<String>) -> Self {
        Self::DuplicateMember { name: name.into() }
    }

    /// Create a config error
    pub fn config(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
