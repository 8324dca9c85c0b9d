//! Repository implementations for database access
//!
//! Each repository borrows the pool and follows these patterns:
//! - Column aliases are shared across queries (`member_name`,
//!   `delivery_status`, `item_stock_quantity`, ...) so one row mapper per
//!   entity serves plain selects and joins alike
//! - Conflicts surface from constraints (UNIQUE, guarded UPDATEs)
//! - Multi-step writes run in one transaction

#[macro_use]
mod rows;

pub mod categories;
pub mod items;
pub mod members;
pub mod order_query;
pub mod orders;

pub use categories::CategoryRepo;
pub use items::ItemRepo;
pub use members::MemberRepo;
pub use order_query::{
    OrderFlatDto, OrderItemQueryDto, OrderQueryDto, OrderQueryRepo, OrderSimpleQueryDto,
};
pub use orders::{OrderItemRow, OrderRepo, OrderRow};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// A constraint or guarded update rejected the write
    #[error("conflict on {resource} '{id}': {reason}")]
    Conflict {
        resource: &'static str,
        id: String,
        reason: &'static str,
    },
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

/// True when `err` is a UNIQUE constraint violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.is_unique_violation(),
        _ => false,
    }
}
