//! Use cases on top of the repositories
//!
//! Each service borrows the pool like the repositories do. Domain rules
//! run on in-memory entities; the repositories persist the outcome, one
//! transaction per multi-row write.

pub mod categories;
pub mod items;
pub mod members;
pub mod orders;

pub use categories::CategoryService;
pub use items::ItemService;
pub use members::MemberService;
pub use orders::OrderService;

use jpashop_core::{ShopError, ValidationError};

use crate::db::DbError;

/// Service error type
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] ShopError),

    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<ValidationError> for ServiceError {
    fn from(e: ValidationError) -> Self {
        Self::Domain(ShopError::Validation(e))
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
