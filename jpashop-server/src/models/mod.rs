//! Request and response helper types

pub mod pagination;

pub use pagination::{Counted, OffsetLimit, OffsetLimitParams};
