//! Route handlers organized by resource
//!
//! `simple_orders` and `order_api` serve the same orders through different
//! query strategies; the version segment of the path selects one.

pub mod categories;
pub mod health;
pub mod items;
pub mod members;
pub mod order_api;
pub mod orders;
pub mod simple_orders;
