//! jpashop-core: domain model for the shopping backend
//!
//! Holds the entities (members, items, categories, orders, deliveries),
//! the few business rules they carry, validated input types and the
//! shared configuration. Nothing in here touches the database.

pub mod config;
pub mod domain;
pub mod error;
pub mod validation;

pub use config::ShopConfig;
pub use domain::{
    Address, Category, Delivery, DeliveryStatus, Item, ItemKind, Member, Order, OrderItem,
    OrderSearch, OrderStatus,
};
pub use error::{Result, ShopError};
pub use validation::{Count, MemberName, Price, ValidationError};
