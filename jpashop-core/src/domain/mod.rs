//! Entities and the business rules they carry
//!
//! Ids are assigned by the database. Entities built in memory before
//! their first insert carry [`UNSAVED_ID`].

pub mod address;
pub mod category;
pub mod delivery;
pub mod item;
pub mod member;
pub mod order;
pub mod search;

pub use address::Address;
pub use category::Category;
pub use delivery::{Delivery, DeliveryStatus};
pub use item::{Item, ItemDraft, ItemKind, KindColumns};
pub use member::Member;
pub use order::{Order, OrderItem, OrderStatus};
pub use search::OrderSearch;

/// Id of an entity that has not been inserted yet
pub const UNSAVED_ID: i64 = 0;
