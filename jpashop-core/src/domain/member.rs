use serde::Serialize;

use super::Address;

/// A registered shop member
///
/// The member's orders are not held here; they are queried through
/// `orders.member_id` when needed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub address: Option<Address>,
}
