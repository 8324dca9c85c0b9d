use serde::Deserialize;

use super::OrderStatus;

/// Filters for the order search listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSearch {
    /// Substring of the member name
    pub member_name: Option<String>,
    pub order_status: Option<OrderStatus>,
}

impl OrderSearch {
    /// Upper bound on rows returned by a search
    pub const MAX_RESULTS: i64 = 1000;

    /// `LIKE` pattern for the member name, if one was given.
    pub fn member_name_pattern(&self) -> Option<String> {
        self.member_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| format!("%{}%", name))
    }
}
