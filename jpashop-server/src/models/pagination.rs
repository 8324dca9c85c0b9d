//! Paging types for list endpoints

use serde::{Deserialize, Serialize};

/// Maximum rows per page
const MAX_LIMIT: u32 = 1000;

/// Default rows per page
const DEFAULT_LIMIT: u32 = 100;

/// Offset/limit window over a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetLimit {
    /// Rows to skip
    pub offset: u32,
    /// Rows to return (1..=1000)
    pub limit: u32,
}

impl OffsetLimit {
    /// Create a window; the limit is clamped to 1..=1000.
    pub fn new(offset: u32, limit: u32) -> Self {
        Self {
            offset,
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }
}

impl Default for OffsetLimit {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Query parameters for offset paging
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OffsetLimitParams {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

impl From<OffsetLimitParams> for OffsetLimit {
    fn from(params: OffsetLimitParams) -> Self {
        Self::new(
            params.offset.unwrap_or(0),
            params.limit.unwrap_or(DEFAULT_LIMIT),
        )
    }
}

/// List response wrapped in an object so fields can be added later
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Counted<T> {
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> From<Vec<T>> for Counted<T> {
    fn from(data: Vec<T>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}
