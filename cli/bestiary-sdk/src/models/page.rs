//! Paginated result container and the shared pagination arithmetic.

use serde::{Deserialize, Serialize};

/// Offset of the first item on a 1-based `page` with `limit` items per
/// page.
pub fn offset_for(page: u32, limit: u32) -> u64 {
    u64::from(page.saturating_sub(1)) * u64::from(limit)
}

/// One page of results, with the navigation fields derived from the full
/// (unpaginated) total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub current_page: u32,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl<T> Page<T> {
    /// Build a page from its items and the full total. `page` and `limit`
    /// must both be at least 1.
    pub fn new(items: Vec<T>, total_count: u64, page: u32, limit: u32) -> Self {
        let offset = offset_for(page, limit);
        Page {
            items,
            total_count,
            current_page: page,
            total_pages: total_count.div_ceil(u64::from(limit)) as u32,
            has_next_page: offset + u64::from(limit) < total_count,
            has_prev_page: page > 1,
        }
    }
}
