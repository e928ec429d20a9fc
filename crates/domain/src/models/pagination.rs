//! Paginated list envelope.

use serde::{Deserialize, Serialize};
use shared::pagination::PageRequest;

/// Envelope returned by every list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub page_count: i64,
    pub current_page: i64,
    pub result: Vec<T>,
}

impl<T> ListResponse<T> {
    /// Wraps one page of results; `total_items` is the filtered row count.
    pub fn new(result: Vec<T>, total_items: i64, page: PageRequest) -> Self {
        Self {
            page_count: page.page_count(total_items),
            current_page: page.page,
            result,
        }
    }
}
