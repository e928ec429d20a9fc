//! Page-number pagination utilities.
//!
//! List endpoints take `page` and `page-size` query parameters as raw
//! strings; anything unparsable or non-positive falls back to a default.

/// Default page number.
pub const DEFAULT_PAGE: i64 = 1;

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest page size a client may request; bigger values are clamped.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Resolved page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    /// Builds a page request from optional raw query values.
    pub fn from_query(page: Option<&str>, page_size: Option<&str>) -> Self {
        Self {
            page: parse_positive_or(page, DEFAULT_PAGE),
            page_size: parse_positive_or(page_size, DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE),
        }
    }

    /// Number of rows to skip. Saturates for huge page numbers.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Maximum number of rows to fetch.
    pub fn limit(&self) -> i64 {
        self.page_size
    }

    /// Total page count for `total_items` matching rows.
    pub fn page_count(&self, total_items: i64) -> i64 {
        page_count(total_items, self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Parses a positive integer, falling back to `default`.
pub fn parse_positive_or(raw: Option<&str>, default: i64) -> i64 {
    match raw.and_then(|s| s.trim().parse::<i64>().ok()) {
        Some(value) if value > 0 => value,
        _ => default,
    }
}

/// `ceil(total_items / page_size)`; zero items yield zero pages.
pub fn page_count(total_items: i64, page_size: i64) -> i64 {
    if total_items <= 0 || page_size <= 0 {
        return 0;
    }
    total_items / page_size + i64::from(total_items % page_size != 0)
}
