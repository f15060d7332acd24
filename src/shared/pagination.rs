/**
 * Pagination Helpers
 *
 * Shared pagination arithmetic and the paginated response envelope used by
 * every list endpoint.
 *
 * # Bounds Policy
 *
 * - `page < 1` is clamped to 1
 * - `page_size < 1` falls back to 20
 * - the effective window is `[(page - 1) * page_size, min(total, start + page_size))`
 * - a start index at or beyond `total` yields an empty page while still
 *   reporting the true `total_count`
 */
use serde::{Deserialize, Serialize};

/// Page size applied when the caller passes none (or zero).
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Pagination parameters as they arrive from a query string.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl PageParams {
    /// Normalize to an effective (page, page_size) pair.
    pub fn normalize(&self) -> (usize, usize) {
        let page = self.page.unwrap_or(1).max(1);
        let page_size = match self.page_size {
            Some(size) if size >= 1 => size,
            _ => DEFAULT_PAGE_SIZE,
        };
        (page, page_size)
    }
}

/// A single page of results plus the total count across all pages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
}

/// Slice `items` according to the bounds policy.
///
/// Consumes the full result set and returns the requested window along
/// with the original total. The stores hold their locks while collecting
/// `items`, so this stays a pure function over an owned `Vec`.
pub fn paginate<T>(items: Vec<T>, params: PageParams) -> PaginatedResponse<T> {
    let (page, page_size) = params.normalize();
    let total = items.len();
    let start = (page - 1).saturating_mul(page_size).min(total);
    let end = start.saturating_add(page_size).min(total);

    let data = items.into_iter().skip(start).take(end - start).collect();

    PaginatedResponse {
        data,
        total_count: total,
        page,
        page_size,
    }
}
