//! Offset pagination helpers for list endpoints.

use serde::Serialize;

/// Default page size when the client does not specify one.
pub const DEFAULT_PER_PAGE: i64 = 25;

/// Hard ceiling on page size.
pub const MAX_PER_PAGE: i64 = 100;

/// Normalizes a requested page number (1-based).
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Normalizes a requested page size against the configured ceiling.
pub fn clamp_per_page(per_page: Option<i64>) -> i64 {
    per_page
        .unwrap_or(DEFAULT_PER_PAGE)
        .clamp(1, MAX_PER_PAGE)
}

/// Computes the SQL offset for a (page, per_page) pair.
pub fn offset(page: i64, per_page: i64) -> i64 {
    (page - 1) * per_page
}

/// Pagination envelope included in list responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    /// Builds a pagination envelope from the request parameters and total row count.
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            (total + per_page - 1) / per_page
        };
        Self {
            page,
            per_page,
            total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_page_defaults_to_first() {
        assert_eq!(clamp_page(None), 1);
        assert_eq!(clamp_page(Some(0)), 1);
        assert_eq!(clamp_page(Some(-3)), 1);
        assert_eq!(clamp_page(Some(7)), 7);
    }

    #[test]
    fn test_clamp_per_page_bounds() {
        assert_eq!(clamp_per_page(None), DEFAULT_PER_PAGE);
        assert_eq!(clamp_per_page(Some(0)), 1);
        assert_eq!(clamp_per_page(Some(10_000)), MAX_PER_PAGE);
        assert_eq!(clamp_per_page(Some(50)), 50);
    }

    #[test]
    fn test_offset() {
        assert_eq!(offset(1, 25), 0);
        assert_eq!(offset(2, 25), 25);
        assert_eq!(offset(4, 10), 30);
    }

    #[test]
    fn test_pagination_total_pages() {
        assert_eq!(Pagination::new(1, 25, 0).total_pages, 0);
        assert_eq!(Pagination::new(1, 25, 1).total_pages, 1);
        assert_eq!(Pagination::new(1, 25, 25).total_pages, 1);
        assert_eq!(Pagination::new(1, 25, 26).total_pages, 2);
        assert_eq!(Pagination::new(1, 10, 95).total_pages, 10);
    }
}
