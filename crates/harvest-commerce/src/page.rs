//! Pagination envelope and page bookkeeping.

use serde::{Deserialize, Serialize};

/// Products per page on the list endpoints.
pub const PRODUCT_PAGE_SIZE: i64 = 8;
/// A customer's own orders per page.
pub const ORDER_PAGE_SIZE: i64 = 5;
/// Orders per page on the admin all-orders view.
pub const ADMIN_ORDER_PAGE_SIZE: i64 = 10;

/// The backend's paginated list envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    /// Total items across all pages.
    pub count: i64,
    /// Absolute URL of the next page, if any.
    pub next: Option<String>,
    /// Absolute URL of the previous page, if any.
    pub previous: Option<String>,
    /// This page's items.
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Check if this page has no items.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Whether the backend reports a following page.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Whether the backend reports a preceding page.
    pub fn has_prev(&self) -> bool {
        self.previous.is_some()
    }

    /// Page bookkeeping for a known page number and size.
    pub fn pager(&self, page: i64, per_page: i64) -> Pager {
        Pager::new(page, per_page, self.count)
    }
}

/// Derived page arithmetic for the numbered page strip.
///
/// Computed from the envelope's `count` plus the page size the endpoint is
/// known to use; the backend sends no page index of its own.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pager {
    /// Current page (1-indexed).
    pub page: i64,
    /// Items per page.
    pub per_page: i64,
    /// Total number of items.
    pub total: i64,
    /// Total number of pages, never less than 1.
    pub total_pages: i64,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pager {
    /// Create page bookkeeping.
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        let total_pages = if total == 0 {
            1
        } else {
            (total + per_page - 1) / per_page
        };

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Get page numbers for display (e.g., [3, 4, 5, 6, 7]).
    pub fn page_numbers(&self, max_visible: usize) -> Vec<i64> {
        if self.total_pages as usize <= max_visible {
            return (1..=self.total_pages).collect();
        }

        let half = max_visible / 2;
        let start = (self.page - half as i64).max(1);
        let end = (start + max_visible as i64 - 1).min(self.total_pages);
        let start = (end - max_visible as i64 + 1).max(1);

        (start..=end).collect()
    }

    /// Check if on first page.
    pub fn is_first(&self) -> bool {
        self.page == 1
    }

    /// Check if on last page.
    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }

    /// Get start item number (1-indexed).
    pub fn start_item(&self) -> i64 {
        if self.total == 0 {
            0
        } else {
            (self.page - 1) * self.per_page + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> i64 {
        (self.page * self.per_page).min(self.total)
    }
}
