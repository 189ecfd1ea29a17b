//! Pagination metadata for list endpoints.
//!
//! List endpoints either return `{ page, limit, total, totalPages, hasNext,
//! hasPrev }` alongside their rows, or return only the rows. In the second
//! case [`PaginationMeta::synthesize`] guesses the metadata from the number
//! of rows returned. The guess assumes a full page means there is another
//! one, so it reports a spurious next page when the last page happens to be
//! exactly full, and it never knows the true total.

use serde::{Deserialize, Serialize};

use crate::control::PaginationControl;

/// Pagination metadata for one page of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// The 1-based page number.
    pub page: usize,
    /// The requested page size.
    pub limit: usize,
    /// Total number of items across all pages.
    pub total: usize,
    /// Total number of pages.
    pub total_pages: usize,
    /// Whether a next page exists.
    pub has_next: bool,
    /// Whether a previous page exists.
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Builds exact metadata from a known total.
    ///
    /// # Examples
    ///
    /// ```
    /// use backoffice_rs_pagination::PaginationMeta;
    ///
    /// let meta = PaginationMeta::from_total(2, 10, 35);
    /// assert_eq!(meta.total_pages, 4);
    /// assert!(meta.has_next && meta.has_prev);
    /// ```
    pub fn from_total(page: usize, limit: usize, total: usize) -> Self {
        let page = page.max(1);
        let total_pages = if limit == 0 { 0 } else { total.div_ceil(limit) };
        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Guesses metadata when the endpoint returned only `returned` rows.
    ///
    /// `has_next` is `returned == limit`; the total is the number of rows
    /// seen up to and including this page, and the page count includes one
    /// extra page whenever `has_next` is set.
    pub fn synthesize(page: usize, limit: usize, returned: usize) -> Self {
        let page = page.max(1);
        let has_next = limit > 0 && returned == limit;
        let total = (page - 1) * limit + returned;
        let total_pages = if total == 0 && !has_next {
            0
        } else {
            page + usize::from(has_next)
        };
        tracing::debug!(page, limit, returned, has_next, "synthesized pagination metadata");
        Self {
            page,
            limit,
            total,
            total_pages,
            has_next,
            has_prev: page > 1,
        }
    }

    /// Creates a pagination control for this page.
    pub const fn to_control(&self) -> PaginationControl {
        PaginationControl::new(self.page)
            .total_pages(self.total_pages)
            .total_items(self.total)
            .items_per_page(self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_total_first_and_last() {
        let first = PaginationMeta::from_total(1, 10, 25);
        assert_eq!(first.total_pages, 3);
        assert!(first.has_next);
        assert!(!first.has_prev);

        let last = PaginationMeta::from_total(3, 10, 25);
        assert!(!last.has_next);
        assert!(last.has_prev);
    }

    #[test]
    fn test_from_total_empty() {
        let meta = PaginationMeta::from_total(1, 10, 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next);
    }

    #[test]
    fn test_synthesize_full_page_assumes_more() {
        let meta = PaginationMeta::synthesize(2, 10, 10);
        assert!(meta.has_next);
        assert!(meta.has_prev);
        assert_eq!(meta.total, 20);
        assert_eq!(meta.total_pages, 3);
    }

    #[test]
    fn test_synthesize_short_page_is_last() {
        let meta = PaginationMeta::synthesize(3, 10, 4);
        assert!(!meta.has_next);
        assert_eq!(meta.total, 24);
        assert_eq!(meta.total_pages, 3);
    }

    #[test]
    fn test_synthesize_empty() {
        let meta = PaginationMeta::synthesize(1, 10, 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next);
    }

    #[test]
    fn test_camel_case_wire_format() {
        let json = r#"{"page":2,"limit":20,"total":45,"totalPages":3,"hasNext":true,"hasPrev":true}"#;
        let meta: PaginationMeta = serde_json::from_str(json).unwrap();
        assert_eq!(meta, PaginationMeta::from_total(2, 20, 45));
        assert_eq!(serde_json::to_string(&meta).unwrap(), json);
    }

    #[test]
    fn test_to_control() {
        let control = PaginationMeta::from_total(2, 10, 35).to_control();
        assert_eq!(control.get_total_pages(), 4);
        assert_eq!(control.items_info().unwrap().end_item, 20);
    }
}
