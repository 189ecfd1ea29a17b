//! Paging rows that are already loaded.
//!
//! Some lists are fetched in full and paginated in memory. [`Paginator`]
//! slices such a list into [`Page`]s that carry the same
//! [`PaginationMeta`] a server-paginated endpoint would return, so the
//! table and pagination control do not care where the rows came from.
//!
//! # Examples
//!
//! ```
//! use backoffice_rs_pagination::Paginator;
//!
//! let rows: Vec<u32> = (1..=95).collect();
//! let paginator = Paginator::new(&rows, 10);
//! assert_eq!(paginator.num_pages(), 10);
//!
//! let page = paginator.get_page(10);
//! assert_eq!(page.rows(), &[91, 92, 93, 94, 95]);
//! assert!(!page.has_next());
//! ```

use thiserror::Error;

use crate::meta::PaginationMeta;

/// Errors returned by [`Paginator::page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageError {
    /// Page numbers start at 1.
    #[error("Page number must be at least 1")]
    InvalidPage,
    /// The page lies past the last page.
    #[error("Page {0} contains no results")]
    EmptyPage(usize),
}

/// Splits a borrowed slice of rows into pages.
#[derive(Debug, Clone, Copy)]
pub struct Paginator<'a, T> {
    rows: &'a [T],
    per_page: usize,
}

impl<'a, T> Paginator<'a, T> {
    /// Creates a paginator. A page size of 0 is treated as 1.
    pub fn new(rows: &'a [T], per_page: usize) -> Self {
        Self {
            rows,
            per_page: per_page.max(1),
        }
    }

    /// Returns the total number of rows.
    pub const fn count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the page size.
    pub const fn per_page(&self) -> usize {
        self.per_page
    }

    /// Returns the number of pages; 0 for an empty list.
    pub const fn num_pages(&self) -> usize {
        self.rows.len().div_ceil(self.per_page)
    }

    /// Returns page `number` (1-based).
    pub fn page(&self, number: usize) -> Result<Page<'a, T>, PageError> {
        if number == 0 {
            return Err(PageError::InvalidPage);
        }
        if number > self.num_pages() {
            return Err(PageError::EmptyPage(number));
        }
        let start = (number - 1) * self.per_page;
        let end = (start + self.per_page).min(self.count());
        Ok(self.make_page(number, start..end))
    }

    /// Returns page `number`, clamped to the valid range.
    ///
    /// Page 0 yields the first page; numbers past the end yield the last
    /// page. An empty list yields an empty page 1.
    pub fn get_page(&self, number: usize) -> Page<'a, T> {
        let last = self.num_pages().max(1);
        let number = number.clamp(1, last);
        self.page(number)
            .unwrap_or_else(|_| self.make_page(number, 0..0))
    }

    fn make_page(&self, number: usize, range: std::ops::Range<usize>) -> Page<'a, T> {
        Page {
            rows: &self.rows[range],
            meta: PaginationMeta::from_total(number, self.per_page, self.count()),
        }
    }
}

/// One page of rows from a [`Paginator`].
#[derive(Debug, Clone, Copy)]
pub struct Page<'a, T> {
    rows: &'a [T],
    meta: PaginationMeta,
}

impl<'a, T> Page<'a, T> {
    /// Returns the rows on this page.
    pub const fn rows(&self) -> &'a [T] {
        self.rows
    }

    /// Returns the 1-based page number.
    pub const fn number(&self) -> usize {
        self.meta.page
    }

    /// Returns the metadata for this page.
    pub const fn meta(&self) -> PaginationMeta {
        self.meta
    }

    pub const fn has_next(&self) -> bool {
        self.meta.has_next
    }

    pub const fn has_previous(&self) -> bool {
        self.meta.has_prev
    }

    /// Returns the 1-based index of the first row on this page, or 0 when empty.
    pub const fn start_index(&self) -> usize {
        if self.rows.is_empty() {
            return 0;
        }
        (self.meta.page - 1) * self.meta.limit + 1
    }

    /// Returns the 1-based index of the last row on this page, or 0 when empty.
    pub const fn end_index(&self) -> usize {
        if self.rows.is_empty() {
            return 0;
        }
        self.start_index() + self.rows.len() - 1
    }
}
