//! # backoffice-rs-pagination
//!
//! Pagination for list views:
//!
//! - [`control`] - The pagination control: page ranges with ellipses,
//!   navigation guards, visibility, and the "showing X-Y of Z" summary
//! - [`meta`] - Pagination metadata returned by (or synthesized for) list endpoints
//! - [`paginator`] - Slicing already-loaded rows into pages

pub mod control;
pub mod meta;
pub mod paginator;

pub use control::{page_range, ItemsInfo, PageItem, PaginationControl};
pub use meta::PaginationMeta;
pub use paginator::{Page, PageError, Paginator};
