//! # backoffice-rs-filters
//!
//! Filter state for list views. A [`FilterStateManager`] owns a fixed set of
//! filter keys, tracks which of them deviate from their initial values, and
//! notifies a change callback on every update. [`query`] turns the active
//! filters into API query parameters, and [`matching`] applies them to rows
//! that are already loaded.

pub mod matching;
pub mod query;
pub mod state;

pub use matching::RowMatcher;
pub use state::{is_active_value, FilterState, FilterStateManager};
