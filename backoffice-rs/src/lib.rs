//! # backoffice-rs
//!
//! Building blocks for the list pages of an HR, sales, and finance
//! back office: filter state, paginated tables with badges and detail
//! drawers, declarative forms, and the REST envelopes that feed them.
//!
//! This is the meta-crate that re-exports all sub-crates. Depend on it to
//! get everything, or on individual crates for finer-grained control.

/// Shared value type, settings, locale formatting, and error types.
pub use backoffice_rs_core as core;

/// Filter state management and query encoding.
pub use backoffice_rs_filters as filters;

/// Pagination control, page ranges, and list metadata.
pub use backoffice_rs_pagination as pagination;

/// Declarative forms: field schemas, validation, submission, widgets.
#[cfg(feature = "forms")]
pub use backoffice_rs_forms as forms;

/// Column-configured tables and detail drawers.
#[cfg(feature = "table")]
pub use backoffice_rs_table as table;

/// REST envelopes and the resource client.
#[cfg(feature = "api")]
pub use backoffice_rs_api as api;

/// Convenient imports for building a list page.
pub mod prelude {
    pub use backoffice_rs_core::{BackofficeError, BackofficeResult, Settings, Value};
    pub use backoffice_rs_filters::{FilterState, FilterStateManager};
    pub use backoffice_rs_pagination::{PaginationControl, PaginationMeta};

    #[cfg(feature = "api")]
    pub use backoffice_rs_api::{ListQuery, ResourceClient, Transport};
    #[cfg(feature = "forms")]
    pub use backoffice_rs_forms::{FieldDescriptor, FieldType, FormConfig, FormEngine, SubmitHandler};
    #[cfg(feature = "table")]
    pub use backoffice_rs_table::{BadgeConfig, ColumnDescriptor, DetailDrawer, DrawerTab, DynamicTable};
}
