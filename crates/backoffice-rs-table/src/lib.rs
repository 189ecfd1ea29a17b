//! # backoffice-rs-table
//!
//! Column-configured tables and tabbed detail drawers over typed rows.
//!
//! ## Modules
//!
//! - [`column`] - Column descriptors and per-type cell rendering
//! - [`badge`] - Badge lookup tables for categorical values
//! - [`table`] - The controlled [`DynamicTable`] and its [`TableEvents`]
//! - [`drawer`] - Responsive [`DetailDrawer`]s with tabs and edit forms

pub mod badge;
pub mod column;
pub mod drawer;
pub mod table;

pub use badge::BadgeConfig;
pub use column::{Align, Cell, ColumnDescriptor, ColumnType};
pub use drawer::{DetailDrawer, DetailField, DrawerPlacement, DrawerTab};
pub use table::{DynamicTable, RowView, TableEvents};
