//! # backoffice-rs-core
//!
//! Core types shared by every backoffice-rs crate. This crate has no
//! dependency on the other workspace members.
//!
//! ## Modules
//!
//! - [`value`] - The loosely-typed [`Value`] carried by filters, form fields, and table cells
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Injected dashboard configuration (locale, palettes, navigation)
//! - [`settings_loader`] - Loading [`Settings`] from TOML/JSON files and the environment
//! - [`locale`] - Locale-aware currency and date formatting
//! - [`html`] - HTML escaping for rendered forms and tables
//! - [`nav`] - Navigation items and active-route resolution
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod html;
pub mod locale;
pub mod logging;
pub mod nav;
pub mod settings;
pub mod settings_loader;
pub mod value;

// Re-export the most commonly used types at the crate root.
pub use error::{BackofficeError, BackofficeResult, FieldErrors, ValidationError};
pub use settings::{BadgeStyle, Settings};
pub use value::Value;
