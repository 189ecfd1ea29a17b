//! # backoffice-rs-forms
//!
//! A declarative form engine. Callers describe fields with
//! [`FieldDescriptor`]s; the [`FormEngine`] owns values, errors, and touched
//! state, validates on change, blur, or submit, and drives an async
//! [`SubmitHandler`].
//!
//! ## Modules
//!
//! - [`fields`] - Field types and descriptors
//! - [`validation`] - Per-field validation in fixed order
//! - [`form`] - The form engine and submission lifecycle
//! - [`widgets`] - HTML rendering of field widgets
//!
//! ## Quick Start
//!
//! ```
//! use backoffice_rs_forms::{FieldDescriptor, FieldType, FormConfig, FormEngine, InputEvent};
//!
//! let mut form = FormEngine::new(
//!     vec![FieldDescriptor::new("amount", FieldType::Number).required(true)],
//!     FormConfig::default(),
//! )
//! .unwrap();
//!
//! form.handle_field_change("amount", &InputEvent::value("abc"));
//! assert_eq!(form.visible_error("amount"), Some("Please enter a valid number"));
//! ```

pub mod fields;
pub mod form;
pub mod validation;
pub mod widgets;

pub use fields::{FieldDescriptor, FieldType, FieldValidator, FormValues, SelectOption};
pub use form::{
    FormConfig, FormEngine, FormError, FormErrors, FormLayout, InputEvent, SubmitError,
    SubmitHandler,
};
pub use validation::validate_field;
