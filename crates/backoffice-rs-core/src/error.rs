//! Core error types for backoffice-rs.
//!
//! [`BackofficeError`] covers configuration errors, programmer contract
//! errors caught at configuration time (duplicate field names, duplicate or
//! empty column keys), API and transport failures, and validation failures.
//! Per-field validation messages are carried by [`ValidationError`].

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Per-field error messages keyed by field name.
///
/// A `BTreeMap` keeps iteration (and therefore rendering and `Display`)
/// deterministic.
pub type FieldErrors = BTreeMap<String, String>;

/// A set of per-field validation failures.
///
/// # Examples
///
/// ```
/// use backoffice_rs_core::error::ValidationError;
///
/// let err = ValidationError::single("amount", "Amount is required");
/// assert_eq!(err.to_string(), "amount: Amount is required");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    /// Error message per failing field.
    pub field_errors: FieldErrors,
}

impl ValidationError {
    /// Wraps an existing error map.
    pub const fn new(field_errors: FieldErrors) -> Self {
        Self { field_errors }
    }

    /// Creates an error for a single field.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut field_errors = FieldErrors::new();
        field_errors.insert(field.into(), message.into());
        Self { field_errors }
    }

    /// Returns `true` if no field failed.
    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.field_errors {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// The primary error type for backoffice-rs.
#[derive(Error, Debug)]
pub enum BackofficeError {
    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A component was given an inconsistent configuration.
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),

    // ── Contract errors ──────────────────────────────────────────────

    /// Two form fields share the same name.
    #[error("Duplicate field name: {0}")]
    DuplicateField(String),

    /// Two table columns share the same key.
    #[error("Duplicate column key: {0}")]
    DuplicateColumn(String),

    /// A field, column, or tab was declared with an empty key.
    #[error("Empty key in {0}")]
    EmptyKey(String),

    // ── API ──────────────────────────────────────────────────────────

    /// The backend answered with an error envelope, or a request failed
    /// and was normalized to a user-facing message.
    #[error("{message}")]
    Api {
        /// The message to show in a transient notification.
        message: String,
    },

    /// The transport could not complete the request.
    #[error("Transport error: {0}")]
    Transport(String),

    // ── Validation ───────────────────────────────────────────────────

    /// One or more fields failed validation.
    #[error("Validation error: {0}")]
    ValidationError(ValidationError),

    // ── Serialization / IO ───────────────────────────────────────────

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl BackofficeError {
    /// Creates an [`BackofficeError::Api`] error.
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Returns the message shown to the user in an inline notification.
    ///
    /// API errors surface their message verbatim; everything else uses the
    /// full `Display` text.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Returns `true` for errors that come from misconfiguring a component
    /// rather than from user input or the network.
    pub const fn is_contract_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateField(_)
                | Self::DuplicateColumn(_)
                | Self::EmptyKey(_)
                | Self::ImproperlyConfigured(_)
        )
    }
}

impl From<serde_json::Error> for BackofficeError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<ValidationError> for BackofficeError {
    fn from(err: ValidationError) -> Self {
        Self::ValidationError(err)
    }
}

/// A convenience type alias for `Result<T, BackofficeError>`.
pub type BackofficeResult<T> = Result<T, BackofficeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display_ordered() {
        let mut errors = FieldErrors::new();
        errors.insert("email".into(), "Please enter a valid email address".into());
        errors.insert("amount".into(), "Amount is required".into());
        let err = ValidationError::new(errors);
        assert_eq!(
            err.to_string(),
            "amount: Amount is required; email: Please enter a valid email address"
        );
    }

    #[test]
    fn test_api_user_message_is_verbatim() {
        let err = BackofficeError::api("Failed to fetch expenses");
        assert_eq!(err.user_message(), "Failed to fetch expenses");
        assert_eq!(err.to_string(), "Failed to fetch expenses");
    }

    #[test]
    fn test_contract_errors() {
        assert!(BackofficeError::DuplicateField("x".into()).is_contract_error());
        assert!(BackofficeError::EmptyKey("column".into()).is_contract_error());
        assert!(!BackofficeError::api("x").is_contract_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: BackofficeError = io_err.into();
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: BackofficeError = json_err.into();
        assert!(matches!(err, BackofficeError::SerializationError(_)));
    }
}
