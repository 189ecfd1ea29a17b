//! Badge lookup tables for categorical cells.
//!
//! A [`BadgeConfig`] maps raw cell values (`"pending"`, `"approved"`) to a
//! style token and display label. Values with no entry fall back to the raw
//! value uppercased with the `default` style.

use std::collections::HashMap;

use backoffice_rs_core::{BackofficeError, BackofficeResult, BadgeStyle, Settings, Value};

/// The style used for values missing from a badge config.
pub const FALLBACK_STYLE: &str = "default";

/// Maps raw values to badge styles.
///
/// # Examples
///
/// ```
/// use backoffice_rs_core::Value;
/// use backoffice_rs_table::BadgeConfig;
///
/// let badges = BadgeConfig::new().entry("pending", "warning", "Pending");
/// assert_eq!(badges.resolve(&Value::from("pending")).label, "Pending");
/// assert_eq!(badges.resolve(&Value::from("on_hold")).label, "ON_HOLD");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BadgeConfig {
    entries: HashMap<String, BadgeStyle>,
}

impl BadgeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the style and label for one raw value.
    #[must_use]
    pub fn entry(
        mut self,
        raw: impl Into<String>,
        style: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        self.entries.insert(raw.into(), BadgeStyle::new(style, label));
        self
    }

    /// Builds a config from a palette in the injected settings.
    ///
    /// A missing palette is a configuration error.
    pub fn from_palette(settings: &Settings, name: &str) -> BackofficeResult<Self> {
        settings
            .palette(name)
            .map(|entries| Self {
                entries: entries.clone(),
            })
            .ok_or_else(|| {
                BackofficeError::ImproperlyConfigured(format!("unknown badge palette '{name}'"))
            })
    }

    /// Returns the style for `value`, or the uppercased fallback.
    pub fn resolve(&self, value: &Value) -> BadgeStyle {
        let raw = value.to_string();
        self.entries
            .get(&raw)
            .cloned()
            .unwrap_or_else(|| BadgeStyle::new(FALLBACK_STYLE, raw.to_uppercase()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings::default().with_palette(
            "expense_status",
            [
                ("pending", BadgeStyle::new("warning", "Pending")),
                ("approved", BadgeStyle::new("success", "Approved")),
            ],
        )
    }

    #[test]
    fn test_from_palette() {
        let badges = BadgeConfig::from_palette(&settings(), "expense_status").unwrap();
        assert_eq!(badges.len(), 2);
        assert_eq!(
            badges.resolve(&Value::from("approved")),
            BadgeStyle::new("success", "Approved")
        );
    }

    #[test]
    fn test_missing_palette_is_contract_error() {
        let err = BadgeConfig::from_palette(&settings(), "lead_stage").unwrap_err();
        assert!(err.is_contract_error());
    }

    #[test]
    fn test_fallback_uppercases_raw_value() {
        let badges = BadgeConfig::new();
        assert!(badges.is_empty());
        assert_eq!(
            badges.resolve(&Value::from("in review")),
            BadgeStyle::new(FALLBACK_STYLE, "IN REVIEW")
        );
        assert_eq!(badges.resolve(&Value::Int(3)).label, "3");
    }
}
