//! Dashboard settings.
//!
//! [`Settings`] carries everything the reusable components would otherwise
//! read from module-level constants: the locale and currency used by cell
//! renderers, pagination defaults, the badge colour palettes for status and
//! category columns, and the navigation tree. It is built once at startup
//! (see [`settings_loader`](crate::settings_loader)) and passed to the
//! components that need it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{BackofficeError, BackofficeResult};
use crate::locale::is_valid_date_pattern;
use crate::nav::NavItem;

/// Style and display label for one badge value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeStyle {
    /// A style token (CSS class, colour name) understood by the renderer.
    pub style: String,
    /// The label shown inside the badge.
    pub label: String,
}

impl BadgeStyle {
    /// Creates a badge style.
    pub fn new(style: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            style: style.into(),
            label: label.into(),
        }
    }
}

/// The complete set of dashboard settings.
///
/// # Examples
///
/// ```
/// use backoffice_rs_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(settings.locale, "en-US");
/// assert_eq!(settings.items_per_page, 10);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled (pretty logs instead of JSON).
    pub debug: bool,
    /// The log level filter (e.g. "info", "debug", "backoffice_rs_forms=trace").
    pub log_level: String,

    // ── Locale ───────────────────────────────────────────────────────

    /// BCP 47 locale tag used for number and date formatting (e.g. "en-US").
    pub locale: String,
    /// ISO 4217 currency code for currency cells (e.g. "USD").
    pub currency: String,
    /// Overrides the locale's date pattern (chrono `strftime` syntax).
    pub date_format: Option<String>,

    // ── Lists ────────────────────────────────────────────────────────

    /// Default number of rows per page.
    pub items_per_page: usize,
    /// Pages shown on each side of the current page.
    pub sibling_count: usize,
    /// Pages always shown at the start and end of the range.
    pub boundary_count: usize,

    // ── Drawers ──────────────────────────────────────────────────────

    /// Viewport width (px) below which drawers open as a bottom sheet.
    pub drawer_breakpoint: u32,

    // ── API ──────────────────────────────────────────────────────────

    /// Base URL prepended to resource paths.
    pub api_base_url: String,

    // ── Vocabulary ───────────────────────────────────────────────────

    /// Badge palettes keyed by palette name, then by raw cell value.
    pub badge_palettes: HashMap<String, HashMap<String, BadgeStyle>>,
    /// The sidebar navigation tree.
    pub nav_items: Vec<NavItem>,

    // ── Escape hatch ─────────────────────────────────────────────────

    /// Custom settings that don't fit into the above categories.
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            log_level: "info".to_string(),

            locale: "en-US".to_string(),
            currency: "USD".to_string(),
            date_format: None,

            items_per_page: 10,
            sibling_count: 1,
            boundary_count: 1,

            drawer_breakpoint: 768,

            api_base_url: "/api".to_string(),

            badge_palettes: HashMap::new(),
            nav_items: Vec::new(),

            extra: HashMap::new(),
        }
    }
}

impl Settings {
    /// Checks values that cannot be validated by deserialization alone.
    ///
    /// # Errors
    ///
    /// Returns [`BackofficeError::ConfigurationError`] if `date_format` is
    /// not a usable `strftime` date pattern.
    pub fn validate(&self) -> BackofficeResult<()> {
        if let Some(pattern) = &self.date_format {
            if !is_valid_date_pattern(pattern) {
                return Err(BackofficeError::ConfigurationError(format!(
                    "Invalid date_format '{pattern}'"
                )));
            }
        }
        Ok(())
    }

    /// Returns the named badge palette, if configured.
    pub fn palette(&self, name: &str) -> Option<&HashMap<String, BadgeStyle>> {
        self.badge_palettes.get(name)
    }

    /// Adds or replaces a badge palette.
    #[must_use]
    pub fn with_palette<I, K>(mut self, name: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, BadgeStyle)>,
        K: Into<String>,
    {
        let palette = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        self.badge_palettes.insert(name.into(), palette);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let s = Settings::default();
        assert!(s.debug);
        assert_eq!(s.log_level, "info");
        assert_eq!(s.locale, "en-US");
        assert_eq!(s.currency, "USD");
        assert!(s.date_format.is_none());
        assert_eq!(s.items_per_page, 10);
        assert_eq!(s.sibling_count, 1);
        assert_eq!(s.boundary_count, 1);
        assert_eq!(s.drawer_breakpoint, 768);
        assert!(s.badge_palettes.is_empty());
        assert!(s.nav_items.is_empty());
    }

    #[test]
    fn test_validate_date_format() {
        let mut s = Settings::default();
        assert!(s.validate().is_ok());
        s.date_format = Some("%d.%m.%Y".to_string());
        assert!(s.validate().is_ok());
        s.date_format = Some("%Q".to_string());
        assert!(matches!(
            s.validate(),
            Err(BackofficeError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_with_palette() {
        let s = Settings::default().with_palette(
            "expense_status",
            [
                ("pending", BadgeStyle::new("warning", "Pending")),
                ("approved", BadgeStyle::new("success", "Approved")),
            ],
        );
        let palette = s.palette("expense_status").unwrap();
        assert_eq!(palette.len(), 2);
        assert_eq!(palette["approved"].label, "Approved");
        assert!(s.palette("lead_stage").is_none());
    }
}
