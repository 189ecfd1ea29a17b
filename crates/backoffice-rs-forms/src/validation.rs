//! Per-field validation.
//!
//! [`validate_field`] runs its checks in a fixed order and stops at the
//! first failure:
//!
//! 1. Required: a missing value fails with "`<label>` is required".
//! 2. An empty optional field is valid; nothing else runs.
//! 3. Format: email pattern, parseable URL, finite number (then `min`/`max`).
//! 4. The field's custom validator, which also sees every other value.

use once_cell::sync::Lazy;
use regex::Regex;

use backoffice_rs_core::Value;

use crate::fields::{FieldDescriptor, FieldType, FormValues};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$")
        .unwrap_or_else(|e| unreachable!("email pattern is valid: {e}"))
});

pub const INVALID_EMAIL: &str = "Please enter a valid email address";
pub const INVALID_URL: &str = "Please enter a valid URL";
pub const INVALID_NUMBER: &str = "Please enter a valid number";

/// Validates one value against its field descriptor.
///
/// Returns the error message, or `None` if the value is valid.
///
/// # Examples
///
/// ```
/// use backoffice_rs_core::Value;
/// use backoffice_rs_forms::{validate_field, FieldDescriptor, FieldType, FormValues};
///
/// let email = FieldDescriptor::new("email", FieldType::Email);
/// let values = FormValues::new();
/// assert_eq!(validate_field(&email, &Value::from("user@example.com"), &values), None);
/// assert_eq!(validate_field(&email, &Value::from(""), &values), None);
/// assert!(validate_field(&email, &Value::from("not-an-email"), &values).is_some());
/// ```
pub fn validate_field(field: &FieldDescriptor, value: &Value, values: &FormValues) -> Option<String> {
    if is_missing(field, value) {
        if field.required {
            return Some(format!("{} is required", field.display_label()));
        }
        return None;
    }

    if let Some(message) = check_format(field, value) {
        return Some(message);
    }

    field.validate.as_ref().and_then(|validator| validator(value, values))
}

/// Returns `true` if `value` counts as "no value" for `field`.
///
/// An unchecked checkbox counts as missing, so a required checkbox must be
/// ticked.
fn is_missing(field: &FieldDescriptor, value: &Value) -> bool {
    value.is_blank() || (field.field_type == FieldType::Checkbox && value.as_bool() == Some(false))
}

fn check_format(field: &FieldDescriptor, value: &Value) -> Option<String> {
    match field.field_type {
        FieldType::Email => {
            let text = value.to_string();
            (!EMAIL_RE.is_match(&text)).then(|| INVALID_EMAIL.to_string())
        }
        // The value is submitted as typed, so surrounding whitespace is
        // rejected rather than trimmed away.
        FieldType::Url => {
            let text = value.to_string();
            (text.trim() != text || url::Url::parse(&text).is_err()).then(|| INVALID_URL.to_string())
        }
        FieldType::Number => match value.as_f64() {
            Some(n) if n.is_finite() => check_bounds(field, n),
            _ => Some(INVALID_NUMBER.to_string()),
        },
        _ => None,
    }
}

fn check_bounds(field: &FieldDescriptor, n: f64) -> Option<String> {
    if let Some(min) = field.min {
        if n < min {
            return Some(format!("Must be at least {min}"));
        }
    }
    if let Some(max) = field.max {
        if n > max {
            return Some(format!("Must be at most {max}"));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(field: &FieldDescriptor, value: impl Into<Value>) -> Option<String> {
        validate_field(field, &value.into(), &FormValues::new())
    }

    // ── Required ────────────────────────────────────────────────────

    #[test]
    fn test_required_uses_label() {
        let field = FieldDescriptor::new("amount", FieldType::Number).required(true);
        assert_eq!(check(&field, ""), Some("Amount is required".to_string()));
        assert_eq!(check(&field, Value::Null), Some("Amount is required".to_string()));

        let labelled = field.label("Claim amount");
        assert_eq!(check(&labelled, ""), Some("Claim amount is required".to_string()));
    }

    #[test]
    fn test_required_checkbox_must_be_checked() {
        let field = FieldDescriptor::new("accept_terms", FieldType::Checkbox).required(true);
        assert_eq!(check(&field, false), Some("Accept terms is required".to_string()));
        assert_eq!(check(&field, true), None);
    }

    #[test]
    fn test_required_multi_select_needs_an_item() {
        let field = FieldDescriptor::new("departments", FieldType::Select)
            .multiple(true)
            .required(true);
        assert!(check(&field, Value::List(Vec::new())).is_some());
        assert_eq!(check(&field, vec!["hr"]), None);
    }

    #[test]
    fn test_optional_empty_skips_everything() {
        let field = FieldDescriptor::new("website", FieldType::Url)
            .validate(|_, _| Some("never".to_string()));
        assert_eq!(check(&field, ""), None);
        assert_eq!(check(&field, Value::Null), None);
    }

    // ── Formats ─────────────────────────────────────────────────────

    #[test]
    fn test_email() {
        let field = FieldDescriptor::new("email", FieldType::Email);
        assert_eq!(check(&field, "user@example.com"), None);
        assert_eq!(check(&field, "not-an-email"), Some(INVALID_EMAIL.to_string()));
        assert_eq!(check(&field, "a@b"), Some(INVALID_EMAIL.to_string()));
    }

    #[test]
    fn test_url() {
        let field = FieldDescriptor::new("website", FieldType::Url);
        assert_eq!(check(&field, "https://example.com/path?q=1"), None);
        assert_eq!(check(&field, "example.com"), Some(INVALID_URL.to_string()));
    }

    #[test]
    fn test_surrounding_whitespace_is_invalid() {
        let email = FieldDescriptor::new("email", FieldType::Email);
        assert_eq!(check(&email, " user@example.com "), Some(INVALID_EMAIL.to_string()));
        assert_eq!(check(&email, "user@example.com\n"), Some(INVALID_EMAIL.to_string()));

        let website = FieldDescriptor::new("website", FieldType::Url);
        assert_eq!(check(&website, " https://example.com"), Some(INVALID_URL.to_string()));
    }

    #[test]
    fn test_number() {
        let field = FieldDescriptor::new("amount", FieldType::Number);
        assert_eq!(check(&field, "12.5"), None);
        assert_eq!(check(&field, 3_i64), None);
        assert_eq!(check(&field, "abc"), Some(INVALID_NUMBER.to_string()));
        assert_eq!(check(&field, "inf"), Some(INVALID_NUMBER.to_string()));
        assert_eq!(check(&field, "NaN"), Some(INVALID_NUMBER.to_string()));
    }

    #[test]
    fn test_number_bounds() {
        let field = FieldDescriptor::new("days", FieldType::Number).min(1.0).max(30.0);
        assert_eq!(check(&field, "0"), Some("Must be at least 1".to_string()));
        assert_eq!(check(&field, "31"), Some("Must be at most 30".to_string()));
        assert_eq!(check(&field, "15"), None);
    }

    #[test]
    fn test_text_has_no_format_check() {
        let field = FieldDescriptor::new("name", FieldType::Text);
        assert_eq!(check(&field, "anything at all"), None);
    }

    // ── Custom ──────────────────────────────────────────────────────

    #[test]
    fn test_custom_sees_other_values() {
        let field = FieldDescriptor::new("to_date", FieldType::Date).validate(|value, values| {
            let from = values.get("from_date").map(ToString::to_string)?;
            (value.to_string() < from).then(|| "End date must be after start date".to_string())
        });
        let mut values = FormValues::new();
        values.insert("from_date".into(), Value::from("2024-05-10"));

        assert_eq!(
            validate_field(&field, &Value::from("2024-05-01"), &values),
            Some("End date must be after start date".to_string())
        );
        assert_eq!(validate_field(&field, &Value::from("2024-05-20"), &values), None);
    }

    #[test]
    fn test_format_failure_wins_over_custom() {
        let field = FieldDescriptor::new("email", FieldType::Email)
            .validate(|_, _| Some("custom".to_string()));
        assert_eq!(check(&field, "bad"), Some(INVALID_EMAIL.to_string()));
        assert_eq!(check(&field, "ok@example.com"), Some("custom".to_string()));
    }
}
