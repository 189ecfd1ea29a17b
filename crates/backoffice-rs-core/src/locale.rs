//! Locale-aware formatting for table cells and detail panels.
//!
//! Only the handful of conventions a back-office dashboard needs are covered:
//! digit grouping, decimal separators, currency symbol placement, and short
//! date patterns. The locale comes from [`Settings::locale`] and the currency
//! from [`Settings::currency`].

use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::settings::Settings;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grouping {
    Thousands,
    /// 12,34,567: the last three digits, then groups of two.
    Indian,
}

#[derive(Debug, Clone, Copy)]
struct NumberStyle {
    group: &'static str,
    decimal: char,
    grouping: Grouping,
    symbol_after: bool,
}

fn language(locale: &str) -> String {
    locale
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

fn number_style(locale: &str) -> NumberStyle {
    let normalized = locale.replace('_', "-").to_lowercase();
    if normalized == "en-in" || normalized == "hi-in" {
        return NumberStyle {
            group: ",",
            decimal: '.',
            grouping: Grouping::Indian,
            symbol_after: false,
        };
    }
    match language(locale).as_str() {
        "de" | "es" | "it" | "pt" | "nl" => NumberStyle {
            group: ".",
            decimal: ',',
            grouping: Grouping::Thousands,
            symbol_after: true,
        },
        "fr" => NumberStyle {
            group: " ",
            decimal: ',',
            grouping: Grouping::Thousands,
            symbol_after: true,
        },
        _ => NumberStyle {
            group: ",",
            decimal: '.',
            grouping: Grouping::Thousands,
            symbol_after: false,
        },
    }
}

fn group_digits(digits: &str, style: &NumberStyle) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let len = chars.len();
    let mut result = String::with_capacity(len + len / 2);

    for (i, ch) in chars.iter().enumerate() {
        let remaining = len - i;
        let boundary = match style.grouping {
            Grouping::Thousands => i > 0 && remaining % 3 == 0,
            Grouping::Indian => i > 0 && remaining >= 3 && (remaining == 3 || (remaining - 3) % 2 == 0),
        };
        if boundary {
            result.push_str(style.group);
        }
        result.push(*ch);
    }
    result
}

/// Returns the display symbol for an ISO 4217 currency code.
pub fn currency_symbol(code: &str) -> Option<&'static str> {
    match code.to_uppercase().as_str() {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "INR" => Some("₹"),
        "JPY" | "CNY" => Some("¥"),
        _ => None,
    }
}

/// Formats a number with the locale's grouping and decimal separator.
///
/// # Examples
///
/// ```
/// use backoffice_rs_core::locale::format_number;
///
/// assert_eq!(format_number(1234567.891, 2, "en-US"), "1,234,567.89");
/// assert_eq!(format_number(1234567.891, 2, "de-DE"), "1.234.567,89");
/// assert_eq!(format_number(1234567.0, 0, "en-IN"), "12,34,567");
/// ```
pub fn format_number(value: f64, decimals: usize, locale: &str) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let style = number_style(locale);
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut out = String::new();
    // -0.00 renders without a sign
    if value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&group_digits(int_part, &style));
    if !frac_part.is_empty() {
        out.push(style.decimal);
        out.push_str(frac_part);
    }
    out
}

/// Formats a monetary amount in the configured locale and currency.
///
/// Known currencies use their symbol (before the amount for English-style
/// locales, after it for continental ones); unknown codes are appended.
///
/// # Examples
///
/// ```
/// use backoffice_rs_core::locale::format_currency;
/// use backoffice_rs_core::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(format_currency(1234.5, &settings), "$1,234.50");
/// assert_eq!(format_currency(-20.0, &settings), "-$20.00");
/// ```
pub fn format_currency(amount: f64, settings: &Settings) -> String {
    let style = number_style(&settings.locale);
    let number = format_number(amount, 2, &settings.locale);

    match currency_symbol(&settings.currency) {
        Some(symbol) if !style.symbol_after => number.strip_prefix('-').map_or_else(
            || format!("{symbol}{number}"),
            |unsigned| format!("-{symbol}{unsigned}"),
        ),
        Some(symbol) => format!("{number}\u{a0}{symbol}"),
        None => format!("{number} {}", settings.currency.to_uppercase()),
    }
}

/// Returns the `strftime` pattern used for dates in the configured locale.
pub fn date_pattern(settings: &Settings) -> String {
    if let Some(pattern) = &settings.date_format {
        return pattern.clone();
    }
    let normalized = settings.locale.replace('_', "-").to_lowercase();
    let pattern = match normalized.as_str() {
        "en-us" => "%m/%d/%Y",
        "en-gb" | "en-in" | "en-au" => "%d/%m/%Y",
        _ => match language(&settings.locale).as_str() {
            "en" => "%m/%d/%Y",
            "fr" | "es" | "it" | "pt" => "%d/%m/%Y",
            "de" => "%d.%m.%Y",
            _ => "%Y-%m-%d",
        },
    };
    pattern.to_string()
}

const ISO_DATE: &str = "%Y-%m-%d";

/// Renders `date` with a `strftime` pattern, or `None` if the pattern is
/// malformed or asks for fields a date does not have (such as `%H`).
fn render_date(date: NaiveDate, pattern: &str) -> Option<String> {
    let items = StrftimeItems::new(pattern);
    if items.clone().any(|item| matches!(item, Item::Error)) {
        return None;
    }
    let mut out = String::new();
    write!(out, "{}", date.format_with_items(items)).ok()?;
    Some(out)
}

/// Returns `true` if `pattern` can render a calendar date.
///
/// # Examples
///
/// ```
/// use backoffice_rs_core::locale::is_valid_date_pattern;
///
/// assert!(is_valid_date_pattern("%d.%m.%Y"));
/// assert!(!is_valid_date_pattern("%Q"));
/// assert!(!is_valid_date_pattern("%H:%M"));
/// ```
pub fn is_valid_date_pattern(pattern: &str) -> bool {
    render_date(NaiveDate::MIN, pattern).is_some()
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, ISO_DATE)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Formats a date-like value as a locale date string.
///
/// Accepts [`Value::Date`], [`Value::DateTime`], and ISO-8601 strings.
/// Values that cannot be read as a date are returned unchanged. An unusable
/// `date_format` falls back to ISO-8601.
pub fn format_date(value: &Value, settings: &Settings) -> String {
    let date = match value {
        Value::Date(d) => Some(*d),
        Value::DateTime(dt) => Some(dt.date()),
        Value::String(s) => parse_date(s),
        _ => None,
    };
    let Some(date) = date else {
        return value.to_string();
    };
    let pattern = date_pattern(settings);
    render_date(date, &pattern).unwrap_or_else(|| {
        tracing::warn!(pattern = %pattern, "invalid date format, using ISO-8601");
        date.format(ISO_DATE).to_string()
    })
}

/// Uppercases the first character of a string.
///
/// # Examples
///
/// ```
/// use backoffice_rs_core::locale::capfirst;
///
/// assert_eq!(capfirst("hello"), "Hello");
/// assert_eq!(capfirst(""), "");
/// ```
pub fn capfirst(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |c| {
        let mut result = c.to_uppercase().to_string();
        result.extend(chars);
        result
    })
}

/// Derives a human-readable label from a field or column name.
///
/// # Examples
///
/// ```
/// use backoffice_rs_core::locale::humanize_name;
///
/// assert_eq!(humanize_name("amount"), "Amount");
/// assert_eq!(humanize_name("from_date"), "From date");
/// ```
pub fn humanize_name(name: &str) -> String {
    capfirst(&name.replace('_', " "))
}
