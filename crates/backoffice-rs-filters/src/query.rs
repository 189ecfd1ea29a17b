//! Encoding filter state as API query parameters.

use backoffice_rs_core::Value;

use crate::state::FilterState;

/// Converts the non-blank filters into `(key, value)` query pairs.
///
/// Lists are joined with commas; dates use ISO-8601. Blank values are
/// skipped, so passing the full state or
/// [`active_filters`](crate::FilterStateManager::active_filters) gives the
/// same result.
pub fn to_query_pairs(filters: &FilterState) -> Vec<(String, String)> {
    filters
        .iter()
        .filter(|(_, value)| !value.is_blank())
        .map(|(key, value)| {
            let encoded = match value {
                Value::List(items) => items.join(","),
                other => other.to_string(),
            };
            (key.clone(), encoded)
        })
        .collect()
}

/// Encodes the non-blank filters as an `application/x-www-form-urlencoded`
/// query string (without the leading `?`).
///
/// # Examples
///
/// ```
/// use backoffice_rs_filters::query::to_query_string;
/// use backoffice_rs_filters::FilterState;
///
/// let mut filters = FilterState::new();
/// filters.insert("search".into(), "café bar".into());
/// filters.insert("status".into(), "".into());
/// assert_eq!(to_query_string(&filters), "search=caf%C3%A9+bar");
/// ```
pub fn to_query_string(filters: &FilterState) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(to_query_pairs(filters))
        .finish()
}
