//! Response envelopes.
//!
//! Every endpoint wraps its payload in a small envelope:
//!
//! | Endpoint | Shape |
//! |----------|-------|
//! | list     | `{ status, message?, data: T[], total?, pagination? }` |
//! | detail   | `{ status, message?, data: T }` |
//! | create / update | `{ status, message?, data: { <resource>: T } }` |
//! | delete   | `{ success, data?, message? }` |
//!
//! A response whose `status` is `"error"` is a failure regardless of the
//! rest of its content; [`error_message`] detects it on the raw JSON before
//! the payload is decoded, since error envelopes usually omit `data`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use backoffice_rs_pagination::PaginationMeta;

/// The `status` field of an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    #[default]
    Ok,
    Error,
}

/// A page of rows from a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListEnvelope<T> {
    #[serde(default)]
    pub status: ApiStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    /// Total number of matching rows, when the endpoint reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    /// Full pagination metadata, when the endpoint reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
}

impl<T> ListEnvelope<T> {
    /// Returns the pagination metadata for this page.
    ///
    /// Reported metadata wins, then a reported `total`; otherwise the
    /// metadata is synthesized from the number of rows returned.
    pub fn meta(&self, page: usize, limit: usize) -> PaginationMeta {
        if let Some(meta) = self.pagination {
            return meta;
        }
        self.total.map_or_else(
            || PaginationMeta::synthesize(page, limit, self.data.len()),
            |total| PaginationMeta::from_total(page, limit, total),
        )
    }
}

/// A single record from a detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailEnvelope<T> {
    #[serde(default)]
    pub status: ApiStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

/// The result of a create or update: the record keyed by resource name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationEnvelope<T> {
    #[serde(default)]
    pub status: ApiStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: BTreeMap<String, T>,
}

impl<T> MutationEnvelope<T> {
    /// Takes the record stored under `key` (e.g. `"expense"`).
    pub fn into_record(mut self, key: &str) -> Option<T> {
        self.data.remove(key)
    }
}

/// The result of a delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Returns `Some(message)` when `raw` carries `status: "error"`.
///
/// The message is `None` inside the `Some` when the envelope carries no
/// usable text, so callers can fall back to their own default. Delete
/// envelopes report failure through [`DeleteEnvelope::success`] instead.
pub fn error_message(raw: &serde_json::Value) -> Option<Option<String>> {
    let failed = raw.get("status").and_then(serde_json::Value::as_str) == Some("error");
    failed.then(|| {
        raw.get("message")
            .and_then(serde_json::Value::as_str)
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
    struct Lead {
        id: u32,
        name: String,
    }

    #[test]
    fn test_list_envelope_with_total() {
        let envelope: ListEnvelope<Lead> = serde_json::from_value(json!({
            "status": "ok",
            "data": [{"id": 1, "name": "Acme"}],
            "total": 31
        }))
        .unwrap();
        let meta = envelope.meta(2, 10);
        assert_eq!(meta.total, 31);
        assert_eq!(meta.total_pages, 4);
        assert!(meta.has_next);
    }

    #[test]
    fn test_list_envelope_prefers_reported_metadata() {
        let envelope: ListEnvelope<Lead> = serde_json::from_value(json!({
            "status": "ok",
            "data": [],
            "total": 99,
            "pagination": {
                "page": 3, "limit": 5, "total": 12,
                "totalPages": 3, "hasNext": false, "hasPrev": true
            }
        }))
        .unwrap();
        let meta = envelope.meta(1, 10);
        assert_eq!(meta.page, 3);
        assert_eq!(meta.total, 12);
    }

    #[test]
    fn test_list_envelope_synthesizes_without_total() {
        let envelope: ListEnvelope<Lead> = serde_json::from_value(json!({
            "status": "ok",
            "data": [{"id": 1, "name": "a"}, {"id": 2, "name": "b"}]
        }))
        .unwrap();
        let meta = envelope.meta(1, 2);
        assert!(meta.has_next);
        assert_eq!(meta.total_pages, 2);
    }

    #[test]
    fn test_mutation_envelope_record() {
        let envelope: MutationEnvelope<Lead> = serde_json::from_value(json!({
            "status": "ok",
            "data": {"lead": {"id": 7, "name": "Globex"}}
        }))
        .unwrap();
        assert_eq!(envelope.into_record("lead").unwrap().name, "Globex");
    }

    #[test]
    fn test_error_message_detection() {
        assert_eq!(error_message(&json!({"status": "ok", "data": []})), None);
        assert_eq!(
            error_message(&json!({"status": "error", "message": "Lead not found"})),
            Some(Some("Lead not found".to_string()))
        );
        assert_eq!(error_message(&json!({"status": "error", "message": "  "})), Some(None));
        assert_eq!(error_message(&json!({"success": false})), None);
    }

    #[test]
    fn test_delete_envelope() {
        let envelope: DeleteEnvelope =
            serde_json::from_value(json!({"success": false, "message": "Expense is locked"})).unwrap();
        assert!(!envelope.success);
        assert_eq!(envelope.message.as_deref(), Some("Expense is locked"));
        assert!(serde_json::from_value::<DeleteEnvelope>(json!({"status": "ok"})).is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ApiStatus::Error).unwrap(), r#""error""#);
    }
}
