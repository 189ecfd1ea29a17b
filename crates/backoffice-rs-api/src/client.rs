//! A typed client for one REST resource.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value as Json;

use backoffice_rs_core::{BackofficeError, BackofficeResult, Settings, Value};
use backoffice_rs_filters::query::to_query_pairs;
use backoffice_rs_filters::FilterState;
use backoffice_rs_pagination::PaginationMeta;

use crate::envelope::{error_message, DeleteEnvelope, DetailEnvelope, ListEnvelope, MutationEnvelope};
use crate::transport::{ApiRequest, Transport};

/// Parameters for a list request.
///
/// # Examples
///
/// ```
/// use backoffice_rs_api::ListQuery;
/// use backoffice_rs_filters::FilterState;
///
/// let mut filters = FilterState::new();
/// filters.insert("status".into(), "pending".into());
/// filters.insert("search".into(), "".into());
///
/// let query = ListQuery::new().page(2).limit(25).filters(&filters);
/// assert_eq!(
///     query.to_pairs(),
///     vec![
///         ("page".to_string(), "2".to_string()),
///         ("limit".to_string(), "25".to_string()),
///         ("status".to_string(), "pending".to_string()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    page: usize,
    limit: Option<usize>,
    params: Vec<(String, String)>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ListQuery {
    pub const fn new() -> Self {
        Self {
            page: 1,
            limit: None,
            params: Vec::new(),
        }
    }

    /// Sets the 1-based page; `0` is treated as `1`.
    #[must_use]
    pub fn page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    /// Sets the page size. Unset means `Settings::items_per_page`.
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Adds the non-blank filters as query parameters.
    #[must_use]
    pub fn filters(mut self, filters: &FilterState) -> Self {
        self.params.extend(to_query_pairs(filters));
        self
    }

    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub const fn page_number(&self) -> usize {
        self.page
    }

    /// Returns `page`, `limit` (when set), then the filter parameters.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("page".to_string(), self.page.to_string())];
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs.extend(self.params.iter().cloned());
        pairs
    }
}

/// One page of rows and its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    pub rows: Vec<T>,
    pub meta: PaginationMeta,
}

/// Talks to the endpoints of a single resource, such as `expenses`.
///
/// Paths are built from `Settings::api_base_url` and the resource name.
/// Create and update responses carry the record under the singular name
/// (`expense`), and update sends the id as `<singular>_id` in the body.
///
/// Failures of any kind come back as [`BackofficeError::Api`] with a
/// message fit for a notification: the envelope's message when there is
/// one, otherwise a default such as `"Failed to fetch expenses"`.
pub struct ResourceClient<T> {
    transport: Arc<dyn Transport>,
    settings: Arc<Settings>,
    resource: String,
    singular: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            settings: Arc::clone(&self.settings),
            resource: self.resource.clone(),
            singular: self.singular.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ResourceClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceClient")
            .field("resource", &self.resource)
            .field("singular", &self.singular)
            .finish_non_exhaustive()
    }
}

impl<T: DeserializeOwned> ResourceClient<T> {
    pub fn new(
        resource: impl Into<String>,
        transport: Arc<dyn Transport>,
        settings: Arc<Settings>,
    ) -> Self {
        let resource = resource.into();
        let singular = singularize(&resource);
        Self {
            transport,
            settings,
            resource,
            singular,
            _marker: PhantomData,
        }
    }

    /// Overrides the singular name used for mutation payloads.
    #[must_use]
    pub fn singular(mut self, singular: impl Into<String>) -> Self {
        self.singular = singular.into();
        self
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    fn collection_path(&self) -> String {
        format!(
            "{}/{}",
            self.settings.api_base_url.trim_end_matches('/'),
            self.resource
        )
    }

    fn item_path(&self, id: &Value) -> String {
        format!("{}/{}", self.collection_path(), encode_segment(&id.to_string()))
    }

    /// `GET /<resource>?page&limit&<filters>`.
    pub async fn list(&self, query: &ListQuery) -> BackofficeResult<ListPage<T>> {
        let limit = query.limit.unwrap_or(self.settings.items_per_page);
        let query = query.clone().limit(limit);
        let request = ApiRequest::get(self.collection_path()).query(query.to_pairs());
        let default = format!("Failed to fetch {}", self.resource);

        let raw = self.call(request, &default).await?;
        let envelope: ListEnvelope<T> = decode(raw, &default)?;
        let meta = envelope.meta(query.page, limit);
        Ok(ListPage {
            rows: envelope.data,
            meta,
        })
    }

    /// `GET /<resource>/<id>`.
    pub async fn get(&self, id: impl Into<Value>) -> BackofficeResult<T> {
        let request = ApiRequest::get(self.item_path(&id.into()));
        let default = format!("Failed to fetch {}", self.singular);
        let raw = self.call(request, &default).await?;
        let envelope: DetailEnvelope<T> = decode(raw, &default)?;
        Ok(envelope.data)
    }

    /// `POST /<resource>` with the field values as the body.
    pub async fn create(&self, fields: &BTreeMap<String, Value>) -> BackofficeResult<T> {
        let default = format!("Failed to create {}", self.singular);
        let body = serde_json::to_value(fields)?;
        let request = ApiRequest::post(self.collection_path(), body);
        self.mutate(request, &default).await
    }

    /// `PATCH /<resource>` with `<singular>_id` merged into the body.
    pub async fn update(
        &self,
        id: impl Into<Value>,
        fields: &BTreeMap<String, Value>,
    ) -> BackofficeResult<T> {
        let default = format!("Failed to update {}", self.singular);
        let id: Value = id.into();
        let mut body = serde_json::Map::new();
        body.insert(format!("{}_id", self.singular), serde_json::to_value(&id)?);
        for (name, value) in fields {
            body.insert(name.clone(), serde_json::to_value(value)?);
        }
        let request = ApiRequest::patch(self.collection_path(), Json::Object(body));
        self.mutate(request, &default).await
    }

    /// `DELETE /<resource>/<id>`.
    ///
    /// A response with `success: false` is an error carrying its message.
    pub async fn delete(&self, id: impl Into<Value>) -> BackofficeResult<DeleteEnvelope> {
        let request = ApiRequest::delete(self.item_path(&id.into()));
        let default = format!("Failed to delete {}", self.singular);
        let raw = self.call(request, &default).await?;
        let envelope: DeleteEnvelope = decode(raw, &default)?;
        if !envelope.success {
            let message = envelope
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(default);
            tracing::info!(resource = %self.resource, %message, "delete was rejected");
            return Err(BackofficeError::api(message));
        }
        Ok(envelope)
    }

    async fn mutate(&self, request: ApiRequest, default: &str) -> BackofficeResult<T> {
        let raw = self.call(request, default).await?;
        let envelope: MutationEnvelope<T> = decode(raw, default)?;
        envelope.into_record(&self.singular).ok_or_else(|| {
            tracing::warn!(resource = %self.resource, key = %self.singular, "mutation response without record");
            BackofficeError::api(default)
        })
    }

    /// Sends `request` and rejects error envelopes.
    async fn call(&self, request: ApiRequest, default: &str) -> BackofficeResult<Json> {
        tracing::debug!(method = %request.method, uri = %request.uri(), "api request");
        let raw = match self.transport.send(request).await {
            Ok(raw) => raw,
            Err(BackofficeError::Api { message }) => {
                tracing::warn!(resource = %self.resource, %message, "api request failed");
                return Err(BackofficeError::api(message));
            }
            Err(err) => {
                tracing::warn!(resource = %self.resource, error = %err, "api request failed");
                return Err(BackofficeError::api(default));
            }
        };
        if let Some(message) = error_message(&raw) {
            let message = message.unwrap_or_else(|| default.to_string());
            tracing::info!(resource = %self.resource, %message, "api returned an error");
            return Err(BackofficeError::api(message));
        }
        Ok(raw)
    }
}

fn decode<E: DeserializeOwned>(raw: Json, default: &str) -> BackofficeResult<E> {
    serde_json::from_value(raw).map_err(|err| {
        tracing::warn!(error = %err, "unexpected response shape");
        BackofficeError::api(default)
    })
}

/// Percent-encodes one path segment; spaces become `%20`.
fn encode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// `expenses` -> `expense`, `salaries` -> `salary`, `staff` -> `staff`.
fn singularize(resource: &str) -> String {
    if let Some(stem) = resource.strip_suffix("ies") {
        format!("{stem}y")
    } else if let Some(stem) = resource.strip_suffix('s') {
        stem.to_string()
    } else {
        resource.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singularize() {
        assert_eq!(singularize("expenses"), "expense");
        assert_eq!(singularize("salaries"), "salary");
        assert_eq!(singularize("leads"), "lead");
        assert_eq!(singularize("staff"), "staff");
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("42"), "42");
        assert_eq!(encode_segment("a/b"), "a%2Fb");
        assert_eq!(encode_segment("x y+z"), "x%20y%2Bz");
        assert_eq!(encode_segment("EXP-2024_01"), "EXP-2024_01");
    }

    #[test]
    fn test_list_query_page_is_at_least_one() {
        let query = ListQuery::new().page(0);
        assert_eq!(query.page_number(), 1);
        assert_eq!(query.to_pairs(), vec![("page".to_string(), "1".to_string())]);
    }

    #[test]
    fn test_list_query_extra_params_follow_filters() {
        let query = ListQuery::new().limit(5).param("sort", "-date");
        assert_eq!(
            query.to_pairs(),
            vec![
                ("page".to_string(), "1".to_string()),
                ("limit".to_string(), "5".to_string()),
                ("sort".to_string(), "-date".to_string()),
            ]
        );
    }
}
