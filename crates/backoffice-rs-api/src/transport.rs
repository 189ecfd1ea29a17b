//! The transport seam between resource clients and the network.
//!
//! [`ResourceClient`](crate::ResourceClient) never performs I/O itself; it
//! builds an [`ApiRequest`] and hands it to a [`Transport`]. Applications
//! plug in their HTTP stack, tests plug in a canned one.

use async_trait::async_trait;
use http::Method;
use serde_json::Value as Json;

use backoffice_rs_core::BackofficeResult;

/// One request to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute path, including the API base (e.g. `/api/expenses/4`).
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Json>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>, body: Json) -> Self {
        Self::new(Method::POST, path).body(body)
    }

    pub fn patch(path: impl Into<String>, body: Json) -> Self {
        Self::new(Method::PATCH, path).body(body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    #[must_use]
    pub fn query<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    #[must_use]
    pub fn body(mut self, body: Json) -> Self {
        self.body = Some(body);
        self
    }

    /// Returns the path with the query string appended.
    ///
    /// # Examples
    ///
    /// ```
    /// use backoffice_rs_api::ApiRequest;
    ///
    /// let request = ApiRequest::get("/api/leads").query([("search", "acme corp"), ("page", "2")]);
    /// assert_eq!(request.uri(), "/api/leads?search=acme+corp&page=2");
    /// ```
    pub fn uri(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.query)
            .finish();
        format!("{}?{query}", self.path)
    }
}

/// Sends [`ApiRequest`]s and returns the decoded JSON body.
///
/// Implementations return the body for every response they could read,
/// including error envelopes; the client inspects the envelope itself.
/// `Err` is reserved for requests that could not be completed.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> BackofficeResult<Json>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_uri_without_query() {
        assert_eq!(ApiRequest::delete("/api/leads/3").uri(), "/api/leads/3");
    }

    #[test]
    fn test_builders_set_method_and_body() {
        let request = ApiRequest::patch("/api/leads", json!({"lead_id": 3}));
        assert_eq!(request.method, Method::PATCH);
        assert_eq!(request.body, Some(json!({"lead_id": 3})));

        let request = ApiRequest::get("/api/leads");
        assert_eq!(request.method, Method::GET);
        assert!(request.body.is_none());
    }

    #[test]
    fn test_query_pairs_are_encoded() {
        let request = ApiRequest::get("/api/expenses").query([("category", "travel,meals")]);
        assert_eq!(request.uri(), "/api/expenses?category=travel%2Cmeals");
    }
}
