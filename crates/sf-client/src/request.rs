//! HTTP request building with Salesforce-specific headers.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::Result;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl RequestMethod {
    /// Convert to reqwest::Method.
    pub fn to_reqwest(&self) -> reqwest::Method {
        match self {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
            RequestMethod::Patch => reqwest::Method::PATCH,
            RequestMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Builder for HTTP requests.
pub struct RequestBuilder {
    pub(crate) method: RequestMethod,
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) body: Option<RequestBody>,
    pub(crate) bearer_token: Option<String>,
}

impl std::fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &self.headers)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

/// Request body content.
#[derive(Debug)]
pub(crate) enum RequestBody {
    Json(serde_json::Value),
    /// Already urlencoded form body. Form bodies carry credentials, so they
    /// are only ever rendered as a string right before sending.
    Form(String),
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: RequestMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            bearer_token: None,
        }
    }

    /// The request method.
    pub fn method(&self) -> RequestMethod {
        self.method
    }

    /// The target URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The target URL without its query string, safe to record in logs.
    pub fn url_path(&self) -> &str {
        self.url.split_once('?').map_or(self.url.as_str(), |(path, _)| path)
    }

    /// Set the bearer token for authentication.
    pub fn bearer_auth(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set JSON body.
    pub fn json<T: Serialize>(self, body: &T) -> Result<Self> {
        let value = serde_json::to_value(body)?;
        Ok(self.json_value(value))
    }

    /// Set raw JSON body.
    pub fn json_value(mut self, body: serde_json::Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self
    }

    /// Set an `application/x-www-form-urlencoded` body. Field order is kept.
    pub fn form<K, V>(mut self, fields: &[(K, V)]) -> Result<Self>
    where
        K: Serialize,
        V: Serialize,
    {
        let encoded = serde_urlencoded::to_string(fields)?;
        self.body = Some(RequestBody::Form(encoded));
        self.headers.insert(
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        );
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let req = RequestBuilder::new(RequestMethod::Get, "https://example.com/api")
            .bearer_auth("token123")
            .header("X-Custom", "value");

        assert_eq!(req.method(), RequestMethod::Get);
        assert_eq!(req.url(), "https://example.com/api");
        assert_eq!(req.bearer_token, Some("token123".to_string()));
        assert_eq!(req.headers.get("X-Custom"), Some(&"value".to_string()));
    }

    #[test]
    fn test_url_path_drops_query() {
        let req = RequestBuilder::new(
            RequestMethod::Get,
            "https://na1.salesforce.com/services/data/v61.0/query/?q=SELECT%20Id%20FROM%20Account",
        );
        assert_eq!(
            req.url_path(),
            "https://na1.salesforce.com/services/data/v61.0/query/"
        );

        let req = RequestBuilder::new(RequestMethod::Delete, "https://na1.salesforce.com/a/b");
        assert_eq!(req.url_path(), "https://na1.salesforce.com/a/b");
    }

    #[test]
    fn test_json_body() {
        let data = serde_json::json!({"Name": "Test Account"});
        let req = RequestBuilder::new(RequestMethod::Post, "https://example.com")
            .json(&data)
            .unwrap();

        assert!(matches!(req.body, Some(RequestBody::Json(_))));
        assert_eq!(
            req.headers.get("Content-Type"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_form_body_keeps_field_order_and_encodes() {
        let req = RequestBuilder::new(RequestMethod::Post, "https://example.com/token")
            .form(&[("grant_type", "password"), ("password", "p@ss word")])
            .unwrap();

        match req.body {
            Some(RequestBody::Form(ref body)) => {
                assert_eq!(body, "grant_type=password&password=p%40ss+word");
            }
            ref other => panic!("expected form body, got {other:?}"),
        }
        assert_eq!(
            req.headers.get("Content-Type"),
            Some(&"application/x-www-form-urlencoded".to_string())
        );
    }

    #[test]
    fn test_debug_redacts_bearer_token() {
        let req = RequestBuilder::new(RequestMethod::Delete, "https://example.com")
            .bearer_auth("super_secret_token");

        let debug_output = format!("{:?}", req);
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_token"));
    }
}
