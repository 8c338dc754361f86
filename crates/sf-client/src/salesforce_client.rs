//! High-level Salesforce client bound to one domain and bearer token.
//!
//! This module provides `SalesforceClient`, which combines a bearer token
//! with an HTTP client and knows how to address the REST endpoints the
//! tasks use.
//!
//! ## Security
//!
//! - Access tokens are redacted in Debug output
//! - Sensitive parameters are skipped in tracing spans

use tokio_util::sync::CancellationToken;

use crate::client::SfHttpClient;
use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::RequestBuilder;
use crate::response::Response;
use crate::DEFAULT_API_VERSION;

/// Salesforce API client for a single instance.
///
/// # Example
///
/// ```rust,ignore
/// use sftask_client::SalesforceClient;
///
/// let client = SalesforceClient::new("https://example.my.salesforce.com", token)?
///     .with_api_version("v60.0");
///
/// assert_eq!(
///     client.sobject_url("Account"),
///     "https://example.my.salesforce.com/services/data/v60.0/sobjects/Account"
/// );
/// ```
#[derive(Clone)]
pub struct SalesforceClient {
    http: SfHttpClient,
    instance_url: String,
    access_token: String,
    api_version: String,
}

impl std::fmt::Debug for SalesforceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesforceClient")
            .field("instance_url", &self.instance_url)
            .field("access_token", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl SalesforceClient {
    /// Create a new Salesforce client with the given instance URL and access token.
    pub fn new(instance_url: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        Self::with_config(instance_url, access_token, ClientConfig::default())
    }

    /// Create a new Salesforce client with custom configuration.
    pub fn with_config(
        instance_url: impl Into<String>,
        access_token: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        Self::from_http(SfHttpClient::new(config)?, instance_url, access_token)
    }

    /// Create a Salesforce client reusing an existing HTTP client.
    ///
    /// The instance URL must be an absolute `http(s)` URL; a trailing slash
    /// is dropped.
    pub fn from_http(
        http: SfHttpClient,
        instance_url: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self> {
        let instance_url = instance_url.into().trim().trim_end_matches('/').to_string();

        let parsed = url::Url::parse(&instance_url)?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(Error::new(ErrorKind::InvalidUrl(format!(
                "expected an http(s) instance URL, got '{}'",
                instance_url
            ))));
        }

        Ok(Self {
            http,
            instance_url,
            access_token: access_token.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
        })
    }

    /// Set the API version. Accepts `"v61.0"` or `"61.0"`.
    pub fn with_api_version(mut self, version: impl AsRef<str>) -> Self {
        self.api_version = normalize_api_version(version.as_ref());
        self
    }

    /// Replace the bearer token, e.g. once a password grant has completed.
    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = access_token.into();
        self
    }

    /// Get the instance URL.
    pub fn instance_url(&self) -> &str {
        &self.instance_url
    }

    /// Get the access token.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Get the API version, including its `v` prefix.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Build the REST API URL for a path.
    ///
    /// Example: `rest_url("sobjects/Account")` -> `{domain}/services/data/v61.0/sobjects/Account`
    pub fn rest_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!(
            "{}/services/data/{}/{}",
            self.instance_url, self.api_version, path
        )
    }

    /// URL of an SObject type collection, used to create records.
    pub fn sobject_url(&self, sobject: &str) -> String {
        self.rest_url(&format!("sobjects/{}", urlencoding::encode(sobject)))
    }

    /// URL of a single record.
    pub fn sobject_record_url(&self, sobject: &str, id: &str) -> String {
        self.rest_url(&format!(
            "sobjects/{}/{}",
            urlencoding::encode(sobject),
            urlencoding::encode(id)
        ))
    }

    /// URL of a SOQL query. The statement is percent-encoded into `q`.
    pub fn query_url(&self, soql: &str) -> String {
        self.rest_url(&format!("query/?q={}", urlencoding::encode(soql)))
    }

    // =========================================================================
    // Base HTTP Methods (with authentication)
    // =========================================================================

    /// Create a GET request builder with authentication.
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.http.get(url).bearer_auth(&self.access_token)
    }

    /// Create a POST request builder with authentication.
    pub fn post(&self, url: &str) -> RequestBuilder {
        self.http.post(url).bearer_auth(&self.access_token)
    }

    /// Create a PATCH request builder with authentication.
    pub fn patch(&self, url: &str) -> RequestBuilder {
        self.http.patch(url).bearer_auth(&self.access_token)
    }

    /// Create a DELETE request builder with authentication.
    pub fn delete(&self, url: &str) -> RequestBuilder {
        self.http.delete(url).bearer_auth(&self.access_token)
    }

    /// Execute a request and return the buffered response.
    pub async fn execute(
        &self,
        request: RequestBuilder,
        cancel: &CancellationToken,
    ) -> Result<Response> {
        self.http.execute(request, cancel).await
    }
}

/// Normalize an API version to the `vNN.N` form used in REST paths.
///
/// Blank input falls back to [`DEFAULT_API_VERSION`].
pub fn normalize_api_version(version: &str) -> String {
    let version = version.trim();
    if version.is_empty() {
        DEFAULT_API_VERSION.to_string()
    } else if version.starts_with(['v', 'V']) {
        format!("v{}", &version[1..])
    } else {
        format!("v{}", version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let client = SalesforceClient::new("https://na1.salesforce.com", "token123").unwrap();

        assert_eq!(
            client.rest_url("sobjects/Account"),
            "https://na1.salesforce.com/services/data/v61.0/sobjects/Account"
        );
        assert_eq!(
            client.sobject_url("Custom_Object__c"),
            "https://na1.salesforce.com/services/data/v61.0/sobjects/Custom_Object__c"
        );
        assert_eq!(
            client.sobject_record_url("Contact", "003xx000004TmiQAAS"),
            "https://na1.salesforce.com/services/data/v61.0/sobjects/Contact/003xx000004TmiQAAS"
        );
    }

    #[test]
    fn test_query_url_encodes_statement() {
        let client = SalesforceClient::new("https://na1.salesforce.com", "token").unwrap();

        assert_eq!(
            client.query_url("SELECT Id FROM Account WHERE Name = 'A&B'"),
            "https://na1.salesforce.com/services/data/v61.0/query/?q=SELECT%20Id%20FROM%20Account%20WHERE%20Name%20%3D%20%27A%26B%27"
        );
    }

    #[test]
    fn test_api_version() {
        let client = SalesforceClient::new("https://na1.salesforce.com", "token")
            .unwrap()
            .with_api_version("60.0");

        assert_eq!(client.api_version(), "v60.0");
        assert_eq!(
            client.rest_url("limits"),
            "https://na1.salesforce.com/services/data/v60.0/limits"
        );
    }

    #[test]
    fn test_normalize_api_version() {
        assert_eq!(normalize_api_version("v59.0"), "v59.0");
        assert_eq!(normalize_api_version("59.0"), "v59.0");
        assert_eq!(normalize_api_version("V59.0"), "v59.0");
        assert_eq!(normalize_api_version("  "), DEFAULT_API_VERSION);
    }

    #[test]
    fn test_trailing_slash_handling() {
        let client = SalesforceClient::new("https://na1.salesforce.com/", "token").unwrap();

        assert_eq!(client.instance_url(), "https://na1.salesforce.com");
        assert_eq!(
            client.rest_url("limits"),
            "https://na1.salesforce.com/services/data/v61.0/limits"
        );
    }

    #[test]
    fn test_rejects_non_url_domain() {
        let err = SalesforceClient::new("example.my.salesforce.com", "token").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidUrl(_)));

        let err = SalesforceClient::new("ftp://example.com", "token").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidUrl(_)));
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = SalesforceClient::new("https://na1.salesforce.com", "secret_token").unwrap();
        let debug_output = format!("{:?}", client);
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("secret_token"));
    }
}
