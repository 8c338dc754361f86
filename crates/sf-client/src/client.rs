//! Core HTTP client with cancellation, compression, and Salesforce-specific handling.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::{RequestBody, RequestBuilder, RequestMethod};
use crate::response::Response;

/// HTTP client for Salesforce APIs.
///
/// Every request is sent once. Non-2xx statuses are returned as a normal
/// [`Response`]; only transport failures and cancellation produce an `Err`.
#[derive(Debug, Clone)]
pub struct SfHttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl SfHttpClient {
    /// Create a new HTTP client.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent)
            .gzip(config.accept_compressed)
            .deflate(config.accept_compressed);

        let inner = builder
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner, config })
    }

    /// Create a new HTTP client with default configuration.
    pub fn default_client() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Create a GET request builder.
    pub fn get(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Get, url)
    }

    /// Create a POST request builder.
    pub fn post(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Post, url)
    }

    /// Create a PATCH request builder.
    pub fn patch(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Patch, url)
    }

    /// Create a DELETE request builder.
    pub fn delete(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Delete, url)
    }

    /// Execute a request, aborting promptly if `cancel` fires.
    ///
    /// Cancellation is observed both while waiting for the response head and
    /// while reading the body, and always wins over a result that becomes
    /// ready at the same time.
    #[instrument(skip(self, request, cancel), fields(method = ?request.method, url = %request.url_path()))]
    pub async fn execute(
        &self,
        request: RequestBuilder,
        cancel: &CancellationToken,
    ) -> Result<Response> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Request cancelled");
                Err(Error::new(ErrorKind::Cancelled))
            }
            result = self.execute_once(&request) => result,
        }
    }

    async fn execute_once(&self, request: &RequestBuilder) -> Result<Response> {
        let mut req = self
            .inner
            .request(request.method.to_reqwest(), &request.url);

        if let Some(ref token) = request.bearer_token {
            req = req.bearer_auth(token);
        }

        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if let Some(ref body) = request.body {
            req = match body {
                RequestBody::Json(value) => req.json(value),
                RequestBody::Form(encoded) => req.body(encoded.clone()),
            };
        }

        if self.config.enable_tracing {
            debug!(
                method = ?request.method,
                url = %request.url_path(),
                "Sending request"
            );
        }

        let response = Response::read(req.send().await?).await?;

        if self.config.enable_tracing {
            let status = response.status();
            let content_length = response.bytes().len();

            if response.is_success() {
                debug!(status, content_length, "Response received");
            } else {
                info!(status, content_length, "Non-success response");
            }
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::StatusClass;
    use std::time::Duration;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client() -> SfHttpClient {
        SfHttpClient::new(ClientConfig::builder().with_tracing(false).build()).unwrap()
    }

    #[tokio::test]
    async fn test_client_creation() {
        let client = SfHttpClient::default_client().unwrap();
        assert!(client.config().accept_compressed);
    }

    #[tokio::test]
    async fn test_successful_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/test"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client();
        let response = client
            .execute(
                client
                    .get(format!("{}/test", mock_server.uri()))
                    .bearer_auth("test-token"),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert!(response.is_success());
        assert_eq!(response.json_value()["success"], true);
    }

    #[tokio::test]
    async fn test_error_status_is_returned_not_raised() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!([{
                "errorCode": "NOT_FOUND",
                "message": "The requested resource does not exist"
            }])))
            .mount(&mock_server)
            .await;

        let client = client();
        let response = client
            .execute(
                client
                    .delete(format!("{}/missing", mock_server.uri()))
                    .bearer_auth("token"),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(response.status_class(), StatusClass::NotFound);
        assert_eq!(
            response.error_message().as_deref(),
            Some("The requested resource does not exist")
        );
    }

    #[tokio::test]
    async fn test_form_body_is_sent_urlencoded() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .and(header("Content-Type", "application/x-www-form-urlencoded"))
            .and(body_string("grant_type=password&username=a%40b.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client();
        let request = client
            .post(format!("{}/token", mock_server.uri()))
            .form(&[("grant_type", "password"), ("username", "a@b.com")])
            .unwrap();

        let response = client
            .execute(request, &CancellationToken::new())
            .await
            .unwrap();
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn test_cancelled_before_send() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let cancel = CancellationToken::new();
        cancel.cancel();

        let client = client();
        let err = client
            .execute(client.get(format!("{}/x", mock_server.uri())), &cancel)
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
    }

    #[tokio::test]
    async fn test_cancelled_while_in_flight() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
            .mount(&mock_server)
            .await;

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let client = client();
        let started = std::time::Instant::now();
        let err = client
            .execute(client.get(format!("{}/slow", mock_server.uri())), &cancel)
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        // Bind and drop a listener to get a port nothing is serving on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client();
        let err = client
            .execute(
                client.get(format!("http://{addr}/unreachable")),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        assert!(err.is_transport());
        assert!(!err.is_cancelled());
    }
}
