//! Salesforce REST API client.
//!
//! This client wraps `SalesforceClient` from `sftask-client` and exposes the
//! record operations the tasks need: create, update, delete and query.
//! Every call returns an [`OperationResult`]; only cancellation and
//! client-side failures are raised.

use tokio_util::sync::CancellationToken;
use tracing::warn;

use sftask_client::{ClientConfig, RequestBuilder, SalesforceClient};

use crate::error::{Error, ErrorKind, Result};
use crate::result::OperationResult;

mod crud;
mod query;

/// Salesforce REST API client.
///
/// # Example
///
/// ```rust,ignore
/// use sftask_rest::SalesforceRestClient;
/// use tokio_util::sync::CancellationToken;
///
/// let client = SalesforceRestClient::new(
///     "https://myorg.my.salesforce.com",
///     "access_token_here",
/// )?;
/// let cancel = CancellationToken::new();
///
/// let created = client
///     .create("Account", &json!({"Name": "New Account"}), &cancel)
///     .await?;
/// let id = created.record_id().unwrap_or_default();
///
/// client.update("Account", id, &json!({"Name": "Updated"}), &cancel).await?;
/// client.query("SELECT Id, Name FROM Account", &cancel).await?;
/// client.delete("Account", id, &cancel).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SalesforceRestClient {
    client: SalesforceClient,
}

impl SalesforceRestClient {
    /// Create a new REST client with the given instance URL and access token.
    pub fn new(instance_url: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        let client = SalesforceClient::new(instance_url, access_token)?;
        Ok(Self { client })
    }

    /// Create a new REST client with custom HTTP configuration.
    pub fn with_config(
        instance_url: impl Into<String>,
        access_token: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let client = SalesforceClient::with_config(instance_url, access_token, config)?;
        Ok(Self { client })
    }

    /// Create a REST client from an existing SalesforceClient.
    pub fn from_client(client: SalesforceClient) -> Self {
        Self { client }
    }

    /// Get the instance URL.
    pub fn instance_url(&self) -> &str {
        self.client.instance_url()
    }

    /// Get the API version.
    pub fn api_version(&self) -> &str {
        self.client.api_version()
    }

    /// Set the API version.
    pub fn with_api_version(mut self, version: impl AsRef<str>) -> Self {
        self.client = self.client.with_api_version(version);
        self
    }

    /// Send one request and fold the outcome into an [`OperationResult`].
    ///
    /// Transport failures become a failed result; cancellation and
    /// request-building problems are raised.
    async fn send(
        &self,
        request: RequestBuilder,
        cancel: &CancellationToken,
    ) -> Result<OperationResult> {
        match self.client.execute(request, cancel).await {
            Ok(response) => Ok(OperationResult::from_response(&response)),
            Err(err) if err.is_cancelled() => Err(Error::with_source(ErrorKind::Cancelled, err)),
            Err(err) if err.is_transport() => {
                warn!(error = %err, "Request failed without a response");
                Ok(OperationResult::from_transport_error(&err))
            }
            Err(err) => Err(err.into()),
        }
    }
}
