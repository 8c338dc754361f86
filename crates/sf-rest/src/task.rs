//! Steps shared by the task entry points.
//!
//! Every task runs the same pipeline: check required inputs, check the
//! domain and authentication options, parse the record JSON, resolve the
//! bearer token, send one request, then shape the result. Every check runs
//! before any network I/O.

use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use sftask_auth::{ResolvedToken, TokenProvider};
use sftask_client::{SalesforceClient, SfHttpClient, StatusClass};

use crate::client::SalesforceRestClient;
use crate::error::{Error, ErrorKind, Result};
use crate::options::Options;
use crate::result::OperationResult;

const NOT_FOUND_MESSAGE: &str = "Target couldn't be found with given id or type.";

/// Reject a blank required input.
pub(crate) fn require(value: &str, field: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::new(ErrorKind::MissingInput(field)));
    }
    Ok(())
}

/// Parse record JSON into a flat object of scalar fields.
pub(crate) fn parse_record(json: &str) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| Error::with_source(ErrorKind::InvalidJson(e.to_string()), e))?;

    let Value::Object(record) = value else {
        return Err(Error::new(ErrorKind::InvalidJson(
            "expected a JSON object".to_string(),
        )));
    };

    if let Some((field, _)) = record
        .iter()
        .find(|(_, v)| v.is_object() || v.is_array())
    {
        return Err(Error::new(ErrorKind::InvalidJson(format!(
            "field '{}' must be a string, number, boolean or null",
            field
        ))));
    }

    Ok(record)
}

/// A validated domain and authentication selector, ready to authenticate.
pub(crate) struct Session {
    client: SalesforceClient,
    provider: TokenProvider,
}

impl Session {
    /// Check the domain and authentication options without network I/O.
    pub(crate) fn prepare(domain: &str, options: &Options) -> Result<Self> {
        let http = SfHttpClient::new(options.http.clone())?;
        let client = SalesforceClient::from_http(http.clone(), domain, String::new())?
            .with_api_version(&options.api_version);

        options.authentication.validate()?;

        Ok(Self {
            client,
            provider: TokenProvider::from_http(http),
        })
    }

    /// Resolve the bearer token, fetching one if the password grant is used.
    pub(crate) async fn connect(
        self,
        options: &Options,
        cancel: &CancellationToken,
    ) -> Result<(SalesforceRestClient, ResolvedToken)> {
        let token = options
            .authentication
            .resolve(&self.provider, cancel)
            .await?;
        debug!(fetched = token.was_fetched(), "Bearer token ready");

        let client = SalesforceRestClient::from_client(self.client.with_access_token(token.token()));
        Ok((client, token))
    }
}

/// Apply not-found escalation and the token echo to a finished request.
pub(crate) fn finish(
    result: OperationResult,
    token: &ResolvedToken,
    options: &Options,
    escalate_not_found: bool,
) -> Result<OperationResult> {
    if escalate_not_found
        && options.throw_if_not_found
        && result.status_class() == StatusClass::NotFound
    {
        warn!(status = ?result.status, "Target record not found");
        return Err(Error::new(ErrorKind::NotFound(NOT_FOUND_MESSAGE.to_string())));
    }

    if !result.request_succeeded {
        debug!(
            status = ?result.status,
            error = result.error_message.as_deref().unwrap_or_default(),
            "Request did not succeed"
        );
    }

    Ok(result.with_access_token(token.echo(options.return_access_token)))
}
