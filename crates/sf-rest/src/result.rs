//! The uniform outcome of the SObject and query tasks.

use serde::Serialize;
use serde_json::Value;

use sftask_client::{sanitize_error_message, Response, StatusClass};

/// Why a request did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureDetail {
    /// HTTP status, absent when no response was received.
    pub status: Option<u16>,
    /// Normalized classification of the failure.
    pub class: StatusClass,
    /// Human readable description.
    pub message: String,
}

/// Outcome of a create, update, delete or query task.
///
/// A Salesforce rejection or a connectivity failure is reported here rather
/// than raised. `Debug` output redacts the access token.
#[derive(Clone, Serialize)]
pub struct OperationResult {
    /// Parsed response body. `Null` for an empty body, a JSON string for a
    /// body that is not JSON.
    pub body: Value,
    /// True for a 2xx response.
    pub request_succeeded: bool,
    /// HTTP status, absent when no response was received.
    pub status: Option<u16>,
    /// Failure details; `None` on success.
    pub error: Option<FailureDetail>,
    /// Convenience copy of `error.message`.
    pub error_message: Option<String>,
    /// Token fetched by the password grant, only when it was requested.
    pub access_token: Option<String>,
}

impl std::fmt::Debug for OperationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationResult")
            .field("body", &self.body)
            .field("request_succeeded", &self.request_succeeded)
            .field("status", &self.status)
            .field("error", &self.error)
            .field("error_message", &self.error_message)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl OperationResult {
    /// Build the result from a received response.
    pub fn from_response(response: &Response) -> Self {
        let status = response.status();
        let error = response.error_message().map(|message| FailureDetail {
            status: Some(status),
            class: response.status_class(),
            message,
        });

        Self {
            body: response.json_value(),
            request_succeeded: response.is_success(),
            status: Some(status),
            error_message: error.as_ref().map(|e| e.message.clone()),
            error,
            access_token: None,
        }
    }

    /// Build the result for a request that never produced a response.
    pub fn from_transport_error(err: &sftask_client::Error) -> Self {
        let message = sanitize_error_message(&err.to_string());

        Self {
            body: Value::Null,
            request_succeeded: false,
            status: None,
            error: Some(FailureDetail {
                status: None,
                class: StatusClass::Transport,
                message: message.clone(),
            }),
            error_message: Some(message),
            access_token: None,
        }
    }

    /// Attach the token to echo back to the caller.
    pub fn with_access_token(mut self, access_token: Option<String>) -> Self {
        self.access_token = access_token;
        self
    }

    /// Classification of the outcome.
    pub fn status_class(&self) -> StatusClass {
        self.error
            .as_ref()
            .map_or(StatusClass::Success, |e| e.class)
    }

    /// The `id` of a created record.
    pub fn record_id(&self) -> Option<&str> {
        self.body.get("id").and_then(Value::as_str)
    }
}
