//! HTTP response handling with Salesforce-specific extensions.

use std::collections::HashMap;
use std::sync::LazyLock;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Normalized classification of an HTTP outcome.
///
/// Callers branch on this instead of inspecting status codes or error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusClass {
    /// 2xx.
    Success,
    /// 404, the addressed record or resource does not exist.
    NotFound,
    /// 401.
    Unauthorized,
    /// 403.
    Forbidden,
    /// Any other 4xx.
    ClientError,
    /// 5xx.
    ServerError,
    /// No HTTP response was received (connection failure, timeout).
    Transport,
    /// Informational or redirect statuses.
    Other,
}

impl StatusClass {
    /// Classify an HTTP status code.
    pub fn from_status(status: u16) -> Self {
        match status {
            200..=299 => StatusClass::Success,
            401 => StatusClass::Unauthorized,
            403 => StatusClass::Forbidden,
            404 => StatusClass::NotFound,
            400..=499 => StatusClass::ClientError,
            500..=599 => StatusClass::ServerError,
            _ => StatusClass::Other,
        }
    }

    /// Returns true for [`StatusClass::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, StatusClass::Success)
    }
}

/// A fully received HTTP response.
///
/// The body is read inside the cancellable section of
/// [`SfHttpClient::execute`](crate::SfHttpClient::execute), so holding a
/// `Response` never implies more network I/O.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    headers: HashMap<String, String>,
    body: Bytes,
}

impl Response {
    /// Build a response from its parts. Header names are matched case-insensitively.
    pub fn from_parts(status: u16, headers: HashMap<String, String>, body: impl Into<Bytes>) -> Self {
        let headers = headers
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();

        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Drain a reqwest response into a buffered `Response`.
    pub(crate) async fn read(response: reqwest::Response) -> Result<Self> {
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await?;

        Ok(Self::from_parts(status, headers, body))
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Classify the status code.
    pub fn status_class(&self) -> StatusClass {
        StatusClass::from_status(self.status)
    }

    /// Canonical reason phrase for the status, e.g. `"Not Found"`.
    pub fn status_text(&self) -> &'static str {
        reqwest::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown Status")
    }

    /// Get a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(|s| s.as_str())
    }

    /// Get the Content-Type header.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Raw body bytes.
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(Into::into)
    }

    /// Body as a dynamically shaped JSON value.
    ///
    /// An empty body (e.g. `204 No Content`) is `Null`; a body that is not
    /// JSON is kept verbatim as a JSON string.
    pub fn json_value(&self) -> serde_json::Value {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return serde_json::Value::Null;
        }

        serde_json::from_slice(&self.body).unwrap_or_else(|_| {
            serde_json::Value::String(String::from_utf8_lossy(&self.body).into_owned())
        })
    }

    /// Salesforce error objects in the body.
    ///
    /// Salesforce reports failures as an array of `{errorCode, message, fields}`;
    /// a few endpoints return a single object instead. Both are accepted.
    pub fn salesforce_errors(&self) -> Vec<SalesforceErrorBody> {
        if let Ok(errors) = serde_json::from_slice::<Vec<SalesforceErrorBody>>(&self.body) {
            return errors;
        }
        if let Ok(err) = serde_json::from_slice::<SalesforceErrorBody>(&self.body) {
            return vec![err];
        }
        Vec::new()
    }

    /// Human readable error message for a non-successful response.
    ///
    /// The first Salesforce error's `message`, verbatim, when present,
    /// otherwise a status line. `None` for 2xx responses.
    pub fn error_message(&self) -> Option<String> {
        if self.is_success() {
            return None;
        }

        let message = match self.salesforce_errors().into_iter().next() {
            Some(err) => err.message,
            None => format!("Request failed with status code {}", self.status_text()),
        };

        Some(message)
    }
}

/// Salesforce API error object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SalesforceErrorBody {
    #[serde(rename = "errorCode", alias = "statusCode", default)]
    pub error_code: Option<String>,
    pub message: String,
    #[serde(default)]
    pub fields: Vec<String>,
}

// Salesforce tokens start with the org id ("00D...") followed by '!'.
static TOKEN_PATTERN: LazyLock<regex_lite::Regex> = LazyLock::new(|| {
    regex_lite::Regex::new(r"00[A-Za-z0-9]{13,}[!][A-Za-z0-9_.]+")
        .expect("token pattern is a valid regex")
});

static SESSION_PATTERN: LazyLock<regex_lite::Regex> = LazyLock::new(|| {
    regex_lite::Regex::new(r"sid=[A-Za-z0-9]{20,}").expect("session pattern is a valid regex")
});

/// Sanitize an error message to prevent exposing sensitive data.
///
/// This function:
/// - Removes anything that looks like a Salesforce access token
/// - Removes session IDs
/// - Truncates messages longer than 500 characters
pub fn sanitize_error_message(message: &str) -> String {
    const MAX_LENGTH: usize = 500;

    let mut sanitized = TOKEN_PATTERN
        .replace_all(message, "[REDACTED_TOKEN]")
        .to_string();
    sanitized = SESSION_PATTERN
        .replace_all(&sanitized, "sid=[REDACTED]")
        .to_string();

    if sanitized.len() > MAX_LENGTH {
        let mut cut = MAX_LENGTH;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &'static str) -> Response {
        Response::from_parts(status, HashMap::new(), body)
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(StatusClass::from_status(200), StatusClass::Success);
        assert_eq!(StatusClass::from_status(201), StatusClass::Success);
        assert_eq!(StatusClass::from_status(204), StatusClass::Success);
        assert_eq!(StatusClass::from_status(400), StatusClass::ClientError);
        assert_eq!(StatusClass::from_status(401), StatusClass::Unauthorized);
        assert_eq!(StatusClass::from_status(403), StatusClass::Forbidden);
        assert_eq!(StatusClass::from_status(404), StatusClass::NotFound);
        assert_eq!(StatusClass::from_status(503), StatusClass::ServerError);
        assert_eq!(StatusClass::from_status(302), StatusClass::Other);
    }

    #[test]
    fn test_headers_are_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        let resp = Response::from_parts(200, headers, "{}");

        assert_eq!(resp.content_type(), Some("application/json"));
        assert_eq!(resp.header("CONTENT-TYPE"), Some("application/json"));
    }

    #[test]
    fn test_json_value_shapes() {
        assert_eq!(response(204, "").json_value(), serde_json::Value::Null);
        assert_eq!(
            response(201, r#"{"id":"001xx","success":true,"errors":[]}"#).json_value()["id"],
            "001xx"
        );
        assert_eq!(
            response(502, "<html>Bad Gateway</html>").json_value(),
            serde_json::Value::String("<html>Bad Gateway</html>".to_string())
        );
    }

    #[test]
    fn test_error_message_uses_first_salesforce_error() {
        let resp = response(
            400,
            r#"[{"message":"sObject type 'Invalid' is not supported.","errorCode":"INVALID_TYPE"},
                {"message":"second","errorCode":"OTHER"}]"#,
        );
        assert_eq!(
            resp.error_message().as_deref(),
            Some("sObject type 'Invalid' is not supported.")
        );
    }

    #[test]
    fn test_error_message_is_not_truncated() {
        let message = format!("unexpected token: FORM at SELECT {} FORM Account", "Name, ".repeat(150));
        let body = serde_json::json!([{"message": message.clone(), "errorCode": "MALFORMED_QUERY"}]);
        let resp = Response::from_parts(400, HashMap::new(), body.to_string());

        assert!(message.len() > 500);
        assert_eq!(resp.error_message(), Some(message));
    }

    #[test]
    fn test_error_message_without_error_code() {
        let resp = response(400, r#"[{"message":"only a message"}]"#);
        let errors = resp.salesforce_errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].error_code.is_none());
        assert_eq!(resp.error_message().as_deref(), Some("only a message"));
    }

    #[test]
    fn test_error_message_single_object() {
        let resp = response(
            404,
            r#"{"errorCode":"NOT_FOUND","message":"The requested resource does not exist"}"#,
        );
        assert_eq!(
            resp.error_message().as_deref(),
            Some("The requested resource does not exist")
        );
    }

    #[test]
    fn test_error_message_falls_back_to_status_line() {
        assert_eq!(
            response(404, "").error_message().as_deref(),
            Some("Request failed with status code Not Found")
        );
        assert_eq!(
            response(401, "[]").error_message().as_deref(),
            Some("Request failed with status code Unauthorized")
        );
        assert!(response(200, "{}").error_message().is_none());
    }

    // =========================================================================
    // sanitize_error_message tests
    // =========================================================================

    #[test]
    fn test_sanitize_redacts_access_tokens() {
        let msg = "Session expired: 00Dxx0000001gEF!AQcAQH3k9s7LKbp_example_token_value.here";
        let sanitized = sanitize_error_message(msg);
        assert!(
            sanitized.contains("[REDACTED_TOKEN]"),
            "Should redact token: {sanitized}"
        );
        assert!(!sanitized.contains("AQcAQH3k9s7LKbp"));
    }

    #[test]
    fn test_sanitize_redacts_session_ids() {
        let msg = "Invalid session: sid=abc123def456ghi789jkl012";
        let sanitized = sanitize_error_message(msg);
        assert!(sanitized.contains("sid=[REDACTED]"));
        assert!(!sanitized.contains("abc123def456"));
    }

    #[test]
    fn test_sanitize_truncates_long_messages() {
        let long_msg = "é".repeat(400);
        let sanitized = sanitize_error_message(&long_msg);
        assert!(sanitized.ends_with("...[truncated]"));
        assert!(sanitized.len() <= 500 + "...[truncated]".len());
    }

    #[test]
    fn test_sanitize_passes_through_clean_messages() {
        let msg = "No such column 'foo' on entity 'Account'";
        assert_eq!(sanitize_error_message(msg), msg);
    }
}
