//! Error types for sftask-client.

/// Result type alias for sftask-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sftask-client operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Returns true if the request was aborted through its cancellation token.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.kind, ErrorKind::Cancelled)
    }

    /// Returns true if the request never produced an HTTP response
    /// (connection failure, timeout, or another transport problem).
    pub fn is_transport(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Timeout | ErrorKind::Connection(_) | ErrorKind::Other(_)
        )
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Request timeout.
    #[error("Request timeout")]
    Timeout,

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The caller cancelled the request before it completed.
    #[error("Request cancelled")]
    Cancelled,

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::Connection(err.to_string())
        } else {
            ErrorKind::Other(err.to_string())
        };

        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<serde_urlencoded::ser::Error> for Error {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        Error::with_source(ErrorKind::Serialization(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::InvalidUrl(err.to_string()), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_cancelled() {
        let err = Error::new(ErrorKind::Cancelled);
        assert!(err.is_cancelled());
        assert!(!err.is_transport());

        let err = Error::new(ErrorKind::Timeout);
        assert!(!err.is_cancelled());
        assert!(err.is_transport());
    }

    #[test]
    fn test_error_is_transport() {
        assert!(Error::new(ErrorKind::Connection("refused".into())).is_transport());
        assert!(!Error::new(ErrorKind::Json("eof".into())).is_transport());
        assert!(!Error::new(ErrorKind::InvalidUrl("no scheme".into())).is_transport());
    }

    #[test]
    fn test_error_kind_display_messages() {
        let cases: Vec<(ErrorKind, &str)> = vec![
            (ErrorKind::Timeout, "Request timeout"),
            (
                ErrorKind::Connection("refused".into()),
                "Connection error: refused",
            ),
            (
                ErrorKind::Json("unexpected EOF".into()),
                "JSON error: unexpected EOF",
            ),
            (
                ErrorKind::InvalidUrl("no scheme".into()),
                "Invalid URL: no scheme",
            ),
            (
                ErrorKind::Config("missing field".into()),
                "Configuration error: missing field",
            ),
            (ErrorKind::Cancelled, "Request cancelled"),
            (ErrorKind::Other("something else".into()), "something else"),
        ];

        for (kind, expected_substring) in cases {
            let display = kind.to_string();
            assert!(
                display.contains(expected_substring),
                "Expected '{display}' to contain '{expected_substring}'"
            );
        }
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<String>("not valid json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err.kind, ErrorKind::Json(_)));
        assert!(err.source.is_some());
    }

    #[test]
    fn test_from_url_parse_error() {
        let url_err = url::Url::parse("not a url").unwrap_err();
        let err: Error = url_err.into();
        assert!(matches!(err.kind, ErrorKind::InvalidUrl(_)));
        assert!(err.to_string().contains("Invalid URL"));
    }
}
