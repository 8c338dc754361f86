//! Error types for sftask-auth.
//!
//! Error messages are designed to avoid exposing sensitive credential data.

/// Result type alias for sftask-auth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sftask-auth operations.
///
/// Error messages are sanitized to prevent accidental credential exposure.
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

    /// Returns true if the token request was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.kind, ErrorKind::Cancelled)
    }

    /// Returns true if the call was rejected before any network request.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::InvalidAccessToken | ErrorKind::InvalidInput(_)
        )
    }
}

/// The kind of error that occurred.
///
/// Error messages avoid including credential values.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// The token endpoint answered with a non-success status.
    #[error("OAuth error ({status} {reason}): {error} - {description}")]
    OAuth {
        status: u16,
        reason: String,
        error: String,
        description: String,
    },

    /// Access-token authentication was selected but the token is blank.
    #[error("Access token cannot be empty when using access token authentication")]
    InvalidAccessToken,

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Transport error during authentication.
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The token request was cancelled.
    #[error("Token request cancelled")]
    Cancelled,

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<sftask_client::Error> for Error {
    fn from(err: sftask_client::Error) -> Self {
        use sftask_client::ErrorKind as ClientKind;

        let kind = match &err.kind {
            ClientKind::Cancelled => ErrorKind::Cancelled,
            ClientKind::Json(msg) => ErrorKind::Json(msg.clone()),
            ClientKind::Serialization(msg) => ErrorKind::Serialization(msg.clone()),
            ClientKind::InvalidUrl(msg) => ErrorKind::InvalidInput(format!("login URL: {}", msg)),
            _ => {
                // Sanitize any potential credential exposure
                let message = err.to_string();
                let sanitized = if message.contains("password") || message.contains("token=") {
                    "HTTP request failed (details redacted for security)".to_string()
                } else {
                    message
                };
                ErrorKind::Http(sanitized)
            }
        };

        Error::with_source(kind, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display() {
        let err = ErrorKind::OAuth {
            status: 400,
            reason: "Bad Request".to_string(),
            error: "invalid_grant".to_string(),
            description: "authentication failure".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "OAuth error (400 Bad Request): invalid_grant - authentication failure"
        );
    }

    #[test]
    fn test_configuration_errors() {
        assert!(Error::new(ErrorKind::InvalidAccessToken).is_configuration());
        assert!(Error::new(ErrorKind::InvalidInput("x".into())).is_configuration());
        assert!(!Error::new(ErrorKind::Cancelled).is_configuration());
    }

    #[test]
    fn test_client_cancellation_maps_to_cancelled() {
        let err: Error = sftask_client::Error::new(sftask_client::ErrorKind::Cancelled).into();
        assert!(err.is_cancelled());
    }

    #[test]
    fn test_client_errors_redact_credentials() {
        let err: Error = sftask_client::Error::new(sftask_client::ErrorKind::Other(
            "error sending request with password=hunter2".to_string(),
        ))
        .into();
        let msg = err.to_string();
        assert!(!msg.contains("hunter2"));
        assert!(msg.contains("redacted"));
    }
}
