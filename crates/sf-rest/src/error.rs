//! Error types for sftask-rest.
//!
//! Only problems that stop a task before or outside the Salesforce call are
//! raised as errors. A Salesforce response with a non-success status, or a
//! request that never reached the server, is reported through
//! [`OperationResult`](crate::OperationResult) instead.

/// Result type alias for sftask-rest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sftask-rest operations.
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

    /// Returns true if the task was rejected before any network request.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::MissingInput(_)
                | ErrorKind::InvalidDomain(_)
                | ErrorKind::InvalidAuthentication(_)
                | ErrorKind::InvalidJson(_)
        )
    }

    /// Returns true if the task was cancelled by the caller.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.kind, ErrorKind::Cancelled)
    }

    /// Returns true if a missing record was escalated to an error.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound(_))
    }

    /// Returns true if the record JSON could not be parsed.
    pub fn is_invalid_json(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidJson(_))
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// A required input was blank.
    #[error("{0} cannot be empty")]
    MissingInput(&'static str),

    /// The domain is not an absolute http(s) URL.
    #[error("Domain couldn't be found: {0}")]
    InvalidDomain(String),

    /// The authentication options are unusable.
    #[error("Invalid authentication: {0}")]
    InvalidAuthentication(String),

    /// The record JSON could not be parsed into a flat object.
    #[error("Given input couldn't be parsed to json: {0}")]
    InvalidJson(String),

    /// Update or Delete targeted a record that does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The password grant failed.
    #[error("Token request failed: {0}")]
    TokenRequest(String),

    /// The caller cancelled the task.
    #[error("Task cancelled")]
    Cancelled,

    /// Any other client failure.
    #[error("Client error: {0}")]
    Client(String),
}

impl From<sftask_client::Error> for Error {
    fn from(err: sftask_client::Error) -> Self {
        use sftask_client::ErrorKind as ClientKind;

        let kind = match &err.kind {
            ClientKind::Cancelled => ErrorKind::Cancelled,
            ClientKind::InvalidUrl(msg) => ErrorKind::InvalidDomain(msg.clone()),
            _ => ErrorKind::Client(err.to_string()),
        };
        Error::with_source(kind, err)
    }
}

impl From<sftask_auth::Error> for Error {
    fn from(err: sftask_auth::Error) -> Self {
        let kind = if err.is_cancelled() {
            ErrorKind::Cancelled
        } else if err.is_configuration() {
            ErrorKind::InvalidAuthentication(err.to_string())
        } else {
            ErrorKind::TokenRequest(err.to_string())
        };
        Error::with_source(kind, err)
    }
}
