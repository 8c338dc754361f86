//! Options shared by every REST task.

use sftask_auth::{Authentication, PasswordCredentials};
use sftask_client::{normalize_api_version, ClientConfig, DEFAULT_API_VERSION};

/// How a task authenticates and what it reports back.
///
/// # Example
///
/// ```rust,ignore
/// use sftask_rest::Options;
///
/// let options = Options::password_grant(creds)
///     .with_return_access_token(true)
///     .with_throw_if_not_found(true);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Where the bearer token comes from.
    pub authentication: Authentication,
    /// Echo a token fetched by the password grant in the result.
    pub return_access_token: bool,
    /// Update/Delete only: raise [`ErrorKind::NotFound`](crate::ErrorKind::NotFound)
    /// when the record does not exist.
    pub throw_if_not_found: bool,
    /// REST API version, with or without the `v` prefix.
    pub api_version: String,
    /// HTTP configuration for both the token and the main request.
    pub http: ClientConfig,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            authentication: Authentication::default(),
            return_access_token: false,
            throw_if_not_found: false,
            api_version: DEFAULT_API_VERSION.to_string(),
            http: ClientConfig::default(),
        }
    }
}

impl Options {
    /// Authenticate with a caller-supplied bearer token.
    pub fn access_token(token: impl Into<String>) -> Self {
        Self {
            authentication: Authentication::AccessToken(token.into()),
            ..Self::default()
        }
    }

    /// Authenticate with the OAuth 2.0 password grant.
    pub fn password_grant(credentials: PasswordCredentials) -> Self {
        Self {
            authentication: Authentication::PasswordGrant(credentials),
            ..Self::default()
        }
    }

    pub fn with_return_access_token(mut self, enabled: bool) -> Self {
        self.return_access_token = enabled;
        self
    }

    pub fn with_throw_if_not_found(mut self, enabled: bool) -> Self {
        self.throw_if_not_found = enabled;
        self
    }

    /// Set the API version. Accepts `"v61.0"` or `"61.0"`.
    pub fn with_api_version(mut self, version: impl AsRef<str>) -> Self {
        self.api_version = normalize_api_version(version.as_ref());
        self
    }

    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.http = config;
        self
    }
}
