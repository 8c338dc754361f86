//! Credentials and the authentication selector.
//!
//! All credential types implement custom Debug to redact sensitive data.

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{Error, ErrorKind, Result};
use crate::oauth::TokenProvider;

/// Inputs of the OAuth 2.0 password grant.
///
/// Sensitive fields are redacted in Debug output.
#[derive(Clone, Default)]
pub struct PasswordCredentials {
    /// Token endpoint, e.g. `https://login.salesforce.com/services/oauth2/token`.
    pub login_url: String,
    /// Connected app consumer key.
    pub client_id: String,
    client_secret: String,
    /// Salesforce username.
    pub username: String,
    password: String,
    security_token: String,
}

impl std::fmt::Debug for PasswordCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordCredentials")
            .field("login_url", &self.login_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("security_token", &"[REDACTED]")
            .finish()
    }
}

impl PasswordCredentials {
    /// Create credentials for the given token endpoint and connected app.
    pub fn new(
        login_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            login_url: login_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            ..Self::default()
        }
    }

    /// Set the username and password.
    pub fn with_user(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Set the user's security token.
    pub fn with_security_token(mut self, security_token: impl Into<String>) -> Self {
        self.security_token = security_token.into();
        self
    }

    /// Check that the token endpoint is an absolute `http(s)` URL.
    pub fn validate(&self) -> Result<()> {
        let login_url = self.login_url.trim();
        if login_url.is_empty() {
            return Err(Error::new(ErrorKind::InvalidInput(
                "Login URL cannot be empty".to_string(),
            )));
        }

        match url::Url::parse(login_url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => {
                Ok(())
            }
            _ => Err(Error::new(ErrorKind::InvalidInput(format!(
                "Login URL must be an absolute http(s) URL, got '{}'",
                login_url
            )))),
        }
    }

    /// Get the client secret (for internal use).
    pub(crate) fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// The password as submitted to Salesforce: password followed by the
    /// security token.
    pub(crate) fn password_with_security_token(&self) -> String {
        format!("{}{}", self.password, self.security_token)
    }
}

/// How a task obtains its bearer token.
#[derive(Clone)]
pub enum Authentication {
    /// Use this token as-is.
    AccessToken(String),
    /// Fetch a token with the OAuth 2.0 password grant before the main call.
    PasswordGrant(PasswordCredentials),
}

impl std::fmt::Debug for Authentication {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Authentication::AccessToken(_) => f.debug_tuple("AccessToken").field(&"[REDACTED]").finish(),
            Authentication::PasswordGrant(creds) => {
                f.debug_tuple("PasswordGrant").field(creds).finish()
            }
        }
    }
}

impl Default for Authentication {
    fn default() -> Self {
        Authentication::AccessToken(String::new())
    }
}

impl Authentication {
    /// Returns true for [`Authentication::PasswordGrant`].
    pub fn is_password_grant(&self) -> bool {
        matches!(self, Authentication::PasswordGrant(_))
    }

    /// Check the selector without touching the network.
    ///
    /// A blank access token or an unusable login URL is rejected here so
    /// that no request is ever sent with them.
    pub fn validate(&self) -> Result<()> {
        match self {
            Authentication::AccessToken(token) if token.trim().is_empty() => {
                Err(Error::new(ErrorKind::InvalidAccessToken))
            }
            Authentication::AccessToken(_) => Ok(()),
            Authentication::PasswordGrant(creds) => creds.validate(),
        }
    }

    /// Produce the bearer token for the main request.
    pub async fn resolve(
        &self,
        provider: &TokenProvider,
        cancel: &CancellationToken,
    ) -> Result<ResolvedToken> {
        self.validate()?;

        match self {
            Authentication::AccessToken(token) => Ok(ResolvedToken {
                token: token.clone(),
                fetched: false,
            }),
            Authentication::PasswordGrant(creds) => {
                debug!(username = %creds.username, "Fetching access token with password grant");
                let response = provider.fetch_token(creds, cancel).await?;
                Ok(ResolvedToken {
                    token: response.access_token,
                    fetched: true,
                })
            }
        }
    }
}

/// A bearer token ready for use, and whether it was fetched for this call.
#[derive(Clone)]
pub struct ResolvedToken {
    token: String,
    fetched: bool,
}

impl std::fmt::Debug for ResolvedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedToken")
            .field("token", &"[REDACTED]")
            .field("fetched", &self.fetched)
            .finish()
    }
}

impl ResolvedToken {
    /// The bearer token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns true if the token came from the password grant.
    pub fn was_fetched(&self) -> bool {
        self.fetched
    }

    /// The token to echo back to the caller: only a fetched token, and only
    /// when asked for.
    pub fn echo(&self, requested: bool) -> Option<String> {
        (requested && self.fetched).then(|| self.token.clone())
    }
}
