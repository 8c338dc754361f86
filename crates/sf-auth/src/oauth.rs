//! OAuth 2.0 password grant.
//!
//! A token is fetched cold for every call that asks for one. There is no
//! caching, refresh, or expiry tracking.

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use sftask_client::{ClientConfig, SfHttpClient};

use crate::credentials::PasswordCredentials;
use crate::error::{Error, ErrorKind, Result};

/// Performs the OAuth 2.0 password grant against a Salesforce token endpoint.
#[derive(Debug, Clone)]
pub struct TokenProvider {
    http: SfHttpClient,
}

impl TokenProvider {
    /// Create a provider with the default HTTP configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a provider with custom HTTP configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            http: SfHttpClient::new(config)?,
        })
    }

    /// Create a provider sharing an existing HTTP client.
    pub fn from_http(http: SfHttpClient) -> Self {
        Self { http }
    }

    /// Exchange username, password and security token for an access token.
    ///
    /// Sends one form-encoded POST to `creds.login_url`. A non-success
    /// status is returned as [`ErrorKind::OAuth`]; a success body without
    /// `access_token` is a JSON error.
    #[instrument(skip(self, creds, cancel), fields(login_url = %creds.login_url))]
    pub async fn fetch_token(
        &self,
        creds: &PasswordCredentials,
        cancel: &CancellationToken,
    ) -> Result<TokenResponse> {
        let password = creds.password_with_security_token();
        let params = [
            ("grant_type", "password"),
            ("client_id", creds.client_id.as_str()),
            ("client_secret", creds.client_secret()),
            ("username", creds.username.as_str()),
            ("password", password.as_str()),
        ];

        let request = self.http.post(creds.login_url.trim()).form(&params)?;
        let response = self.http.execute(request, cancel).await?;

        if !response.is_success() {
            let error: OAuthErrorResponse = response.json().unwrap_or_default();
            info!(status = response.status(), error = %error.error, "Token request rejected");
            return Err(Error::new(ErrorKind::OAuth {
                status: response.status(),
                reason: response.status_text().to_string(),
                error: error.error,
                description: error.error_description,
            }));
        }

        let token: TokenResponse = response.json()?;
        Ok(token)
    }
}

/// Token response from the token endpoint.
///
/// Sensitive fields are redacted in Debug output.
#[derive(Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    /// Access token.
    pub access_token: String,
    /// Instance URL of the org the user belongs to.
    #[serde(default)]
    pub instance_url: Option<String>,
    /// Identity URL.
    #[serde(default)]
    pub id: Option<String>,
    /// Token type (usually "Bearer").
    #[serde(default)]
    pub token_type: Option<String>,
    /// Issued at timestamp.
    #[serde(default)]
    pub issued_at: Option<String>,
    /// Signature for verification.
    #[serde(default)]
    pub signature: Option<String>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("instance_url", &self.instance_url)
            .field("id", &self.id)
            .field("token_type", &self.token_type)
            .field("issued_at", &self.issued_at)
            .field("signature", &self.signature.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// OAuth error response.
#[derive(Debug, Default, Deserialize)]
struct OAuthErrorResponse {
    #[serde(default)]
    error: String,
    #[serde(default)]
    error_description: String,
}

/// Outcome of the Authenticate task.
#[derive(Clone, Serialize)]
pub struct AuthenticateResult {
    /// True when a token was obtained.
    pub success: bool,
    /// The access token.
    pub access_token: String,
}

impl std::fmt::Debug for AuthenticateResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticateResult")
            .field("success", &self.success)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// The Authenticate task: fetch an access token with the password grant.
///
/// Rejected credentials are raised as an error whose message carries the
/// HTTP reason phrase (e.g. `Bad Request`).
pub async fn authenticate(
    creds: &PasswordCredentials,
    cancel: &CancellationToken,
) -> Result<AuthenticateResult> {
    authenticate_with(&TokenProvider::new()?, creds, cancel).await
}

/// [`authenticate`] with a caller-supplied provider.
pub async fn authenticate_with(
    provider: &TokenProvider,
    creds: &PasswordCredentials,
    cancel: &CancellationToken,
) -> Result<AuthenticateResult> {
    creds.validate()?;

    let token = provider.fetch_token(creds, cancel).await?;
    Ok(AuthenticateResult {
        success: true,
        access_token: token.access_token,
    })
}
