//! # sftask-auth
//!
//! Salesforce authentication for the REST tasks.
//!
//! ## Security
//!
//! - Sensitive data (tokens, secrets, passwords) are redacted in Debug output
//! - Tracing/logging skips credential parameters
//! - Error messages sanitize any credential data
//!
//! ## Supported Authentication Methods
//!
//! - **Access token** - a bearer token supplied by the caller, used as-is
//! - **OAuth 2.0 password grant** - username, password and security token
//!   exchanged for a bearer token right before the main request
//!
//! ## Example
//!
//! ```rust,ignore
//! use sftask_auth::{authenticate, PasswordCredentials, PRODUCTION_TOKEN_URL};
//! use tokio_util::sync::CancellationToken;
//!
//! let creds = PasswordCredentials::new(PRODUCTION_TOKEN_URL, client_id, client_secret)
//!     .with_user("user@example.com", password)
//!     .with_security_token(security_token);
//!
//! let result = authenticate(&creds, &CancellationToken::new()).await?;
//! assert!(result.success);
//! ```

mod credentials;
mod error;
mod oauth;

pub use credentials::{Authentication, PasswordCredentials, ResolvedToken};
pub use error::{Error, ErrorKind, Result};
pub use oauth::{authenticate, authenticate_with, AuthenticateResult, TokenProvider, TokenResponse};

/// Token endpoint for production orgs.
pub const PRODUCTION_TOKEN_URL: &str = "https://login.salesforce.com/services/oauth2/token";

/// Token endpoint for sandbox orgs.
pub const SANDBOX_TOKEN_URL: &str = "https://test.salesforce.com/services/oauth2/token";
