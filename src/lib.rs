//! # sftask
//!
//! Salesforce REST tasks for Rust: authenticate, then create, update, delete
//! or query SObject records with a single HTTP call each.
//!
//! ## Security
//!
//! - Sensitive data (tokens, secrets, passwords) are redacted in Debug output
//! - Tracing/logging skips credential parameters
//! - Error messages are sanitized of token-shaped values
//!
//! ## Crates
//!
//! - **sftask-client** - HTTP client with cancellation, compression and status classification
//! - **sftask-auth** - Access-token and OAuth 2.0 password-grant authentication
//! - **sftask-rest** - The Create, Update, Delete and Query tasks
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sftask::{execute_query, Options, PasswordCredentials, QueryInput, PRODUCTION_TOKEN_URL};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let creds = PasswordCredentials::new(PRODUCTION_TOKEN_URL, client_id, client_secret)
//!         .with_user(username, password)
//!         .with_security_token(security_token);
//!
//!     let input = QueryInput {
//!         domain: "https://myorg.my.salesforce.com".to_string(),
//!         query: "SELECT Id, Name FROM Account LIMIT 10".to_string(),
//!     };
//!
//!     let result = execute_query(&input, &Options::password_grant(creds), &CancellationToken::new())
//!         .await?;
//!
//!     for account in result.body["records"].as_array().into_iter().flatten() {
//!         println!("{}", account["Name"]);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
#[cfg(feature = "auth")]
pub use sftask_auth as auth;
#[cfg(feature = "client")]
pub use sftask_client as client;
#[cfg(feature = "rest")]
pub use sftask_rest as rest;

// Re-export commonly used types at the top level
#[cfg(feature = "auth")]
pub use sftask_auth::{
    authenticate, Authentication, AuthenticateResult, PasswordCredentials, PRODUCTION_TOKEN_URL,
    SANDBOX_TOKEN_URL,
};
#[cfg(feature = "client")]
pub use sftask_client::{ClientConfig, StatusClass, DEFAULT_API_VERSION};
#[cfg(feature = "rest")]
pub use sftask_rest::{
    create_sobject, delete_sobject, execute_query, update_sobject, CreateInput, DeleteInput,
    OperationResult, Options, QueryInput, SalesforceRestClient, UpdateInput,
};
