//! # sftask-client
//!
//! Core HTTP client infrastructure for the Salesforce REST tasks.
//!
//! This crate provides the foundational HTTP client with:
//! - Single-shot request execution (no retries, no token caching)
//! - Cooperative cancellation of in-flight requests
//! - Fully buffered responses with a normalized status classification
//! - Compression support (gzip, deflate)
//! - Request/response tracing
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Task Layer                               │
//! │  (sftask-auth: Authenticate, sftask-rest: SObject tasks)    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   SalesforceClient                          │
//! │  - Holds domain, bearer token and API version               │
//! │  - Builds sobject / query URLs                              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    SfHttpClient                             │
//! │  - Raw HTTP with cancellation and compression               │
//! │  - Buffered responses classified by StatusClass             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use sftask_client::SalesforceClient;
//! use tokio_util::sync::CancellationToken;
//!
//! let client = SalesforceClient::new("https://example.my.salesforce.com", token)?;
//! let cancel = CancellationToken::new();
//!
//! let response = client
//!     .execute(client.get(&client.query_url("SELECT Id FROM Account")), &cancel)
//!     .await?;
//!
//! println!("{} {:?}", response.status(), response.status_class());
//! ```

mod client;
mod config;
mod error;
mod request;
mod response;
mod salesforce_client;

pub use client::SfHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use request::{RequestBuilder, RequestMethod};
pub use response::{sanitize_error_message, Response, SalesforceErrorBody, StatusClass};
pub use salesforce_client::{normalize_api_version, SalesforceClient};

/// Default Salesforce REST API version, including the `v` prefix used in URLs.
pub const DEFAULT_API_VERSION: &str = "v61.0";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("sftask/", env!("CARGO_PKG_VERSION"));
