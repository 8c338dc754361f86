//! # sftask-rest
//!
//! Salesforce REST tasks for single records and SOQL queries.
//!
//! ## Features
//!
//! - **Create** - Insert a record and report its new id
//! - **Update** - Change fields of a record, optionally failing on a missing id
//! - **Delete** - Remove a record, optionally failing on a missing id
//! - **Query** - Run a SOQL statement and return the first page
//!
//! Each task authenticates with a supplied access token or with the OAuth
//! 2.0 password grant, sends exactly one request, and returns an
//! [`OperationResult`]. Salesforce rejections and connectivity failures are
//! data in that result; invalid inputs and cancellation are errors.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sftask_rest::{create_sobject, CreateInput, Options};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sftask_rest::Error> {
//!     let input = CreateInput {
//!         domain: "https://myorg.my.salesforce.com".to_string(),
//!         sobject_json: r#"{"Name":"New Account"}"#.to_string(),
//!         sobject_type: "Account".to_string(),
//!     };
//!
//!     let result = create_sobject(
//!         &input,
//!         &Options::access_token("access_token_here"),
//!         &CancellationToken::new(),
//!     )
//!     .await?;
//!
//!     println!("created {:?}", result.record_id());
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod options;
mod query;
mod result;
mod sobject;
mod task;

pub use client::SalesforceRestClient;
pub use error::{Error, ErrorKind, Result};
pub use options::Options;
pub use query::{execute_query, QueryInput};
pub use result::{FailureDetail, OperationResult};
pub use sobject::{create_sobject, delete_sobject, update_sobject, CreateInput, DeleteInput, UpdateInput};

pub use sftask_auth::{Authentication, PasswordCredentials};
pub use sftask_client::{ClientConfig, StatusClass};
