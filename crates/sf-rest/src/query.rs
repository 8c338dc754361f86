//! The SOQL query task.

use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::options::Options;
use crate::result::OperationResult;
use crate::task::{finish, require, Session};

/// Input of [`execute_query`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryInput {
    /// Instance URL, e.g. `https://example.my.salesforce.com`.
    pub domain: String,
    /// SOQL statement, e.g. `SELECT Id, Name FROM Account`.
    pub query: String,
}

/// The Query task: run one SOQL statement and return the first page.
///
/// On failure `error_message` carries the first Salesforce error's message.
/// `throw_if_not_found` does not apply to queries.
#[instrument(skip_all)]
pub async fn execute_query(
    input: &QueryInput,
    options: &Options,
    cancel: &CancellationToken,
) -> Result<OperationResult> {
    require(&input.domain, "Domain")?;
    require(&input.query, "Query")?;

    let session = Session::prepare(&input.domain, options)?;
    let (client, token) = session.connect(options, cancel).await?;

    let result = client.query(&input.query, cancel).await?;
    if let Some(total) = result.body.get("totalSize").and_then(|v| v.as_u64()) {
        debug!(total, "Query returned");
    }

    finish(result, &token, options, false)
}
