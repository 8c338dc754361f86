use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::error::Result;
use crate::result::OperationResult;

impl super::SalesforceRestClient {
    /// Execute a SOQL query. `GET /query/?q={soql}`.
    ///
    /// Returns the first page as Salesforce sent it; `nextRecordsUrl` is not
    /// followed.
    ///
    /// # Security
    ///
    /// The statement is sent verbatim. Escape user-provided values before
    /// interpolating them into a WHERE clause.
    #[instrument(skip(self, soql, cancel))]
    pub async fn query(&self, soql: &str, cancel: &CancellationToken) -> Result<OperationResult> {
        let url = self.client.query_url(soql);
        self.send(self.client.get(&url), cancel).await
    }
}
