use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::error::Result;
use crate::result::OperationResult;

impl super::SalesforceRestClient {
    /// Create a record. `POST /sobjects/{sobject}`.
    ///
    /// On success the new id is available through
    /// [`OperationResult::record_id`].
    #[instrument(skip(self, record, cancel))]
    pub async fn create<T: Serialize>(
        &self,
        sobject: &str,
        record: &T,
        cancel: &CancellationToken,
    ) -> Result<OperationResult> {
        let url = self.client.sobject_url(sobject);
        let request = self.client.post(&url).json(record)?;
        self.send(request, cancel).await
    }

    /// Update fields of a record. `PATCH /sobjects/{sobject}/{id}`.
    #[instrument(skip(self, record, cancel))]
    pub async fn update<T: Serialize>(
        &self,
        sobject: &str,
        id: &str,
        record: &T,
        cancel: &CancellationToken,
    ) -> Result<OperationResult> {
        let url = self.client.sobject_record_url(sobject, id);
        let request = self.client.patch(&url).json(record)?;
        self.send(request, cancel).await
    }

    /// Delete a record. `DELETE /sobjects/{sobject}/{id}`.
    #[instrument(skip(self, cancel))]
    pub async fn delete(
        &self,
        sobject: &str,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<OperationResult> {
        let url = self.client.sobject_record_url(sobject, id);
        self.send(self.client.delete(&url), cancel).await
    }
}
