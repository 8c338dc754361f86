//! Create, update and delete tasks for single SObject records.

use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use crate::error::Result;
use crate::options::Options;
use crate::result::OperationResult;
use crate::task::{finish, parse_record, require, Session};

/// Input of [`create_sobject`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateInput {
    /// Instance URL, e.g. `https://example.my.salesforce.com`.
    pub domain: String,
    /// The record as a flat JSON object, e.g. `{"Name":"Acme"}`.
    pub sobject_json: String,
    /// Object type, e.g. `Account`.
    pub sobject_type: String,
}

/// Input of [`update_sobject`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateInput {
    pub domain: String,
    /// Id of the record to update.
    pub sobject_id: String,
    /// Fields to change as a flat JSON object.
    pub sobject_json: String,
    pub sobject_type: String,
}

/// Input of [`delete_sobject`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteInput {
    pub domain: String,
    /// Id of the record to delete.
    pub sobject_id: String,
    pub sobject_type: String,
}

/// The Create task: insert one record.
///
/// The new record id is available through [`OperationResult::record_id`].
#[instrument(skip_all, fields(sobject = %input.sobject_type))]
pub async fn create_sobject(
    input: &CreateInput,
    options: &Options,
    cancel: &CancellationToken,
) -> Result<OperationResult> {
    require(&input.domain, "Domain")?;
    require(&input.sobject_json, "SObject JSON")?;
    require(&input.sobject_type, "SObject type")?;

    let session = Session::prepare(&input.domain, options)?;
    let record = parse_record(&input.sobject_json)?;
    let (client, token) = session.connect(options, cancel).await?;

    let result = client.create(&input.sobject_type, &record, cancel).await?;
    if let Some(id) = result.record_id() {
        info!(id, "Record created");
    }

    finish(result, &token, options, false)
}

/// The Update task: change fields of one record.
///
/// A missing record is reported in the result, or raised as
/// [`ErrorKind::NotFound`](crate::ErrorKind::NotFound) when
/// `options.throw_if_not_found` is set.
#[instrument(skip_all, fields(sobject = %input.sobject_type, id = %input.sobject_id))]
pub async fn update_sobject(
    input: &UpdateInput,
    options: &Options,
    cancel: &CancellationToken,
) -> Result<OperationResult> {
    require(&input.domain, "Domain")?;
    require(&input.sobject_id, "SObject id")?;
    require(&input.sobject_json, "SObject JSON")?;
    require(&input.sobject_type, "SObject type")?;

    let session = Session::prepare(&input.domain, options)?;
    let record = parse_record(&input.sobject_json)?;
    let (client, token) = session.connect(options, cancel).await?;

    let result = client
        .update(&input.sobject_type, &input.sobject_id, &record, cancel)
        .await?;

    finish(result, &token, options, true)
}

/// The Delete task: remove one record.
///
/// Not-found handling follows [`update_sobject`].
#[instrument(skip_all, fields(sobject = %input.sobject_type, id = %input.sobject_id))]
pub async fn delete_sobject(
    input: &DeleteInput,
    options: &Options,
    cancel: &CancellationToken,
) -> Result<OperationResult> {
    require(&input.domain, "Domain")?;
    require(&input.sobject_id, "SObject id")?;
    require(&input.sobject_type, "SObject type")?;

    let session = Session::prepare(&input.domain, options)?;
    let (client, token) = session.connect(options, cancel).await?;

    let result = client
        .delete(&input.sobject_type, &input.sobject_id, cancel)
        .await?;

    finish(result, &token, options, true)
}
