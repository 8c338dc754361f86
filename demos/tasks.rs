//! Runs every task against a real org, in order:
//! Authenticate, Create, Query, Update and Delete of one Account.
//!
//! Required environment variables:
//! - SF_DOMAIN (e.g. https://myorg.my.salesforce.com)
//! - SF_CLIENT_ID, SF_CLIENT_SECRET
//! - SF_USERNAME, SF_PASSWORD
//! Optional:
//! - SF_SECURITY_TOKEN
//! - SF_TOKEN_URL (defaults to the production login endpoint)
//!
//! Press Ctrl-C to cancel the task in flight.
//!
//! Run with: cargo run --example tasks

use sftask::{
    authenticate, create_sobject, delete_sobject, execute_query, update_sobject, CreateInput,
    DeleteInput, OperationResult, Options, PasswordCredentials, QueryInput, UpdateInput,
    PRODUCTION_TOKEN_URL,
};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

fn env(name: &str) -> Result<String, Box<dyn std::error::Error>> {
    std::env::var(name).map_err(|_| format!("{} is not set", name).into())
}

fn report(task: &str, result: &OperationResult) {
    if result.request_succeeded {
        println!("✓ {} ({:?})", task, result.status);
    } else {
        println!(
            "✗ {} failed: {}",
            task,
            result.error_message.as_deref().unwrap_or("unknown error")
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sftask=info")),
        )
        .init();

    let domain = env("SF_DOMAIN")?;
    let token_url = std::env::var("SF_TOKEN_URL").unwrap_or_else(|_| PRODUCTION_TOKEN_URL.into());
    let creds = PasswordCredentials::new(token_url, env("SF_CLIENT_ID")?, env("SF_CLIENT_SECRET")?)
        .with_user(env("SF_USERNAME")?, env("SF_PASSWORD")?)
        .with_security_token(std::env::var("SF_SECURITY_TOKEN").unwrap_or_default());

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            trigger.cancel();
        }
    });

    println!("=== Salesforce Tasks ===\n");

    let auth = authenticate(&creds, &cancel).await?;
    println!("✓ Authenticate (success: {})", auth.success);

    // Reuse the fetched token for the remaining tasks.
    let options = Options::access_token(auth.access_token).with_throw_if_not_found(true);

    let created = create_sobject(
        &CreateInput {
            domain: domain.clone(),
            sobject_json: r#"{"Name":"sftask demo account"}"#.to_string(),
            sobject_type: "Account".to_string(),
        },
        &options,
        &cancel,
    )
    .await?;
    report("Create", &created);

    let Some(id) = created.record_id().map(str::to_string) else {
        return Ok(());
    };
    println!("  Id: {}", id);

    let queried = execute_query(
        &QueryInput {
            domain: domain.clone(),
            query: format!("SELECT Id, Name FROM Account WHERE Id = '{}'", id),
        },
        &options,
        &cancel,
    )
    .await?;
    report("Query", &queried);
    println!("  totalSize: {}", queried.body["totalSize"]);

    let updated = update_sobject(
        &UpdateInput {
            domain: domain.clone(),
            sobject_id: id.clone(),
            sobject_json: r#"{"Name":"sftask demo account (renamed)"}"#.to_string(),
            sobject_type: "Account".to_string(),
        },
        &options,
        &cancel,
    )
    .await?;
    report("Update", &updated);

    let deleted = delete_sobject(
        &DeleteInput {
            domain,
            sobject_id: id,
            sobject_type: "Account".to_string(),
        },
        &options,
        &cancel,
    )
    .await?;
    report("Delete", &deleted);

    Ok(())
}
