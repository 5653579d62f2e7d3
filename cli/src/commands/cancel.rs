//! Cancel command - stop a running deploy.

use std::io::Write;

use clap::Args;
use tracing::info;

use crate::errors::FreightError;
use crate::http::client::{ApiClient, Transport};
use crate::models::field_text;
use crate::task::TaskReference;

/// Arguments for the cancel command.
#[derive(Debug, Args)]
pub struct CancelArgs {
    /// Deploy to cancel, as <app>/<env>#<number>.
    pub task_id: String,
}

/// Execute the cancel command.
pub async fn execute<T: Transport, W: Write>(
    args: CancelArgs,
    client: &ApiClient<T>,
    out: &mut W,
) -> Result<(), FreightError> {
    let task = TaskReference::parse(&args.task_id)?;
    let data = client.cancel_deploy(&task).await?;
    let id = field_text(&data, &["id"])?;
    info!("Cancelled deploy {}", task);

    writeln!(out, "Deploy {} (ID = {}) was cancelled.", task, id)?;
    Ok(())
}
