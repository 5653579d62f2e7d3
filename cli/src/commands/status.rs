//! Status command - show the state of a deploy.

use std::io::Write;

use clap::Args;

use crate::errors::FreightError;
use crate::http::client::{ApiClient, Transport};
use crate::models::deploy::DeployStatus;
use crate::render::status_block;
use crate::task::TaskReference;

/// Arguments for the status command.
#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Deploy to inspect, as <app>/<env>#<number>.
    pub task_id: String,
}

/// Execute the status command.
pub async fn execute<T: Transport, W: Write>(
    args: StatusArgs,
    client: &ApiClient<T>,
    out: &mut W,
    color: bool,
) -> Result<(), FreightError> {
    let task = TaskReference::parse(&args.task_id)?;
    let data = client.get_deploy(&task).await?;
    let status = DeployStatus::from_value(&data)?;

    out.write_all(status_block(&status, color).as_bytes())?;
    Ok(())
}
