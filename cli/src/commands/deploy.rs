//! Deploy command - start a new deploy.

use std::io::Write;

use clap::Args;
use tracing::info;

use crate::config::Config;
use crate::errors::FreightError;
use crate::http::client::{ApiClient, Transport};
use crate::models::deploy::{DeployRequest, DeploySummary};

/// Arguments for the deploy command.
#[derive(Debug, Args)]
pub struct DeployArgs {
    /// App to deploy.
    pub app: String,

    /// Target environment (server default when omitted).
    #[arg(long)]
    pub env: Option<String>,

    /// Git ref to deploy (server default when omitted).
    #[arg(long = "ref")]
    pub git_ref: Option<String>,

    /// Deploy even if checks fail.
    #[arg(long, short = 'f')]
    pub force: bool,
}

/// Execute the deploy command.
pub async fn execute<T: Transport, W: Write>(
    args: DeployArgs,
    config: &Config,
    client: &ApiClient<T>,
    out: &mut W,
) -> Result<(), FreightError> {
    let request = DeployRequest {
        app: args.app,
        user: config.user.clone(),
        env: args.env,
        git_ref: args.git_ref,
        force: args.force,
    };

    let data = client.create_deploy(&request).await?;
    let summary = DeploySummary::from_value(&data)?;
    info!("Created deploy {}", summary.id);

    match summary.name {
        Some(name) => writeln!(out, "Created new deploy {} (ID = {})", name, summary.id)?,
        None => writeln!(out, "Created new deploy (ID = {})", summary.id)?,
    }

    Ok(())
}
