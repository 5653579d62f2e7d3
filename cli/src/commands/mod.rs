//! One module per CLI verb

pub mod app;
pub mod cancel;
pub mod deploy;
pub mod status;
pub mod tail;
pub mod webhook;

use std::io::Write;

use crate::cli::{Commands, WebhookCommands};
use crate::config::Config;
use crate::errors::FreightError;
use crate::http::ApiClient;

/// Run a parsed command against the live API.
///
/// The HTTP client is only built for commands that talk to the server.
pub async fn run<W: Write>(
    command: Commands,
    config: &Config,
    out: &mut W,
    color: bool,
) -> Result<(), FreightError> {
    let client = || ApiClient::from_config(config);

    match command {
        Commands::Deploy(args) => deploy::execute(args, config, &client()?, out).await,
        Commands::Status(args) => status::execute(args, &client()?, out, color).await,
        Commands::Tail(args) => tail::execute(args, &client()?, out).await,
        Commands::Cancel(args) => cancel::execute(args, &client()?, out).await,
        Commands::App { command } => app::execute(command, &client()?, out).await,
        Commands::Webhook {
            command: WebhookCommands::Create(args),
        } => webhook::execute(args, config, out),
    }
}
