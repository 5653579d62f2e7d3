//! Webhook command - print a signed webhook URL.

use std::io::Write;

use clap::Args;

use crate::config::Config;
use crate::errors::FreightError;
use crate::webhook::Webhook;

/// Arguments for the webhook create command.
#[derive(Debug, Args)]
pub struct WebhookCreateArgs {
    /// Hook type.
    #[arg(long, default_value = "github")]
    pub hook: String,

    /// Action triggered by the hook.
    #[arg(long, default_value = "deploy")]
    pub action: String,

    /// App the hook applies to.
    #[arg(long)]
    pub app: String,

    /// Environment the hook applies to.
    #[arg(long, default_value = "production")]
    pub env: String,
}

/// Execute the webhook create command. No request is made.
pub fn execute<W: Write>(
    args: WebhookCreateArgs,
    config: &Config,
    out: &mut W,
) -> Result<(), FreightError> {
    let webhook = Webhook {
        hook: args.hook,
        action: args.action,
        app: args.app,
        env: args.env,
    };

    writeln!(out, "{}", webhook.url(&config.base_url, config.api_key()))?;
    Ok(())
}
