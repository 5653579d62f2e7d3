//! Command-line argument parsing with clap.

use clap::{Parser, Subcommand};

use crate::commands::app::{AppCreateArgs, AppDeleteArgs};
use crate::commands::cancel::CancelArgs;
use crate::commands::deploy::DeployArgs;
use crate::commands::status::StatusArgs;
use crate::commands::tail::TailArgs;
use crate::commands::webhook::WebhookCreateArgs;
use crate::config::Config;
use crate::errors::FreightError;
use crate::logs::LogLevel;

/// Prefix of the legacy environment variables
const LEGACY_ENV_PREFIX: &str = "DS_";

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", built ",
    env!("BUILD_TIME"),
    ")"
);

/// Command line interface to Freight.
#[derive(Parser, Debug)]
#[command(name = "freight")]
#[command(version, long_version = LONG_VERSION, about, long_about = None)]
pub struct Cli {
    /// API key used to authenticate.
    #[arg(long, env = "FREIGHT_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the Freight API, including any path prefix.
    #[arg(long, env = "FREIGHT_BASE_URL")]
    pub base_url: Option<String>,

    /// User the deploys are attributed to.
    #[arg(long, env = "FREIGHT_USER")]
    pub user: Option<String>,

    /// Enable verbose diagnostics.
    #[arg(long, env = "FREIGHT_DEBUG", overrides_with = "no_debug")]
    pub debug: bool,

    /// Disable verbose diagnostics.
    #[arg(long, overrides_with = "debug")]
    pub no_debug: bool,

    /// Log level when RUST_LOG is not set.
    #[arg(long, env = "FREIGHT_LOG_LEVEL", default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start a new deploy.
    Deploy(DeployArgs),

    /// Show the status of a deploy.
    Status(StatusArgs),

    /// Stream the log of a deploy.
    Tail(TailArgs),

    /// Cancel a deploy.
    Cancel(CancelArgs),

    /// App management commands.
    App {
        /// App subcommand to execute.
        #[command(subcommand)]
        command: AppCommands,
    },

    /// Webhook helpers.
    Webhook {
        /// Webhook subcommand to execute.
        #[command(subcommand)]
        command: WebhookCommands,
    },
}

/// App subcommands.
#[derive(Subcommand, Debug)]
pub enum AppCommands {
    /// List all apps.
    List,

    /// Show an app.
    Show {
        /// App name.
        app: String,
    },

    /// Create an app.
    Create(AppCreateArgs),

    /// Edit an app in $EDITOR.
    Edit {
        /// App name.
        app: String,
    },

    /// Delete an app.
    Delete(AppDeleteArgs),
}

/// Webhook subcommands.
#[derive(Subcommand, Debug)]
pub enum WebhookCommands {
    /// Print a signed webhook URL.
    Create(WebhookCreateArgs),
}

impl Cli {
    /// Resolve the effective configuration.
    ///
    /// Flags and `FREIGHT_*` variables are handled by clap; `lookup` supplies
    /// the legacy `DS_*` variables as a fallback.
    pub fn config<F>(&self, lookup: F) -> Result<Config, FreightError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let legacy = |name: &str| lookup(&format!("{}{}", LEGACY_ENV_PREFIX, name));
        let required = |value: &Option<String>, flag: &str, name: &str| {
            value
                .clone()
                .or_else(|| legacy(name))
                .filter(|v| !v.is_empty())
                .ok_or_else(|| {
                    FreightError::Usage(format!(
                        "Missing option --{} (or FREIGHT_{} / {}{})",
                        flag, name, LEGACY_ENV_PREFIX, name
                    ))
                })
        };

        let api_key = required(&self.api_key, "api-key", "API_KEY")?;
        let base_url = required(&self.base_url, "base-url", "BASE_URL")?;
        let user = required(&self.user, "user", "USER")?;

        let debug = if self.no_debug {
            false
        } else {
            self.debug || legacy("DEBUG").is_some_and(|v| is_truthy(&v))
        };

        Ok(Config::new(&base_url, api_key, user, debug)?.with_log_level(self.log_level))
    }
}

fn is_truthy(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "" | "0" | "n" | "no" | "f" | "false" | "off"
    )
}
