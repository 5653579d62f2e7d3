//! Tail command - stream the log of a deploy.

use std::io::Write;
use std::time::Duration;

use clap::Args;

use crate::errors::FreightError;
use crate::http::client::{ApiClient, Transport};
use crate::tail::{self, Options};
use crate::task::TaskReference;

/// Arguments for the tail command.
#[derive(Debug, Args)]
pub struct TailArgs {
    /// Deploy to follow, as <app>/<env>#<number>.
    pub task_id: String,

    /// Keep polling for new output. Tailing always follows; accepted for compatibility.
    #[arg(long, short = 'f')]
    pub follow: bool,

    /// Seconds to wait between polls.
    #[arg(long, short = 'i', default_value_t = 0.1)]
    pub interval: f64,
}

impl TailArgs {
    fn options(&self) -> Result<Options, FreightError> {
        let interval = Duration::try_from_secs_f64(self.interval).map_err(|_| {
            FreightError::Usage(format!(
                "--interval must be a non-negative number of seconds, got {}",
                self.interval
            ))
        })?;

        Ok(Options {
            interval,
            ..Options::default()
        })
    }
}

/// Execute the tail command. Runs until interrupted or a request fails.
pub async fn execute<T: Transport, W: Write>(
    args: TailArgs,
    client: &ApiClient<T>,
    out: &mut W,
) -> Result<(), FreightError> {
    let task = TaskReference::parse(&args.task_id)?;
    let options = args.options()?;

    match tail::run(client, &task, &options, out, tokio::time::sleep).await? {}
}
