//! Log tailing over the offset-based deploy log endpoint

use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::io::Write;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info};

use crate::errors::FreightError;
use crate::http::client::{ApiClient, Transport};
use crate::task::TaskReference;

/// Written once when the first batch has no content
pub const WAITING_PLACEHOLDER: &str = "(waiting for output..)\n";

/// Tailer options
#[derive(Debug, Clone)]
pub struct Options {
    /// Delay between follow-up polls
    pub interval: Duration,

    /// Number of most recent entries requested by the first poll
    pub initial_limit: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(100),
            initial_limit: 1000,
        }
    }
}

/// Server-issued resume position. Opaque: echoed back verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogCursor(String);

impl LogCursor {
    /// Sentinel asking for the most recent entries
    pub fn latest() -> Self {
        Self("-1".to_string())
    }

    fn from_value(value: &Value) -> Result<Self, FreightError> {
        match value {
            Value::String(s) => Ok(Self(s.clone())),
            Value::Number(n) => Ok(Self(n.to_string())),
            other => Err(FreightError::Render(format!(
                "unexpected `nextOffset` value {}",
                other
            ))),
        }
    }
}

impl fmt::Display for LogCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One page of log output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogBatch {
    pub text: String,
    pub next_offset: LogCursor,
}

impl LogBatch {
    /// Decode either a `chunks` array or a flat `text` field
    pub fn from_value(value: &Value) -> Result<Self, FreightError> {
        let next_offset = value
            .get("nextOffset")
            .ok_or_else(|| FreightError::Render("missing field `nextOffset`".to_string()))
            .and_then(LogCursor::from_value)?;

        let text = match (value.get("chunks"), value.get("text")) {
            (Some(Value::Array(chunks)), _) => chunks
                .iter()
                .map(chunk_text)
                .collect::<Result<String, _>>()?,
            (Some(Value::Null) | None, Some(Value::String(text))) => text.clone(),
            (Some(Value::Null) | None, Some(Value::Null) | None) => String::new(),
            _ => {
                return Err(FreightError::Render(
                    "log response has neither `chunks` nor `text`".to_string(),
                ))
            }
        };

        Ok(Self { text, next_offset })
    }
}

fn chunk_text(chunk: &Value) -> Result<&str, FreightError> {
    chunk
        .get("text")
        .and_then(Value::as_str)
        .ok_or_else(|| FreightError::Render("log chunk without `text`".to_string()))
}

/// Stream the log of `task` into `out`.
///
/// Never returns successfully: the loop runs until the process is interrupted
/// or a request fails. There is no detection of task completion.
pub async fn run<T, W, S, F>(
    client: &ApiClient<T>,
    task: &TaskReference,
    options: &Options,
    out: &mut W,
    sleep_fn: S,
) -> Result<Infallible, FreightError>
where
    T: Transport,
    W: Write,
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    info!("Tailing log of {}", task);

    let data = client
        .get_deploy_log(task, &LogCursor::latest(), Some(options.initial_limit))
        .await?;
    let batch = LogBatch::from_value(&data)?;
    if batch.text.is_empty() {
        out.write_all(WAITING_PLACEHOLDER.as_bytes())?;
    } else {
        out.write_all(batch.text.as_bytes())?;
    }
    out.flush()?;
    let mut cursor = batch.next_offset;

    loop {
        let data = client.get_deploy_log(task, &cursor, None).await?;
        let batch = LogBatch::from_value(&data)?;
        debug!("Received {} bytes, next offset {}", batch.text.len(), batch.next_offset);

        out.write_all(batch.text.as_bytes())?;
        out.flush()?;
        cursor = batch.next_offset;

        sleep_fn(options.interval).await;
    }
}
