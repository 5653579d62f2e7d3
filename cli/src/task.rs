//! Task references of the form `<app>/<env>#<number>`

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::errors::FreightError;
use crate::http::client::encode_segment;

static TASK_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^/]+)/([^#]+)#([0-9]+)$").expect("task id pattern is valid")
});

/// Identifies a single deploy by app, environment and sequence number
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskReference {
    app: String,
    env: String,
    /// Kept as the captured digits so it is re-emitted verbatim
    number: String,
}

impl TaskReference {
    /// Parse a task id. Whitespace is significant.
    pub fn parse(text: &str) -> Result<Self, FreightError> {
        let caps = TASK_ID_RE.captures(text).ok_or_else(|| {
            FreightError::InvalidReference(
                "Task ID must be in format <app>/<env>#<number>".to_string(),
            )
        })?;

        Ok(Self {
            app: caps[1].to_string(),
            env: caps[2].to_string(),
            number: caps[3].to_string(),
        })
    }

    pub fn app(&self) -> &str {
        &self.app
    }

    pub fn env(&self) -> &str {
        &self.env
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    /// Resource path of the deploy, with trailing slash.
    /// App and environment are percent-encoded as single path segments.
    pub fn api_path(&self) -> String {
        format!(
            "/deploys/{}/{}/{}/",
            encode_segment(&self.app),
            encode_segment(&self.env),
            self.number
        )
    }
}

impl FromStr for TaskReference {
    type Err = FreightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TaskReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.app, self.env, self.number)
    }
}
