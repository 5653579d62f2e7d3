//! Resolved client configuration

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::errors::FreightError;
use crate::logs::LogLevel;

/// Settings shared by every command. Built once at startup, never mutated.
#[derive(Debug)]
pub struct Config {
    /// Scheme, host and port of the API, without trailing slash
    pub base_url: String,

    /// Path component of the configured base URL, without trailing slash
    pub path_prefix: String,

    /// Credential sent as `Authorization: Key <api_key>`
    pub api_key: SecretString,

    /// Identity attached to deploy requests
    pub user: String,

    /// Verbose diagnostics
    pub debug: bool,

    /// Log level used when `RUST_LOG` is not set
    pub log_level: LogLevel,
}

impl Config {
    /// Build a configuration, splitting the base URL into origin and path prefix
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        user: impl Into<String>,
        debug: bool,
    ) -> Result<Self, FreightError> {
        let (base_url, path_prefix) = split_base_url(base_url)?;

        Ok(Self {
            base_url,
            path_prefix,
            api_key: SecretString::from(api_key.into()),
            user: user.into(),
            debug,
            log_level: LogLevel::default(),
        })
    }

    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }

    /// Origin plus path prefix, the root every API path is appended to
    pub fn api_root(&self) -> String {
        format!("{}{}", self.base_url, self.path_prefix)
    }

    pub(crate) fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

fn split_base_url(raw: &str) -> Result<(String, String), FreightError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| FreightError::Config(format!("Invalid base URL {raw:?}: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") || !url.has_host() {
        return Err(FreightError::Config(format!(
            "Invalid base URL {raw:?}: expected an http(s) URL with a host"
        )));
    }

    let origin = url.origin().ascii_serialization();
    let path_prefix = url.path().trim_end_matches('/').to_string();

    Ok((origin, path_prefix))
}
