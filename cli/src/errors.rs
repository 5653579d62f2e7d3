//! Error types for the Freight CLI

use std::fmt;

use thiserror::Error;

/// Boxed error used for transport-layer failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for the Freight CLI
#[derive(Error, Debug)]
pub enum FreightError {
    #[error("{0}")]
    InvalidReference(String),

    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(#[source] BoxError),

    #[error("Protocol error: {0}")]
    Protocol(ApiError),

    #[error("API error: {0}")]
    Api(ApiError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected response: {0}")]
    Render(String),

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("Aborted: {0}")]
    Aborted(String),
}

impl From<reqwest::Error> for FreightError {
    fn from(err: reqwest::Error) -> Self {
        FreightError::Transport(Box::new(err))
    }
}

impl FreightError {
    /// The structured API error carried by protocol and application errors
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            FreightError::Protocol(e) | FreightError::Api(e) => Some(e),
            _ => None,
        }
    }
}

/// Error reported by the Freight API, or synthesized for a non-JSON reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code
    pub code: u16,

    /// Human readable message (`error` field of the body)
    pub error: String,

    /// Machine readable error name (`error_name` field of the body)
    pub error_name: Option<String>,
}

impl ApiError {
    pub fn new(code: u16, error: impl Into<String>) -> Self {
        Self {
            code,
            error: error.into(),
            error_name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.error_name = Some(name.into());
        self
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.error)?;
        if let Some(name) = &self.error_name {
            write!(f, " ({name})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}
