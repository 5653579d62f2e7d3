//! HTTP client implementation

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{header, Client};
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::config::Config;
use crate::errors::{ApiError, FreightError};

/// The only response media type the API is allowed to answer with
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Fixed client identifier sent as the user agent
pub const USER_AGENT: &str = "freight-cli";

/// Characters escaped inside a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encode a value for use as one URL path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// HTTP verbs used by the Freight API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Whether a request body may be attached
    pub fn allows_body(self) -> bool {
        !matches!(self, Method::Get)
    }

    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_reqwest().as_str())
    }
}

/// A fully resolved request handed to a transport
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
}

/// Raw response as seen on the wire
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl RawResponse {
    pub fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            content_type: Some(JSON_CONTENT_TYPE.to_string()),
            body: body.to_string(),
        }
    }
}

/// Performs a single HTTP exchange. Separated from [`ApiClient`] for testability.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, FreightError>;
}

/// Production transport backed by a single reused `reqwest::Client`
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport authenticating with the given API key
    pub fn new(api_key: &str) -> Result<Self, FreightError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .default_headers(default_headers(api_key)?)
            .build()?;

        Ok(Self { client })
    }
}

/// Headers attached to every request
pub fn default_headers(api_key: &str) -> Result<header::HeaderMap, FreightError> {
    let mut auth = header::HeaderValue::from_str(&format!("Key {}", api_key))
        .map_err(|_| FreightError::Config("API key contains invalid header characters".into()))?;
    auth.set_sensitive(true);

    let mut headers = header::HeaderMap::new();
    headers.insert(header::AUTHORIZATION, auth);
    headers.insert(header::ACCEPT, header::HeaderValue::from_static(JSON_CONTENT_TYPE));
    headers.insert(header::USER_AGENT, header::HeaderValue::from_static(USER_AGENT));
    Ok(headers)
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, FreightError> {
        let mut builder = self.client.request(request.method.as_reqwest(), &request.url);
        if let Some(body) = &request.body {
            // sets Content-Type: application/json
            builder = builder.json(body);
        }

        let response = builder.send().await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());
        let body = response.text().await?;

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}

/// Authenticated client for the Freight API
pub struct ApiClient<T = ReqwestTransport> {
    transport: T,
    api_root: String,
}

impl ApiClient<ReqwestTransport> {
    /// Create a client from configuration
    pub fn from_config(config: &Config) -> Result<Self, FreightError> {
        let transport = ReqwestTransport::new(config.api_key())?;
        Ok(Self::new(transport, config.api_root()))
    }
}

impl<T: Transport> ApiClient<T> {
    /// Create a client over an arbitrary transport
    pub fn new(transport: T, api_root: impl Into<String>) -> Self {
        Self {
            transport,
            api_root: api_root.into().trim_end_matches('/').to_string(),
        }
    }

    /// Get the API root (origin plus path prefix)
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Perform one request and decode the JSON reply.
    ///
    /// # Panics
    ///
    /// Panics if a body is supplied with [`Method::Get`]; no request is sent.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, FreightError> {
        assert!(
            body.is_none() || method.allows_body(),
            "a request body cannot be sent with {method}"
        );

        let url = format!("{}{}", self.api_root, path);
        debug!("{} {}", method, url);

        let response = self
            .transport
            .send(ApiRequest { method, url, body })
            .await?;
        trace!(
            status = response.status,
            content_type = ?response.content_type,
            "Received response"
        );

        decode_response(response)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Value, FreightError> {
        self.request(Method::Get, path, None).await
    }

    /// Make a POST request
    pub async fn post(&self, path: &str, body: Value) -> Result<Value, FreightError> {
        self.request(Method::Post, path, Some(body)).await
    }

    /// Make a PUT request
    pub async fn put(&self, path: &str, body: Value) -> Result<Value, FreightError> {
        self.request(Method::Put, path, Some(body)).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> Result<Value, FreightError> {
        self.request(Method::Delete, path, None).await
    }
}

/// Map a raw response onto a JSON value or a structured error.
/// The content type is checked before the status code.
pub fn decode_response(response: RawResponse) -> Result<Value, FreightError> {
    let content_type = response.content_type.as_deref();
    if content_type != Some(JSON_CONTENT_TYPE) {
        let actual = content_type.unwrap_or("<none>");
        warn!("Unexpected content type {} (status {})", actual, response.status);
        return Err(FreightError::Protocol(ApiError::new(
            response.status,
            format!("Invalid content type: {}", actual),
        )));
    }

    let data: Value = serde_json::from_str(&response.body)?;

    if (200..300).contains(&response.status) {
        return Ok(data);
    }

    let error = data
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let error_name = data
        .get("error_name")
        .and_then(Value::as_str)
        .map(str::to_string);
    warn!("API request failed: {} - {}", response.status, error);

    Err(FreightError::Api(ApiError {
        code: response.status,
        error,
        error_name,
    }))
}
