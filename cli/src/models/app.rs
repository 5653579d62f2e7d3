//! App models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::FreightError;

/// Body of `POST /apps/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppCreateRequest {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    /// Provider configuration, a JSON document sent as a string
    #[serde(rename = "provider_config", skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
}

impl AppCreateRequest {
    /// Build a request, checking that `config` is a JSON document
    pub fn new(
        name: String,
        repository: Option<String>,
        provider: Option<String>,
        config: Option<String>,
    ) -> Result<Self, FreightError> {
        if let Some(config) = &config {
            serde_json::from_str::<Value>(config).map_err(|e| {
                FreightError::Usage(format!("--config must be valid JSON: {}", e))
            })?;
        }

        Ok(Self {
            name,
            repository,
            provider,
            config,
        })
    }
}

/// The editable part of an app record: everything except `id`
pub fn editable_fields(record: Value) -> Result<Map<String, Value>, FreightError> {
    match record {
        Value::Object(mut map) => {
            map.remove("id");
            Ok(map)
        }
        other => Err(FreightError::Render(format!(
            "expected an app object, got {}",
            other
        ))),
    }
}

/// Nested objects and arrays are submitted as JSON strings; scalars pass through
pub fn flatten_for_update(fields: Map<String, Value>) -> Map<String, Value> {
    fields
        .into_iter()
        .map(|(key, value)| match value {
            Value::Object(_) | Value::Array(_) => (key, Value::String(value.to_string())),
            scalar => (key, scalar),
        })
        .collect()
}
