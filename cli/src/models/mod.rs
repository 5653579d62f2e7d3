//! Request bodies and response views

pub mod app;
pub mod deploy;

use serde_json::Value;

use crate::errors::FreightError;

/// Look up a field by path, failing when any segment is absent
pub fn field<'a>(value: &'a Value, path: &[&str]) -> Result<&'a Value, FreightError> {
    path.iter().try_fold(value, |current, key| {
        current
            .get(key)
            .ok_or_else(|| FreightError::Render(format!("missing field `{}`", path.join("."))))
    })
}

/// A field rendered for display: strings verbatim, null as `-`, anything else as JSON
pub fn field_text(value: &Value, path: &[&str]) -> Result<String, FreightError> {
    Ok(display_value(field(value, path)?))
}

pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}
