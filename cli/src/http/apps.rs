//! App API client

use serde_json::{Map, Value};

use crate::errors::FreightError;
use crate::http::client::{encode_segment, ApiClient, Transport};
use crate::models::app::AppCreateRequest;

fn app_path(name: &str) -> String {
    format!("/apps/{}/", encode_segment(name))
}

impl<T: Transport> ApiClient<T> {
    /// List all apps
    pub async fn list_apps(&self) -> Result<Value, FreightError> {
        self.get("/apps/").await
    }

    /// Get a single app
    pub async fn get_app(&self, name: &str) -> Result<Value, FreightError> {
        self.get(&app_path(name)).await
    }

    /// Create an app
    pub async fn create_app(&self, request: &AppCreateRequest) -> Result<Value, FreightError> {
        self.post("/apps/", serde_json::to_value(request)?).await
    }

    /// Replace the editable fields of an app
    pub async fn update_app(
        &self,
        name: &str,
        fields: Map<String, Value>,
    ) -> Result<Value, FreightError> {
        self.put(&app_path(name), Value::Object(fields)).await
    }

    /// Delete an app
    pub async fn delete_app(&self, name: &str) -> Result<Value, FreightError> {
        self.delete(&app_path(name)).await
    }
}
