//! Deploy API client

use serde_json::Value;

use crate::errors::FreightError;
use crate::http::client::{ApiClient, Transport};
use crate::models::deploy::{DeployRequest, DeployStatusUpdate};
use crate::tail::LogCursor;
use crate::task::TaskReference;

impl<T: Transport> ApiClient<T> {
    /// Create a new deploy
    pub async fn create_deploy(&self, request: &DeployRequest) -> Result<Value, FreightError> {
        self.post("/deploys/", serde_json::to_value(request)?).await
    }

    /// Get a single deploy
    pub async fn get_deploy(&self, task: &TaskReference) -> Result<Value, FreightError> {
        self.get(&task.api_path()).await
    }

    /// Cancel a deploy
    pub async fn cancel_deploy(&self, task: &TaskReference) -> Result<Value, FreightError> {
        let body = serde_json::to_value(DeployStatusUpdate::cancelled())?;
        self.put(&task.api_path(), body).await
    }

    /// Fetch the log of a deploy from `cursor` onwards
    pub async fn get_deploy_log(
        &self,
        task: &TaskReference,
        cursor: &LogCursor,
        limit: Option<u32>,
    ) -> Result<Value, FreightError> {
        let mut path = format!("{}log/?offset={}", task.api_path(), cursor);
        if let Some(limit) = limit {
            path.push_str(&format!("&limit={}", limit));
        }
        self.get(&path).await
    }
}
