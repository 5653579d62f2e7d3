//! Deploy models

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::FreightError;
use crate::models::{field, field_text};

/// Statuses after which a deploy has start and finish timestamps
const COMPLETE_STATUSES: &[&str] = &["finished", "failed"];

/// Body of `POST /deploys/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeployRequest {
    /// App to deploy
    pub app: String,

    /// User requesting the deploy
    pub user: String,

    /// Target environment, server default when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,

    /// Git ref to deploy, server default when absent
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,

    /// Deploy even if checks fail
    pub force: bool,
}

/// Body of `PUT /deploys/{app}/{env}/{number}/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeployStatusUpdate {
    pub status: String,
}

impl DeployStatusUpdate {
    pub fn cancelled() -> Self {
        Self {
            status: "cancelled".to_string(),
        }
    }
}

/// Identity of a deploy as reported by the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploySummary {
    pub id: String,

    /// `<app>/<env>#<number>` when the response carries all three parts
    pub name: Option<String>,
}

impl DeploySummary {
    pub fn from_value(value: &Value) -> Result<Self, FreightError> {
        let id = field_text(value, &["id"])?;
        let name = match (
            field_text(value, &["app", "name"]),
            field_text(value, &["environment"]),
            field_text(value, &["number"]),
        ) {
            (Ok(app), Ok(env), Ok(number)) => Some(format!("{}/{}#{}", app, env, number)),
            _ => None,
        };

        Ok(Self { id, name })
    }
}

/// Status view of a single deploy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployStatus {
    pub app: String,
    pub env: String,
    pub number: String,
    pub status: String,
    pub date_created: String,

    /// `(dateStarted, dateFinished)`, present once the deploy completed
    pub timings: Option<(String, String)>,
}

impl DeployStatus {
    pub fn from_value(value: &Value) -> Result<Self, FreightError> {
        // the id is part of the record contract even though it is not shown
        field(value, &["id"])?;

        let status = field_text(value, &["status"])?;
        let timings = if COMPLETE_STATUSES.contains(&status.as_str()) {
            Some((
                field_text(value, &["dateStarted"])?,
                field_text(value, &["dateFinished"])?,
            ))
        } else {
            None
        };

        Ok(Self {
            app: field_text(value, &["app", "name"])?,
            env: field_text(value, &["environment"])?,
            number: field_text(value, &["number"])?,
            status,
            date_created: field_text(value, &["dateCreated"])?,
            timings,
        })
    }
}
