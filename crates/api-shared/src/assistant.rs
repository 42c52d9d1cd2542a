//! Bodies of the stubbed assistant endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Movement the viewer should perform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DriveAction {
    /// Always `"drive"`
    #[serde(rename = "type")]
    pub kind: String,
    pub lat: f64,
    pub lon: f64,
}

impl DriveAction {
    pub fn drive(lat: f64, lon: f64) -> Self {
        Self {
            kind: "drive".into(),
            lat,
            lon,
        }
    }
}

/// Reply to `POST /ai_query`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AiQueryRes {
    pub message: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<DriveAction>,
}

/// Reply to `POST /ai/object`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AiObjectRes {
    pub classification: String,
    pub suggestions: Vec<String>,
    /// Reserved for a real model; always null
    #[schema(value_type = Option<Object>)]
    pub ai: Option<serde_json::Value>,
}

/// JSON error body used by the JSON endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

impl ErrorRes {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
