//! Bodies of the geospatial, telecom and simulation endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One object near a point: an OSM element or a synthetic satellite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PublicDataItem {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<f64>,
}

/// A road segment and its speed limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SpeedZone {
    /// Always `"road"`
    #[serde(rename = "type")]
    pub kind: String,
    /// Raw `maxspeed` tag, or 50 when untagged
    #[schema(value_type = Object)]
    pub max_speed: serde_json::Value,
}

/// Driving environment derived from nearby OSM elements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EnvironmentRes {
    pub speed_zones: Vec<SpeedZone>,
    /// Police checkpoints as raw OSM elements
    #[schema(value_type = Vec<Object>)]
    pub checkpoints: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoInfoRes {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusRes {
    pub status: String,
}

impl StatusRes {
    pub fn ok() -> Self {
        Self {
            status: "ok".into(),
        }
    }
}

/// Zone assessment. Stubbed until a scoring model exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ZoneRes {
    pub zone: String,
    pub score: i64,
    #[schema(value_type = Object)]
    pub correlation: serde_json::Value,
}

impl Default for ZoneRes {
    fn default() -> Self {
        Self {
            zone: "unknown".into(),
            score: 0,
            correlation: serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VehicleActionRes {
    pub status: String,
    #[schema(value_type = Object)]
    pub applied_action: serde_json::Value,
}
