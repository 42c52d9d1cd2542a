//! # API Shared
//!
//! Wire types for the digital twin HTTP API.
//!
//! Contains:
//! - Request/response bodies (`serde` + `utoipa::ToSchema`) grouped by area
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` for handlers and the OpenAPI document, and by `twin-core` for the
//! shapes its glue logic produces.

pub mod assistant;
pub mod geo;
pub mod health;
pub mod models;

pub use assistant::{AiObjectRes, AiQueryRes, DriveAction, ErrorRes};
pub use geo::{
    EnvironmentRes, GeoInfoRes, PublicDataItem, SpeedZone, StatusRes, VehicleActionRes, ZoneRes,
};
pub use health::{HealthRes, HealthService, SERVICE_NAME};
pub use models::{ModelEntryRes, RootRes};
