use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Service name reported by the health endpoint.
pub const SERVICE_NAME: &str = "digital-twin-security-backend";

/// Health check body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub status: String,
    pub service: String,
    /// True when the physics WebSocket backend accepted a TCP connection
    pub ws: bool,
}

/// Builds health responses for the HTTP layer.
///
/// The physics backend connection check happens in the caller; this only shapes the result.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    pub fn new() -> Self {
        Self
    }

    /// Health response for a service that is up, with the given physics backend state.
    pub fn check_health(ws_available: bool) -> HealthRes {
        HealthRes {
            status: "ok".into(),
            service: SERVICE_NAME.into(),
            ws: ws_available,
        }
    }
}
