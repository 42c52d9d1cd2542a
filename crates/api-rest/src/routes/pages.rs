//! Service info, health and the viewer page.

use crate::upstream::{check_cesium_token, CesiumTokenCheck};
use crate::views::render_digital_twin;
use crate::AppState;
use api_shared::{HealthRes, HealthService, RootRes};
use axum::{extract::State, http::StatusCode, response::Html, Json};
use serde::Serialize;
use std::time::Duration;
use twin_core::assets::list_sensor_scripts;

/// How long the health check waits for the physics backend.
pub const WS_CONNECT_TIMEOUT: Duration = Duration::from_millis(200);

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service info", body = RootRes))
)]
pub async fn root() -> Json<RootRes> {
    Json(RootRes {
        service: "digital-twin-backend".into(),
        ui: "/digital-twin".into(),
        docs: "/swagger-ui".into(),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Health check response", body = HealthRes))
)]
/// Health check endpoint
///
/// `ws` is true when the physics WebSocket backend accepts a TCP connection within
/// [`WS_CONNECT_TIMEOUT`].
#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> Json<HealthRes> {
    let ws = tcp_reachable(state.cfg.physics_ws_addr(), WS_CONNECT_TIMEOUT).await;
    Json(HealthService::check_health(ws))
}

async fn tcp_reachable(addr: &str, timeout: Duration) -> bool {
    matches!(
        tokio::time::timeout(timeout, tokio::net::TcpStream::connect(addr)).await,
        Ok(Ok(_))
    )
}

#[utoipa::path(
    get,
    path = "/digital-twin",
    responses((status = 200, description = "3D viewer page", content_type = "text/html"))
)]
/// The 3D viewer
///
/// The Cesium ion token is embedded only when the operator allowed it.
#[axum::debug_handler]
pub async fn digital_twin(State(state): State<AppState>) -> Html<String> {
    let token = state.cfg.template_cesium_token();
    if token.is_some() {
        tracing::debug!("cesium token injected into viewer page");
    }
    Html(render_digital_twin(token))
}

#[utoipa::path(
    get,
    path = "/favicon.ico",
    responses((status = 204, description = "No favicon"))
)]
pub async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SensorListRes {
    pub sensors: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/sensor_list",
    responses((status = 200, description = "Sensor scripts under the static root", body = SensorListRes))
)]
/// Sensor scripts the viewer can load
#[axum::debug_handler]
pub async fn sensor_list(State(state): State<AppState>) -> Json<SensorListRes> {
    let dir = state.cfg.sensor_scripts_dir();
    let sensors = tokio::task::spawn_blocking(move || list_sensor_scripts(&dir))
        .await
        .unwrap_or_default();
    Json(SensorListRes { sensors })
}

#[utoipa::path(
    get,
    path = "/debug/cesium_token_check",
    responses((status = 200, description = "Whether the configured Cesium ion token works", body = CesiumTokenCheck))
)]
/// Validate the configured Cesium ion token against the Cesium API
#[axum::debug_handler]
pub async fn cesium_token_check(State(state): State<AppState>) -> Json<CesiumTokenCheck> {
    Json(
        check_cesium_token(
            &state.http,
            state.cfg.cesium_api_url(),
            state.cfg.cesium_ion_token(),
        )
        .await,
    )
}
