//! Geospatial, telecom and simulation glue for the viewer.

use crate::upstream::fetch_osm_elements_or_empty;
use crate::AppState;
use api_shared::{EnvironmentRes, GeoInfoRes, PublicDataItem, StatusRes, VehicleActionRes, ZoneRes};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use twin_core::assets::{load_registry_or_empty, AssetRegistry};
use twin_core::constants::DEFAULT_RADIUS_M;
use twin_core::orbit::synthetic_satellites;
use twin_core::osm::{load_environment, public_data_items};

fn default_radius() -> u32 {
    DEFAULT_RADIUS_M
}

/// A point with a search radius in metres.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AreaQuery {
    pub lat: f64,
    pub lng: f64,
    #[serde(default = "default_radius")]
    pub radius: u32,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PublicDataQuery {
    pub lat: f64,
    pub lng: f64,
    #[serde(default = "default_radius")]
    pub radius: u32,
    /// Append synthetic satellites
    #[serde(default)]
    pub satellites: bool,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PointQuery {
    pub lat: f64,
    pub lng: f64,
}

#[utoipa::path(
    get,
    path = "/api/public-data/",
    params(PublicDataQuery),
    responses((status = 200, description = "Nearby objects", body = [PublicDataItem]))
)]
/// Nearby OpenStreetMap objects, optionally with synthetic satellites
///
/// An unreachable Overpass service gives an empty OSM part rather than an error.
#[axum::debug_handler]
pub async fn public_data(
    State(state): State<AppState>,
    Query(q): Query<PublicDataQuery>,
) -> Json<Vec<PublicDataItem>> {
    let elements =
        fetch_osm_elements_or_empty(&state.http, state.cfg.overpass_url(), q.lat, q.lng, q.radius)
            .await;

    let mut items = public_data_items(&elements);
    if q.satellites {
        items.extend(synthetic_satellites());
    }
    Json(items)
}

#[utoipa::path(
    get,
    path = "/api/simulation/environment",
    params(AreaQuery),
    responses((status = 200, description = "Speed zones and checkpoints", body = EnvironmentRes))
)]
/// Driving environment around a point
#[axum::debug_handler]
pub async fn simulation_environment(
    State(state): State<AppState>,
    Query(q): Query<AreaQuery>,
) -> Json<EnvironmentRes> {
    let elements =
        fetch_osm_elements_or_empty(&state.http, state.cfg.overpass_url(), q.lat, q.lng, q.radius)
            .await;
    Json(load_environment(&elements))
}

#[utoipa::path(
    get,
    path = "/api/geo/info",
    params(PointQuery),
    responses((status = 200, description = "The requested point", body = GeoInfoRes))
)]
pub async fn geo_info(Query(q): Query<PointQuery>) -> Json<GeoInfoRes> {
    Json(GeoInfoRes {
        lat: q.lat,
        lng: q.lng,
    })
}

#[utoipa::path(
    get,
    path = "/api/telecom/",
    responses((status = 200, description = "Telecom status", body = StatusRes))
)]
pub async fn telecom_status() -> Json<StatusRes> {
    Json(StatusRes::ok())
}

#[utoipa::path(
    get,
    path = "/api/simulation/zone",
    params(AreaQuery),
    responses((status = 200, description = "Zone assessment", body = ZoneRes))
)]
/// Zone assessment around a point. Always `unknown` until a scoring model exists.
pub async fn simulation_zone(Query(_q): Query<AreaQuery>) -> Json<ZoneRes> {
    Json(ZoneRes::default())
}

#[utoipa::path(
    post,
    path = "/api/simulation/vehicle/action",
    request_body(content = Object, description = "Action such as `{\"action\": \"BRAKE\"}`"),
    responses((status = 200, description = "Action acknowledged", body = VehicleActionRes))
)]
/// Acknowledge a vehicle action from the assistant or the user
pub async fn vehicle_action(Json(action): Json<serde_json::Value>) -> Json<VehicleActionRes> {
    tracing::debug!("vehicle action: {action}");
    Json(VehicleActionRes {
        status: "ok".into(),
        applied_action: action,
    })
}

#[utoipa::path(
    get,
    path = "/api/assets/registry",
    responses((status = 200, description = "Registered optional models and whether their files exist"))
)]
/// Optional model registry
///
/// An unreadable registry gives `{"models": {}}`.
#[axum::debug_handler]
pub async fn assets_registry(State(state): State<AppState>) -> Json<AssetRegistry> {
    let cfg = state.cfg.clone();
    let registry = tokio::task::spawn_blocking(move || {
        load_registry_or_empty(cfg.assets_registry(), cfg.static_dir())
    })
    .await
    .unwrap_or_default();
    Json(registry)
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use axum::http::StatusCode;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn public_data_with_satellites_only() {
        let temp = TempDir::new().unwrap();
        let res = send(
            state(&temp),
            get("/api/public-data/?lat=6.45&lng=3.39&satellites=true"),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        let items = json.as_array().unwrap();
        assert_eq!(items.len(), 4);
        assert!(items.iter().all(|i| i["type"] == "satellite"));
        assert_eq!(items[0]["lat"], 0.0);
        assert_eq!(items[0]["alt"], 400000.0);
    }

    #[tokio::test]
    async fn missing_coordinates_are_rejected() {
        let temp = TempDir::new().unwrap();
        let res = send(state(&temp), get("/api/public-data/?lat=6.45")).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn simple_routes() {
        let temp = TempDir::new().unwrap();

        let info = body_json(send(state(&temp), get("/api/geo/info?lat=1.5&lng=2.5")).await).await;
        assert_eq!(info, json!({"lat": 1.5, "lng": 2.5}));

        let telecom = body_json(send(state(&temp), get("/api/telecom/")).await).await;
        assert_eq!(telecom, json!({"status": "ok"}));

        let zone = body_json(
            send(state(&temp), get("/api/simulation/zone?lat=1&lng=2&radius=100")).await,
        )
        .await;
        assert_eq!(zone, json!({"zone": "unknown", "score": 0, "correlation": {}}));

        let action = body_json(
            send(
                state(&temp),
                post_json("/api/simulation/vehicle/action", r#"{"action": "BRAKE"}"#),
            )
            .await,
        )
        .await;
        assert_eq!(
            action,
            json!({"status": "ok", "applied_action": {"action": "BRAKE"}})
        );
    }

    #[tokio::test]
    async fn registry_reports_existing_static_files() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("static/models")).unwrap();
        fs::write(temp.path().join("static/models/car.glb"), b"glb").unwrap();

        let empty = body_json(send(state(&temp), get("/api/assets/registry")).await).await;
        assert_eq!(empty, json!({"models": {}}));

        fs::write(
            temp.path().join("objects_registry.json"),
            r#"{"models": {"car": {"model": "/static/models/car.glb"},
                           "bus": {"model": "/static/models/bus.glb"}}}"#,
        )
        .unwrap();
        let reg = body_json(send(state(&temp), get("/api/assets/registry")).await).await;
        assert_eq!(reg["models"]["car"]["exists"], true);
        assert_eq!(reg["models"]["bus"]["exists"], false);
        assert_eq!(reg["models"]["car"]["model"], "/static/models/car.glb");
    }
}
