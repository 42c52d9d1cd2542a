//! # API REST
//!
//! REST API implementation for the digital twin backend.
//!
//! Handles:
//! - HTTP endpoints with axum: model upload/listing/serving, viewer pages, assistant stubs and
//!   the geospatial glue
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (multipart parsing, JSON serialization, CORS, static files)
//!
//! Uses `twin-core` for configuration and logic, `twin_files` for model storage and
//! `api-shared` for wire types.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod routes;
pub mod upstream;
pub mod views;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir};
use twin_core::CoreConfig;
use twin_files::ModelStore;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use error::ApiError;

/// Largest accepted upload request.
pub const MAX_UPLOAD_BYTES: usize = 256 * 1024 * 1024;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<CoreConfig>,
    pub store: Arc<ModelStore>,
    pub http: reqwest::Client,
}

impl AppState {
    /// Builds the state for `cfg`, with a model store over its storage settings.
    pub fn new(cfg: CoreConfig) -> Self {
        let store = ModelStore::new(cfg.storage_config());
        Self {
            cfg: Arc::new(cfg),
            store: Arc::new(store),
            http: reqwest::Client::new(),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::pages::root,
        routes::pages::health,
        routes::pages::digital_twin,
        routes::pages::favicon,
        routes::pages::sensor_list,
        routes::pages::cesium_token_check,
        routes::models::upload_model,
        routes::models::list_models,
        routes::models::list_models_json,
        routes::models::serve_model,
        routes::assistant::ai_query,
        routes::assistant::ai_object,
        routes::geo::public_data,
        routes::geo::geo_info,
        routes::geo::telecom_status,
        routes::geo::simulation_zone,
        routes::geo::simulation_environment,
        routes::geo::vehicle_action,
        routes::geo::assets_registry,
    ),
    components(schemas(
        api_shared::HealthRes,
        api_shared::RootRes,
        api_shared::ModelEntryRes,
        api_shared::AiQueryRes,
        api_shared::AiObjectRes,
        api_shared::DriveAction,
        api_shared::ErrorRes,
        api_shared::PublicDataItem,
        api_shared::EnvironmentRes,
        api_shared::SpeedZone,
        api_shared::GeoInfoRes,
        api_shared::StatusRes,
        api_shared::ZoneRes,
        api_shared::VehicleActionRes,
        routes::pages::SensorListRes,
        upstream::CesiumTokenCheck,
    ))
)]
pub struct ApiDoc;

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    let static_dir = ServeDir::new(state.cfg.static_dir());

    Router::new()
        .route("/", get(routes::pages::root))
        .route("/health", get(routes::pages::health))
        .route("/digital-twin", get(routes::pages::digital_twin))
        .route("/favicon.ico", get(routes::pages::favicon))
        .route("/sensor_list", get(routes::pages::sensor_list))
        .route(
            "/debug/cesium_token_check",
            get(routes::pages::cesium_token_check),
        )
        .route(
            "/upload-model",
            post(routes::models::upload_model).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/models", get(routes::models::list_models))
        .route("/models/:filename", get(routes::models::serve_model))
        .route("/api/models", get(routes::models::list_models_json))
        .route("/ai_query", post(routes::assistant::ai_query))
        .route("/ai/object", post(routes::assistant::ai_object))
        .route("/api/public-data/", get(routes::geo::public_data))
        .route("/api/geo/info", get(routes::geo::geo_info))
        .route("/api/telecom/", get(routes::geo::telecom_status))
        .route("/api/simulation/zone", get(routes::geo::simulation_zone))
        .route(
            "/api/simulation/environment",
            get(routes::geo::simulation_environment),
        )
        .route(
            "/api/simulation/vehicle/action",
            post(routes::geo::vehicle_action),
        )
        .route("/api/assets/registry", get(routes::geo::assets_registry))
        .nest_service("/static", static_dir)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, Response};
    use http_body_util::BodyExt;
    use tempfile::TempDir;
    use tower::ServiceExt;

    pub const BOUNDARY: &str = "twin-test-boundary";

    /// Nothing listens on port 1, so upstream calls fail fast without leaving the host.
    pub const UNREACHABLE: &str = "http://127.0.0.1:1";

    /// State over temp folders, with no upstreams reachable.
    pub fn state(temp: &TempDir) -> AppState {
        let cfg = CoreConfig::default()
            .with_upload_folder(temp.path().join("models"))
            .with_static_dir(temp.path().join("static"))
            .with_assets_registry(temp.path().join("objects_registry.json"))
            .with_upstream_urls(
                format!("{UNREACHABLE}/api/interpreter"),
                format!("{UNREACHABLE}/search"),
                UNREACHABLE,
            )
            .with_physics_ws_addr("127.0.0.1:1");
        AppState::new(cfg)
    }

    pub async fn send(state: AppState, req: Request<Body>) -> Response<Body> {
        router(state).oneshot(req).await.unwrap()
    }

    pub async fn body_text(res: Response<Body>) -> String {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    pub async fn body_bytes(res: Response<Body>) -> Vec<u8> {
        res.into_body().collect().await.unwrap().to_bytes().to_vec()
    }

    pub async fn body_json(res: Response<Body>) -> serde_json::Value {
        serde_json::from_str(&body_text(res).await).unwrap()
    }

    pub fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    pub fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    /// A multipart body with one part. `filename: None` sends a plain form field.
    pub fn multipart_body(field: &str, filename: Option<&str>, data: &[u8]) -> Vec<u8> {
        let disposition = match filename {
            Some(name) => format!("form-data; name=\"{field}\"; filename=\"{name}\""),
            None => format!("form-data; name=\"{field}\""),
        };
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: {disposition}\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    pub fn upload(field: &str, filename: Option<&str>, data: &[u8]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/upload-model")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(field, filename, data)))
            .unwrap()
    }
}
