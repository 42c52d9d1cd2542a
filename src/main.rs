//! Digital twin backend server.
//!
//! Loads `.env`, resolves configuration once from the environment and serves the REST API.

use api_rest::{router, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use twin_core::CoreConfig;

/// Main entry point for the digital twin backend
///
/// # Environment Variables
/// - `HOST` / `PORT`: bind address (default: `127.0.0.1:5000`)
/// - `UPLOAD_FOLDER`: model storage folder (default: `models/` next to the files crate)
/// - `STATIC_DIR`: static asset root served at `/static` (default: `frontend/static`)
/// - `ASSETS_REGISTRY`: optional model registry (default: `3d_objects/objects_registry.json`)
/// - `CESIUM_ION_TOKEN`, `ALLOW_CESIUM_TOKEN_IN_TEMPLATE`: Cesium ion token and whether the
///   viewer page may embed it
/// - `OSM_OVERPASS_URL`, `NOMINATIM_URL`, `CESIUM_API_URL`: upstream services
/// - `PHYSICS_WS_ADDR`: physics backend probed by `/health` (default: `127.0.0.1:8765`)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - a configuration value is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("twin=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("twin_files=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = CoreConfig::from_lookup(|name| std::env::var(name).ok())?;
    let addr = cfg.bind_addr();

    let storage = cfg.storage_config();
    let source = if cfg.upload_folder().is_some() {
        "UPLOAD_FOLDER"
    } else {
        "default"
    };
    tracing::info!(
        "-- Model folder ({}): {}",
        source,
        storage.effective_folder().display()
    );
    if cfg.cesium_ion_token().is_some() && cfg.template_cesium_token().is_none() {
        tracing::warn!("CESIUM_ION_TOKEN is set but will not be injected into the viewer page");
    }

    tracing::info!("++ Starting digital twin backend on {}", addr);

    let app = router(AppState::new(cfg));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
