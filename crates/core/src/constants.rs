//! Constants used throughout the twin core crate.

/// Default bind host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default bind port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default root of the static frontend assets, relative to the working directory.
pub const DEFAULT_STATIC_DIR: &str = "frontend/static";

/// Default location of the optional asset registry.
pub const DEFAULT_ASSETS_REGISTRY: &str = "3d_objects/objects_registry.json";

/// Folder under the static root holding sensor scripts.
pub const SENSOR_SCRIPTS_DIR: &str = "js/sensors";

/// URL prefix under which the static root is served.
pub const STATIC_URL_PREFIX: &str = "/static/";

pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";

pub const DEFAULT_CESIUM_API_URL: &str = "https://api.cesium.com";

/// Physics WebSocket backend checked by the health endpoint.
pub const DEFAULT_PHYSICS_WS_ADDR: &str = "127.0.0.1:8765";

/// Search radius in metres used when a geo query omits one.
pub const DEFAULT_RADIUS_M: u32 = 500;

/// Altitude in metres of the synthetic satellites.
pub const DEFAULT_ORBIT_ALTITUDE_M: f64 = 400_000.0;

/// Speed limit reported for roads without a `maxspeed` tag.
pub const DEFAULT_ROAD_SPEED: i64 = 50;
