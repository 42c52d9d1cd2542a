//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into services. Nothing
//! in request handling reads process-wide environment variables.

use crate::constants::{
    DEFAULT_ASSETS_REGISTRY, DEFAULT_CESIUM_API_URL, DEFAULT_HOST, DEFAULT_NOMINATIM_URL,
    DEFAULT_OVERPASS_URL, DEFAULT_PHYSICS_WS_ADDR, DEFAULT_PORT, DEFAULT_STATIC_DIR,
    SENSOR_SCRIPTS_DIR,
};
use crate::{CoreError, CoreResult};
use std::path::{Path, PathBuf};
use twin_files::StorageConfig;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    host: String,
    port: u16,
    upload_folder: Option<PathBuf>,
    static_dir: PathBuf,
    assets_registry: PathBuf,
    cesium_ion_token: Option<String>,
    allow_cesium_token_in_template: bool,
    overpass_url: String,
    nominatim_url: String,
    cesium_api_url: String,
    physics_ws_addr: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            upload_folder: None,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            assets_registry: PathBuf::from(DEFAULT_ASSETS_REGISTRY),
            cesium_ion_token: None,
            allow_cesium_token_in_template: false,
            overpass_url: DEFAULT_OVERPASS_URL.into(),
            nominatim_url: DEFAULT_NOMINATIM_URL.into(),
            cesium_api_url: DEFAULT_CESIUM_API_URL.into(),
            physics_ws_addr: DEFAULT_PHYSICS_WS_ADDR.into(),
        }
    }
}

impl CoreConfig {
    /// Builds the configuration from a variable lookup.
    ///
    /// `lookup` is usually `|name| std::env::var(name).ok()`. Unset and blank values fall back
    /// to the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] if `PORT` is not a valid port number.
    pub fn from_lookup<F>(lookup: F) -> CoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            host: string_from_env_value(lookup("HOST")).unwrap_or(defaults.host),
            port: port_from_env_value(lookup("PORT"))?,
            upload_folder: string_from_env_value(lookup("UPLOAD_FOLDER")).map(PathBuf::from),
            static_dir: string_from_env_value(lookup("STATIC_DIR"))
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            assets_registry: string_from_env_value(lookup("ASSETS_REGISTRY"))
                .map(PathBuf::from)
                .unwrap_or(defaults.assets_registry),
            cesium_ion_token: string_from_env_value(lookup("CESIUM_ION_TOKEN")),
            allow_cesium_token_in_template: flag_from_env_value(
                lookup("ALLOW_CESIUM_TOKEN_IN_TEMPLATE"),
            ),
            overpass_url: string_from_env_value(lookup("OSM_OVERPASS_URL"))
                .unwrap_or(defaults.overpass_url),
            nominatim_url: string_from_env_value(lookup("NOMINATIM_URL"))
                .unwrap_or(defaults.nominatim_url),
            cesium_api_url: string_from_env_value(lookup("CESIUM_API_URL"))
                .unwrap_or(defaults.cesium_api_url),
            physics_ws_addr: string_from_env_value(lookup("PHYSICS_WS_ADDR"))
                .unwrap_or(defaults.physics_ws_addr),
        })
    }

    pub fn with_upload_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.upload_folder = Some(folder.into());
        self
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = dir.into();
        self
    }

    pub fn with_assets_registry(mut self, path: impl Into<PathBuf>) -> Self {
        self.assets_registry = path.into();
        self
    }

    pub fn with_cesium_token(mut self, token: Option<String>, allow_in_template: bool) -> Self {
        self.cesium_ion_token = token;
        self.allow_cesium_token_in_template = allow_in_template;
        self
    }

    /// Points the Overpass, Nominatim and Cesium clients at other base URLs.
    pub fn with_upstream_urls(
        mut self,
        overpass_url: impl Into<String>,
        nominatim_url: impl Into<String>,
        cesium_api_url: impl Into<String>,
    ) -> Self {
        self.overpass_url = overpass_url.into();
        self.nominatim_url = nominatim_url.into();
        self.cesium_api_url = cesium_api_url.into();
        self
    }

    pub fn with_physics_ws_addr(mut self, addr: impl Into<String>) -> Self {
        self.physics_ws_addr = addr.into();
        self
    }

    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn upload_folder(&self) -> Option<&Path> {
        self.upload_folder.as_deref()
    }

    /// Storage settings for the model store.
    pub fn storage_config(&self) -> StorageConfig {
        StorageConfig::new(self.upload_folder.clone())
    }

    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }

    pub fn sensor_scripts_dir(&self) -> PathBuf {
        self.static_dir.join(SENSOR_SCRIPTS_DIR)
    }

    pub fn assets_registry(&self) -> &Path {
        &self.assets_registry
    }

    pub fn cesium_ion_token(&self) -> Option<&str> {
        self.cesium_ion_token.as_deref()
    }

    /// Token to embed in the viewer page, if the operator allowed it.
    pub fn template_cesium_token(&self) -> Option<&str> {
        if self.allow_cesium_token_in_template {
            self.cesium_ion_token()
        } else {
            None
        }
    }

    pub fn overpass_url(&self) -> &str {
        &self.overpass_url
    }

    pub fn nominatim_url(&self) -> &str {
        &self.nominatim_url
    }

    pub fn cesium_api_url(&self) -> &str {
        &self.cesium_api_url
    }

    pub fn physics_ws_addr(&self) -> &str {
        &self.physics_ws_addr
    }
}

/// Trims an optional value; blank becomes `None`.
pub fn string_from_env_value(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses a boolean flag. Only `true` (any case) enables it.
pub fn flag_from_env_value(value: Option<String>) -> bool {
    string_from_env_value(value).is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

/// Parses the listen port, defaulting when unset.
pub fn port_from_env_value(value: Option<String>) -> CoreResult<u16> {
    match string_from_env_value(value) {
        None => Ok(DEFAULT_PORT),
        Some(v) => v.parse::<u16>().map_err(|e| CoreError::InvalidConfig {
            name: "PORT",
            reason: format!("{v:?}: {e}"),
        }),
    }
}
