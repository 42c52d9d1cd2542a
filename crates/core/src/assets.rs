//! Optional viewer assets: the object registry and sensor scripts.

use crate::constants::STATIC_URL_PREFIX;
use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path};

#[derive(Debug, Clone, Default, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    models: BTreeMap<String, RegistryEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RegistryEntry {
    #[serde(default)]
    model: Option<serde_json::Value>,
}

/// A registry entry with whether its file is present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistryModel {
    pub model: Option<serde_json::Value>,
    pub exists: bool,
}

/// Body of `GET /api/assets/registry`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssetRegistry {
    pub models: BTreeMap<String, RegistryModel>,
}

/// Reads the registry at `registry_path` and checks each `/static/...` model against
/// `static_dir`.
///
/// # Errors
///
/// Returns [`CoreError::FileRead`] or [`CoreError::Deserialization`] if the registry cannot be
/// read or parsed. Callers that must not fail use [`load_registry_or_empty`].
pub fn load_registry(registry_path: &Path, static_dir: &Path) -> CoreResult<AssetRegistry> {
    let raw = fs::read_to_string(registry_path).map_err(|source| CoreError::FileRead {
        path: registry_path.to_path_buf(),
        source,
    })?;
    let file: RegistryFile =
        serde_json::from_str(&raw).map_err(|source| CoreError::Deserialization {
            path: registry_path.to_path_buf(),
            source,
        })?;

    let models = file
        .models
        .into_iter()
        .map(|(name, entry)| {
            let exists = entry
                .model
                .as_ref()
                .and_then(|v| v.as_str())
                .is_some_and(|uri| static_file_exists(uri, static_dir));
            (
                name,
                RegistryModel {
                    model: entry.model,
                    exists,
                },
            )
        })
        .collect();

    Ok(AssetRegistry { models })
}

/// Like [`load_registry`] but an unreadable registry yields no models.
pub fn load_registry_or_empty(registry_path: &Path, static_dir: &Path) -> AssetRegistry {
    load_registry(registry_path, static_dir).unwrap_or_else(|e| {
        tracing::debug!("asset registry unavailable: {e}");
        AssetRegistry::default()
    })
}

/// Whether a `/static/...` URI names an existing file under `static_dir`.
///
/// URIs outside `/static/` and relative paths that climb out with `..` never exist.
fn static_file_exists(uri: &str, static_dir: &Path) -> bool {
    let Some(rel) = uri.strip_prefix(STATIC_URL_PREFIX) else {
        return false;
    };
    let rel = Path::new(rel);
    if !rel.components().all(|c| matches!(c, Component::Normal(_))) {
        return false;
    }
    static_dir.join(rel).exists()
}

/// Sorted names of the `.js` files directly inside `dir`. A missing folder has none.
pub fn list_sensor_scripts(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .flatten()
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(".js"))
        .collect();
    names.sort();
    names
}
