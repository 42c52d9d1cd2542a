//! Calls to third-party services: Overpass, Nominatim and the Cesium ion API.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use twin_core::osm::{overpass_query, OsmElement, OverpassResponse};

/// User agent sent to OpenStreetMap services, which reject anonymous clients.
pub const USER_AGENT: &str = "DigitalTwin/1.0";

/// Timeout for geocoding and token checks.
pub const SHORT_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for Overpass queries, matching the server-side query timeout.
pub const OVERPASS_TIMEOUT: Duration = Duration::from_secs(25);

/// Elements within `radius` metres of a point.
pub async fn fetch_osm_elements(
    http: &reqwest::Client,
    overpass_url: &str,
    lat: f64,
    lng: f64,
    radius: u32,
) -> Result<Vec<OsmElement>, reqwest::Error> {
    let query = overpass_query(lat, lng, radius);
    let response: OverpassResponse = http
        .get(overpass_url)
        .query(&[("data", query)])
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .timeout(OVERPASS_TIMEOUT)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(response.elements)
}

/// Like [`fetch_osm_elements`] but any failure yields no elements.
pub async fn fetch_osm_elements_or_empty(
    http: &reqwest::Client,
    overpass_url: &str,
    lat: f64,
    lng: f64,
    radius: u32,
) -> Vec<OsmElement> {
    fetch_osm_elements(http, overpass_url, lat, lng, radius)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!("overpass query failed: {e}");
            Vec::new()
        })
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

/// The best match for a place name.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeHit {
    pub lat: f64,
    pub lon: f64,
    pub display_name: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("could not convert string to float: {0:?}")]
    Coordinate(String),
}

/// Looks up `place` and returns the first hit, if any.
pub async fn geocode(
    http: &reqwest::Client,
    nominatim_url: &str,
    place: &str,
) -> Result<Option<GeocodeHit>, GeocodeError> {
    let places: Vec<NominatimPlace> = http
        .get(nominatim_url)
        .query(&[("format", "json"), ("q", place), ("limit", "1")])
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .timeout(SHORT_TIMEOUT)
        .send()
        .await?
        .json()
        .await?;

    let Some(first) = places.into_iter().next() else {
        return Ok(None);
    };
    let parse = |s: &str| {
        s.trim()
            .parse::<f64>()
            .map_err(|_| GeocodeError::Coordinate(s.to_owned()))
    };

    Ok(Some(GeocodeHit {
        lat: parse(&first.lat)?,
        lon: parse(&first.lon)?,
        display_name: first.display_name,
    }))
}

/// Outcome of validating the Cesium ion token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, utoipa::ToSchema)]
pub struct CesiumTokenCheck {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Asks the Cesium API for a known asset endpoint with `token`.
///
/// Never fails; transport errors are reported in the result.
pub async fn check_cesium_token(
    http: &reqwest::Client,
    cesium_api_url: &str,
    token: Option<&str>,
) -> CesiumTokenCheck {
    let Some(token) = token else {
        return CesiumTokenCheck {
            reason: Some("CESIUM_ION_TOKEN not set".into()),
            ..Default::default()
        };
    };

    let url = format!(
        "{}/v1/assets/2/endpoint",
        cesium_api_url.trim_end_matches('/')
    );
    let result = http
        .get(url)
        .query(&[("access_token", token)])
        .timeout(SHORT_TIMEOUT)
        .send()
        .await;

    match result {
        Ok(res) => {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            CesiumTokenCheck {
                valid: status == 200,
                status: Some(status),
                response: Some(body),
                ..Default::default()
            }
        }
        Err(e) => CesiumTokenCheck {
            error: Some(e.to_string()),
            ..Default::default()
        },
    }
}
