//! OpenStreetMap element shaping.
//!
//! Elements come from an Overpass `out geom` query. Fetching is done by the HTTP layer; this
//! module builds the query and turns the elements into viewer-facing shapes.

use crate::constants::DEFAULT_ROAD_SPEED;
use api_shared::{EnvironmentRes, PublicDataItem, SpeedZone};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A geometry vertex of a way or relation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// One element of an Overpass response. Unknown fields are kept so the element can be
/// passed through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OsmElement {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Vec<GeoPoint>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, serde_json::Value>,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

impl OsmElement {
    fn tag_str(&self, key: &str) -> Option<&str> {
        self.tags.get(key).and_then(|v| v.as_str())
    }

    /// The element's own coordinates, or the first vertex of its geometry.
    pub fn position(&self) -> Option<GeoPoint> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(GeoPoint { lat, lon }),
            _ => self
                .geometry
                .as_ref()
                .and_then(|points| points.first().copied()),
        }
    }
}

/// Top level of an Overpass JSON response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OsmElement>,
}

/// Overpass QL for nodes and ways within `radius` metres of a point, with geometry.
pub fn overpass_query(lat: f64, lng: f64, radius: u32) -> String {
    format!(
        "[out:json][timeout:25];(node(around:{radius},{lat},{lng});way(around:{radius},{lat},{lng}););out geom;"
    )
}

/// Reduces elements to `{type, id, lat, lon}` items.
pub fn public_data_items(elements: &[OsmElement]) -> Vec<PublicDataItem> {
    elements
        .iter()
        .map(|el| {
            let pos = el.position();
            PublicDataItem {
                kind: el.kind.clone(),
                id: el.id,
                lat: pos.map(|p| p.lat),
                lon: pos.map(|p| p.lon),
                alt: None,
            }
        })
        .collect()
}

/// Derives road speed zones and police checkpoints from nearby elements.
///
/// Every element with a non-empty `highway` tag is a road zone. Its `maxspeed` tag is passed
/// through as-is (it is usually a string such as `"30 mph"`).
pub fn load_environment(elements: &[OsmElement]) -> EnvironmentRes {
    let speed_zones = elements
        .iter()
        .filter(|el| el.tag_str("highway").is_some_and(|h| !h.is_empty()))
        .map(|el| SpeedZone {
            kind: "road".into(),
            max_speed: el
                .tags
                .get("maxspeed")
                .cloned()
                .unwrap_or_else(|| DEFAULT_ROAD_SPEED.into()),
        })
        .collect();

    let checkpoints = elements
        .iter()
        .filter(|el| el.tag_str("amenity") == Some("police"))
        .filter_map(|el| serde_json::to_value(el).ok())
        .collect();

    EnvironmentRes {
        speed_zones,
        checkpoints,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn elements() -> Vec<OsmElement> {
        let raw = json!({
            "elements": [
                {"type": "node", "id": 1, "lat": 6.45, "lon": 3.39,
                 "tags": {"amenity": "police", "name": "Station"}},
                {"type": "way", "id": 2, "nodes": [10, 11],
                 "geometry": [{"lat": 6.5, "lon": 3.4}, {"lat": 6.6, "lon": 3.5}],
                 "tags": {"highway": "primary", "maxspeed": "60"}},
                {"type": "way", "id": 3, "tags": {"highway": "residential"}},
                {"type": "node", "id": 4, "lat": 6.0, "lon": 3.0}
            ]
        });
        serde_json::from_value::<OverpassResponse>(raw)
            .unwrap()
            .elements
    }

    #[test]
    fn query_embeds_point_and_radius() {
        let q = overpass_query(6.45, 3.39, 500);
        assert!(q.starts_with("[out:json]"));
        assert!(q.contains("node(around:500,6.45,3.39)"));
        assert!(q.contains("way(around:500,6.45,3.39)"));
        assert!(q.ends_with("out geom;"));
    }

    #[test]
    fn items_use_node_coordinates_or_first_vertex() {
        let items = public_data_items(&elements());
        assert_eq!(items.len(), 4);

        assert_eq!(items[0].kind.as_deref(), Some("node"));
        assert_eq!((items[0].lat, items[0].lon), (Some(6.45), Some(3.39)));
        assert_eq!((items[1].lat, items[1].lon), (Some(6.5), Some(3.4)));
        assert_eq!(items[2].id, Some(3));
        assert!(items[2].lat.is_none());

        let json = serde_json::to_value(&items[2]).unwrap();
        assert!(json.get("lat").is_none());
    }

    #[test]
    fn environment_from_tags() {
        let env = load_environment(&elements());

        assert_eq!(env.speed_zones.len(), 2);
        assert_eq!(env.speed_zones[0].max_speed, json!("60"));
        assert_eq!(env.speed_zones[1].max_speed, json!(50));
        assert!(env.speed_zones.iter().all(|z| z.kind == "road"));

        assert_eq!(env.checkpoints.len(), 1);
        assert_eq!(env.checkpoints[0]["id"], 1);
        assert_eq!(env.checkpoints[0]["tags"]["name"], "Station");
    }

    #[test]
    fn unknown_fields_survive_round_trip() {
        let way = &elements()[1];
        assert_eq!(way.rest.get("nodes"), Some(&json!([10, 11])));
        let back = serde_json::to_value(way).unwrap();
        assert_eq!(back["nodes"], json!([10, 11]));
    }

    #[test]
    fn empty_input_gives_empty_environment() {
        let env = load_environment(&[]);
        assert!(env.speed_zones.is_empty());
        assert!(env.checkpoints.is_empty());
    }
}
