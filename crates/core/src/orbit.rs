//! Synthetic satellite orbits for the viewer.

use crate::constants::DEFAULT_ORBIT_ALTITUDE_M;
use api_shared::PublicDataItem;

/// Angles (radians) of the synthetic satellites added to public data.
pub const SATELLITE_ANGLES: [f64; 4] = [0.0, 1.0, 2.5, 4.0];

/// A point on the synthetic orbit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitPosition {
    pub lon: f64,
    pub lat: f64,
    pub altitude: f64,
}

/// Position at `angle` radians: longitude tracks the angle in degrees and latitude swings
/// between -20 and 20.
pub fn compute_orbit(angle: f64, altitude: Option<f64>) -> OrbitPosition {
    OrbitPosition {
        lon: angle.to_degrees(),
        lat: angle.sin() * 20.0,
        altitude: altitude.unwrap_or(DEFAULT_ORBIT_ALTITUDE_M),
    }
}

/// One satellite item per entry of [`SATELLITE_ANGLES`] at the default altitude.
pub fn synthetic_satellites() -> Vec<PublicDataItem> {
    SATELLITE_ANGLES
        .iter()
        .map(|angle| {
            let pos = compute_orbit(*angle, None);
            PublicDataItem {
                kind: Some("satellite".into()),
                id: None,
                lat: Some(pos.lat),
                lon: Some(pos.lon),
                alt: Some(pos.altitude),
            }
        })
        .collect()
}
