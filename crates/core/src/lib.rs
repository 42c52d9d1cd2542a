//! # Twin Core
//!
//! Runtime configuration and the small pieces of logic behind the digital twin backend.
//!
//! This crate contains pure data operations with no HTTP concerns:
//! - Startup configuration resolved once from the environment (`CoreConfig`)
//! - The stubbed assistant: command parsing and object classification
//! - Synthetic satellite orbits
//! - OpenStreetMap element shaping (public data items, driving environment)
//! - The optional asset registry and sensor script discovery
//!
//! Network calls (Overpass, Nominatim, Cesium) and request handling belong in `api-rest`.

pub mod assets;
pub mod assistant;
pub mod config;
pub mod constants;
pub mod error;
pub mod orbit;
pub mod osm;

pub use config::CoreConfig;
pub use error::{CoreError, CoreResult};
