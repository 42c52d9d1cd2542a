//! HTTP handlers grouped by area.

pub mod assistant;
pub mod geo;
pub mod models;
pub mod pages;
