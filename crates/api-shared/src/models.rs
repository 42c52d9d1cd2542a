use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One stored model in the JSON listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ModelEntryRes {
    pub stored_name: String,
    pub display_name: String,
    pub size_bytes: u64,
    /// Path of the serving endpoint for this model
    pub url: String,
}

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RootRes {
    pub service: String,
    pub ui: String,
    pub docs: String,
}
