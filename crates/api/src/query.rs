//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Page-based pagination parameters (`?page=&limit=`).
///
/// Values are resolved through `kennel_core::pagination::PageRequest`, which
/// applies the per-endpoint default and clamps the limit.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Query parameters for the public puppy catalog.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuppyListParams {
    pub gender: Option<String>,
    pub breed: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub available: Option<bool>,
}

/// Query parameters for the owner inbox (`?page=&limit=&unread=`).
#[derive(Debug, Default, Deserialize)]
pub struct InboxParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    #[serde(default)]
    pub unread: bool,
}
