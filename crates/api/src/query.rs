//! Shared query parameter types for API handlers.

use rentals_core::pagination::PageRequest;
use rentals_core::types::DbId;
use serde::Deserialize;

/// Generic pagination parameters (`?page=&limit=`).
///
/// Values are clamped by [`PageRequest::new`].
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PaginationParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

/// Query parameters for `GET /ratings`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingListParams {
    pub vehicle: Option<DbId>,
    pub driver: Option<DbId>,
    pub min_score: Option<f64>,
    pub max_score: Option<f64>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl RatingListParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}
