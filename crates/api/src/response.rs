//! Shared response envelope types for API handlers.
//!
//! Every successful response is `{ "success": true, "data": ... }`; list
//! endpoints add a `pagination` block and the public vehicle endpoint adds
//! `statistics`. Error responses are produced by
//! [`AppError`](crate::error::AppError).

use rentals_core::pagination::PageInfo;
use rentals_core::rating::RatingStatistics;
use serde::Serialize;

/// Standard `{ "success": true, "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse::new(rating)))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Paginated list envelope.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    pub success: bool,
    pub data: Vec<T>,
    pub pagination: PageInfo,
}

impl<T: Serialize> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, pagination: PageInfo) -> Self {
        Self {
            success: true,
            data,
            pagination,
        }
    }
}

/// Paginated list envelope with aggregate statistics.
#[derive(Debug, Serialize)]
pub struct StatisticsResponse<T: Serialize> {
    pub success: bool,
    pub data: Vec<T>,
    pub statistics: RatingStatistics,
    pub pagination: PageInfo,
}

impl<T: Serialize> StatisticsResponse<T> {
    pub fn new(data: Vec<T>, statistics: RatingStatistics, pagination: PageInfo) -> Self {
        Self {
            success: true,
            data,
            statistics,
            pagination,
        }
    }
}
