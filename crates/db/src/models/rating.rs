//! Rating model and request DTOs.

use rentals_core::rating::{validate_list_entries, RatingCategories};
use rentals_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

/// A row from the `ratings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: DbId,
    pub user_id: DbId,
    pub booking_id: DbId,
    pub vehicle_id: DbId,
    pub driver_id: Option<DbId>,
    pub score: f64,
    pub categories: Option<Json<RatingCategories>>,
    pub review: Option<String>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub would_recommend: Option<bool>,
    pub is_verified: bool,
    pub is_public: bool,
    pub helpful_votes: i32,
    pub report_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Rating {
    /// Current category mapping, if any.
    pub fn categories(&self) -> Option<&RatingCategories> {
        self.categories.as_ref().map(|c| &c.0)
    }
}

/// Request body for `POST /ratings`.
///
/// `vehicle` and `driver` are never accepted from the client; they are
/// copied from the booking.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRating {
    #[serde(rename = "booking", alias = "bookingId")]
    pub booking_id: DbId,

    /// Range-checked during score resolution, and only when no category
    /// value is present.
    pub score: Option<f64>,

    #[validate(nested)]
    pub categories: Option<RatingCategories>,

    #[validate(length(max = 500))]
    pub review: Option<String>,

    #[validate(custom(function = "validate_list_entries"))]
    pub pros: Option<Vec<String>>,

    #[validate(custom(function = "validate_list_entries"))]
    pub cons: Option<Vec<String>>,

    pub would_recommend: Option<bool>,

    pub is_public: Option<bool>,
}

/// Request body for `PUT /ratings/{id}`. Absent fields are left unchanged;
/// a supplied `categories` object replaces the whole mapping.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRating {
    /// Range-checked during score resolution, and only when no category
    /// value is present.
    pub score: Option<f64>,

    #[validate(nested)]
    pub categories: Option<RatingCategories>,

    #[validate(length(max = 500))]
    pub review: Option<String>,

    #[validate(custom(function = "validate_list_entries"))]
    pub pros: Option<Vec<String>>,

    #[validate(custom(function = "validate_list_entries"))]
    pub cons: Option<Vec<String>>,

    pub would_recommend: Option<bool>,

    pub is_public: Option<bool>,
}

/// Fully resolved insert for a new rating.
///
/// Built by the API layer after the booking checks: references come from
/// the booking and `score` is already derived.
#[derive(Debug, Clone)]
pub struct NewRating {
    pub user_id: DbId,
    pub booking_id: DbId,
    pub vehicle_id: DbId,
    pub driver_id: Option<DbId>,
    pub score: f64,
    pub categories: Option<RatingCategories>,
    pub review: Option<String>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub would_recommend: Option<bool>,
    pub is_public: bool,
}
