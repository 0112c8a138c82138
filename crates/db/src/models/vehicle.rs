//! Vehicle model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use rentals_core::types::{DbId, Timestamp};

/// A row from the `vehicles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: DbId,
    pub owner_id: DbId,
    pub make: String,
    pub model: String,
    pub average_rating: f64,
    pub total_ratings: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a vehicle.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicle {
    pub owner_id: DbId,
    pub make: String,
    pub model: String,
}
