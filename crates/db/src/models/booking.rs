//! Booking model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use rentals_core::types::{DbId, Timestamp};

/// A row from the `bookings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: DbId,
    pub client_id: DbId,
    pub vehicle_id: DbId,
    pub driver_id: Option<DbId>,
    pub status: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a booking. `status` defaults to `pending`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    pub client_id: DbId,
    pub vehicle_id: DbId,
    pub driver_id: Option<DbId>,
    pub status: Option<String>,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
}
