//! Repository for the `bookings` table.

use rentals_core::booking::BOOKING_STATUS_PENDING;
use rentals_core::types::DbId;
use sqlx::PgPool;

use crate::models::booking::{Booking, CreateBooking};

/// Column list for bookings queries.
const COLUMNS: &str = "id, client_id, vehicle_id, driver_id, status, start_date, end_date, \
    created_at, updated_at";

/// Lookup and lifecycle operations for bookings.
pub struct BookingRepo;

impl BookingRepo {
    /// Create a new booking, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateBooking) -> Result<Booking, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookings (client_id, vehicle_id, driver_id, status, start_date, end_date)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(input.client_id)
            .bind(input.vehicle_id)
            .bind(input.driver_id)
            .bind(input.status.as_deref().unwrap_or(BOOKING_STATUS_PENDING))
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_one(pool)
            .await
    }

    /// Find a booking by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
