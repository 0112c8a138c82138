//! Repository for the `vehicles` table, including the derived rating summary.

use rentals_core::types::DbId;
use sqlx::PgPool;

use crate::models::vehicle::{CreateVehicle, Vehicle};

/// Column list for vehicles queries.
const COLUMNS: &str = "id, owner_id, make, model, average_rating, total_ratings, \
    created_at, updated_at";

/// Lookup operations and rating aggregation for vehicles.
pub struct VehicleRepo;

impl VehicleRepo {
    /// Register a vehicle, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateVehicle) -> Result<Vehicle, sqlx::Error> {
        let query = format!(
            "INSERT INTO vehicles (owner_id, make, model)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vehicle>(&query)
            .bind(input.owner_id)
            .bind(&input.make)
            .bind(&input.model)
            .fetch_one(pool)
            .await
    }

    /// Find a vehicle by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Vehicle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vehicles WHERE id = $1");
        sqlx::query_as::<_, Vehicle>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// IDs of every vehicle owned by `owner_id`.
    pub async fn list_ids_by_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM vehicles WHERE owner_id = $1 ORDER BY id")
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Recompute `average_rating` and `total_ratings` from the current
    /// ratings of the vehicle.
    ///
    /// The average is the plain mean of every rating score (public or not),
    /// rounded to one decimal; 0 when the vehicle has no ratings. Returns
    /// `None` if the vehicle does not exist.
    pub async fn recompute_rating_summary(
        pool: &PgPool,
        vehicle_id: DbId,
    ) -> Result<Option<Vehicle>, sqlx::Error> {
        let query = format!(
            "UPDATE vehicles SET
                average_rating = COALESCE(
                    (SELECT ROUND(AVG(score)::NUMERIC, 1)::DOUBLE PRECISION
                     FROM ratings WHERE vehicle_id = $1),
                    0),
                total_ratings = (SELECT COUNT(*)::INTEGER FROM ratings WHERE vehicle_id = $1)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let vehicle = sqlx::query_as::<_, Vehicle>(&query)
            .bind(vehicle_id)
            .fetch_optional(pool)
            .await?;

        if let Some(ref v) = vehicle {
            tracing::debug!(
                vehicle_id = v.id,
                average_rating = v.average_rating,
                total_ratings = v.total_ratings,
                "Vehicle rating summary recomputed"
            );
        }

        Ok(vehicle)
    }
}
