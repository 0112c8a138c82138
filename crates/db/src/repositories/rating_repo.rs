//! Repository for the `ratings` table.

use rentals_core::access::{RatingListFilter, RatingScope};
use rentals_core::pagination::PageRequest;
use rentals_core::rating::{RatingStatistics, StarDistribution};
use rentals_core::types::DbId;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use crate::models::rating::{NewRating, Rating, UpdateRating};

/// Column list for ratings queries.
const COLUMNS: &str = "id, user_id, booking_id, vehicle_id, driver_id, score, categories, \
    review, pros, cons, would_recommend, is_verified, is_public, helpful_votes, \
    report_count, created_at, updated_at";

/// Provides CRUD, counter, and filtered list operations for ratings.
pub struct RatingRepo;

impl RatingRepo {
    /// Insert a new rating, returning the created row.
    ///
    /// `is_verified` is always set: ratings only enter through the
    /// completed-booking flow. A second rating for the same
    /// (user, booking) pair fails on `uq_ratings_user_booking`.
    pub async fn create(pool: &PgPool, input: &NewRating) -> Result<Rating, sqlx::Error> {
        let query = format!(
            "INSERT INTO ratings
                (user_id, booking_id, vehicle_id, driver_id, score, categories,
                 review, pros, cons, would_recommend, is_verified, is_public)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, TRUE, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Rating>(&query)
            .bind(input.user_id)
            .bind(input.booking_id)
            .bind(input.vehicle_id)
            .bind(input.driver_id)
            .bind(input.score)
            .bind(input.categories.as_ref().map(Json))
            .bind(&input.review)
            .bind(&input.pros)
            .bind(&input.cons)
            .bind(input.would_recommend)
            .bind(input.is_public)
            .fetch_one(pool)
            .await
    }

    /// Find a rating by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Rating>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ratings WHERE id = $1");
        sqlx::query_as::<_, Rating>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the rating a user left for a booking, if any.
    pub async fn find_by_user_and_booking(
        pool: &PgPool,
        user_id: DbId,
        booking_id: DbId,
    ) -> Result<Option<Rating>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM ratings WHERE user_id = $1 AND booking_id = $2");
        sqlx::query_as::<_, Rating>(&query)
            .bind(user_id)
            .bind(booking_id)
            .fetch_optional(pool)
            .await
    }

    /// Apply an update. `score` is the already-resolved score; other
    /// absent fields keep their current value.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        score: f64,
        input: &UpdateRating,
    ) -> Result<Option<Rating>, sqlx::Error> {
        let query = format!(
            "UPDATE ratings SET
                score = $1,
                categories = COALESCE($2, categories),
                review = COALESCE($3, review),
                pros = COALESCE($4, pros),
                cons = COALESCE($5, cons),
                would_recommend = COALESCE($6, would_recommend),
                is_public = COALESCE($7, is_public)
             WHERE id = $8
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Rating>(&query)
            .bind(score)
            .bind(input.categories.as_ref().map(Json))
            .bind(&input.review)
            .bind(&input.pros)
            .bind(&input.cons)
            .bind(input.would_recommend)
            .bind(input.is_public)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a rating, returning the removed row so the caller knows which
    /// vehicle to recompute.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Rating>, sqlx::Error> {
        let query = format!("DELETE FROM ratings WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Rating>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Add one helpful vote. Repeated calls are not deduplicated.
    pub async fn increment_helpful(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Rating>, sqlx::Error> {
        let query = format!(
            "UPDATE ratings SET helpful_votes = helpful_votes + 1
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Rating>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Add one report. Repeated calls are not deduplicated.
    pub async fn increment_report(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Rating>, sqlx::Error> {
        let query = format!(
            "UPDATE ratings SET report_count = report_count + 1
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Rating>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List ratings matching `filter`, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &RatingListFilter,
        page: PageRequest,
    ) -> Result<Vec<Rating>, sqlx::Error> {
        let (where_clause, bind_values, bind_idx) = build_rating_filter(filter);

        let query = format!(
            "SELECT {COLUMNS} FROM ratings {where_clause} \
             ORDER BY created_at DESC, id DESC \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );

        let q = bind_rating_values(sqlx::query_as::<_, Rating>(&query), &bind_values);
        q.bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    /// Count ratings matching `filter` (for pagination metadata).
    pub async fn count(pool: &PgPool, filter: &RatingListFilter) -> Result<i64, sqlx::Error> {
        let (where_clause, bind_values, _) = build_rating_filter(filter);

        let query = format!("SELECT COUNT(*)::BIGINT AS count FROM ratings {where_clause}");

        let q = bind_rating_values_scalar(sqlx::query_scalar::<_, i64>(&query), &bind_values);
        q.fetch_one(pool).await
    }

    /// Public ratings of a vehicle, newest first.
    pub async fn list_public_for_vehicle(
        pool: &PgPool,
        vehicle_id: DbId,
        page: PageRequest,
    ) -> Result<Vec<Rating>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ratings
             WHERE vehicle_id = $1 AND is_public = TRUE
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Rating>(&query)
            .bind(vehicle_id)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    /// Average, count, and exact-star histogram over the public ratings of
    /// a vehicle. A fractional score counts toward the total and the
    /// average but lands in no star bucket.
    pub async fn public_statistics(
        pool: &PgPool,
        vehicle_id: DbId,
    ) -> Result<RatingStatistics, sqlx::Error> {
        let row = sqlx::query_as::<_, StatisticsRow>(
            "SELECT
                COALESCE(AVG(score), 0)::DOUBLE PRECISION AS average_score,
                COUNT(*) AS total_ratings,
                COUNT(*) FILTER (WHERE score = 1) AS stars_1,
                COUNT(*) FILTER (WHERE score = 2) AS stars_2,
                COUNT(*) FILTER (WHERE score = 3) AS stars_3,
                COUNT(*) FILTER (WHERE score = 4) AS stars_4,
                COUNT(*) FILTER (WHERE score = 5) AS stars_5
             FROM ratings
             WHERE vehicle_id = $1 AND is_public = TRUE",
        )
        .bind(vehicle_id)
        .fetch_one(pool)
        .await?;

        Ok(row.into())
    }
}

/// Single-row result of [`RatingRepo::public_statistics`].
#[derive(Debug, FromRow)]
struct StatisticsRow {
    average_score: f64,
    total_ratings: i64,
    stars_1: i64,
    stars_2: i64,
    stars_3: i64,
    stars_4: i64,
    stars_5: i64,
}

impl From<StatisticsRow> for RatingStatistics {
    fn from(row: StatisticsRow) -> Self {
        RatingStatistics {
            average_score: row.average_score,
            total_ratings: row.total_ratings,
            distribution: StarDistribution::from_counts([
                row.stars_1,
                row.stars_2,
                row.stars_3,
                row.stars_4,
                row.stars_5,
            ]),
        }
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for dynamic query building
// ---------------------------------------------------------------------------

/// Typed bind value for dynamically-built rating queries.
#[derive(Debug, Clone, PartialEq)]
enum BindValue {
    BigInt(i64),
    BigIntArray(Vec<i64>),
    Double(f64),
}

/// Build a WHERE clause and bind values from a [`RatingListFilter`].
///
/// Returns `(where_clause, bind_values, next_bind_index)`.
/// The `where_clause` is empty if no filters are active, or starts with `WHERE `.
fn build_rating_filter(filter: &RatingListFilter) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    match &filter.scope {
        RatingScope::Unrestricted => {}
        RatingScope::AuthoredBy(user_id) => {
            conditions.push(format!("user_id = ${bind_idx}"));
            bind_idx += 1;
            bind_values.push(BindValue::BigInt(*user_id));
        }
        RatingScope::OwnedVehiclesOf(owner_id) => {
            conditions.push(format!(
                "vehicle_id IN (SELECT id FROM vehicles WHERE owner_id = ${bind_idx})"
            ));
            bind_idx += 1;
            bind_values.push(BindValue::BigInt(*owner_id));
        }
        RatingScope::Vehicles(ids) => {
            conditions.push(format!("vehicle_id = ANY(${bind_idx})"));
            bind_idx += 1;
            bind_values.push(BindValue::BigIntArray(ids.clone()));
        }
    }

    if let Some(vehicle_id) = filter.vehicle_id {
        conditions.push(format!("vehicle_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(vehicle_id));
    }

    if let Some(driver_id) = filter.driver_id {
        conditions.push(format!("driver_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(driver_id));
    }

    if let Some(min) = filter.min_score {
        conditions.push(format!("score >= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Double(min));
    }

    if let Some(max) = filter.max_score {
        conditions.push(format!("score <= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Double(max));
    }

    if let Some(user_id) = filter.public_or_author {
        conditions.push(format!("(is_public = TRUE OR user_id = ${bind_idx})"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(user_id));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values, bind_idx)
}

/// Bind filter values to a `query_as`.
fn bind_rating_values<'q>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, Rating, sqlx::postgres::PgArguments>,
    values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, Rating, sqlx::postgres::PgArguments> {
    for val in values {
        q = match val {
            BindValue::BigInt(v) => q.bind(*v),
            BindValue::BigIntArray(v) => q.bind(v),
            BindValue::Double(v) => q.bind(*v),
        };
    }
    q
}

/// Bind filter values to a `query_scalar`.
fn bind_rating_values_scalar<'q>(
    mut q: sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments>,
    values: &'q [BindValue],
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments> {
    for val in values {
        q = match val {
            BindValue::BigInt(v) => q.bind(*v),
            BindValue::BigIntArray(v) => q.bind(v),
            BindValue::Double(v) => q.bind(*v),
        };
    }
    q
}
