//! Handlers for booking ratings and vehicle rating statistics.
//!
//! Every create, update, and delete recomputes the rated vehicle's
//! aggregate before the response is sent. A failed recompute is logged and
//! otherwise ignored: the rating write has already committed, and the next
//! mutation on the same vehicle repairs the aggregate.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use rentals_core::access::{
    confirm_vehicle_owner, rating_visibility, RatingListFilter, RatingScope, Visibility,
};
use rentals_core::booking::is_rateable;
use rentals_core::error::CoreError;
use rentals_core::rating::{resolve_create_score, resolve_update_score, validation_error};
use rentals_core::types::DbId;
use rentals_db::models::rating::{CreateRating, NewRating, Rating, UpdateRating};
use rentals_db::repositories::{BookingRepo, RatingRepo, VehicleRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireAuth, RequireClient};
use crate::query::{PaginationParams, RatingListParams};
use crate::response::{DataResponse, PaginatedResponse, StatisticsResponse};
use crate::state::AppState;

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Load a rating, returning 404 if it does not exist.
async fn find_rating(pool: &sqlx::PgPool, rating_id: DbId) -> AppResult<Rating> {
    RatingRepo::find_by_id(pool, rating_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Rating",
                id: rating_id,
            })
        })
}

/// Apply the read-visibility rules for `rating` to `auth`.
///
/// Any endpoint that returns a rating body goes through this check.
async fn ensure_visible(pool: &sqlx::PgPool, auth: &AuthUser, rating: &Rating) -> AppResult<()> {
    let requester = auth.requester();
    match rating_visibility(&requester, rating.user_id, rating.is_public) {
        Visibility::Visible => Ok(()),
        Visibility::VehicleOwnerOnly => {
            let vehicle = VehicleRepo::find_by_id(pool, rating.vehicle_id)
                .await?
                .ok_or_else(|| {
                    AppError::Core(CoreError::Forbidden(
                        "Not authorized to view this rating".into(),
                    ))
                })?;
            confirm_vehicle_owner(&requester, vehicle.owner_id)?;
            Ok(())
        }
        Visibility::Denied => Err(AppError::Core(CoreError::Forbidden(
            "Not authorized to view this rating".into(),
        ))),
    }
}

/// Recompute a vehicle's average rating after a rating mutation.
async fn refresh_vehicle_rating(pool: &sqlx::PgPool, vehicle_id: DbId) {
    match VehicleRepo::recompute_rating_summary(pool, vehicle_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            tracing::warn!(vehicle_id, "Rated vehicle no longer exists, summary not updated");
        }
        Err(e) => {
            tracing::error!(
                vehicle_id,
                error = %e,
                "Failed to recompute vehicle rating; aggregate is stale until the next rating change"
            );
        }
    }
}

/* --------------------------------------------------------------------------
Authenticated handlers
-------------------------------------------------------------------------- */

/// GET /ratings
///
/// List ratings visible to the requester, newest first. Clients see their
/// own ratings, car owners see ratings of their vehicles, admins see all.
/// Non-admins only ever see public ratings plus their own.
pub async fn list_ratings(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<RatingListParams>,
) -> AppResult<impl IntoResponse> {
    let mut filter = RatingListFilter::for_requester(&auth.requester());

    if let RatingScope::OwnedVehiclesOf(owner_id) = filter.scope {
        let vehicle_ids = VehicleRepo::list_ids_by_owner(&state.pool, owner_id).await?;
        filter.scope = RatingScope::Vehicles(vehicle_ids);
    }

    filter.vehicle_id = params.vehicle;
    filter.driver_id = params.driver;
    filter.min_score = params.min_score;
    filter.max_score = params.max_score;

    let page = params.page_request();
    let ratings = RatingRepo::list(&state.pool, &filter, page).await?;
    let total = RatingRepo::count(&state.pool, &filter).await?;

    Ok(Json(PaginatedResponse::new(ratings, page.info(total))))
}

/// GET /ratings/{id}
///
/// Fetch one rating, subject to the visibility rules for private ratings.
pub async fn get_rating(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    AppPath(rating_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let rating = find_rating(&state.pool, rating_id).await?;
    ensure_visible(&state.pool, &auth, &rating).await?;

    Ok(Json(DataResponse::new(rating)))
}

/// POST /ratings
///
/// Rate a completed booking. The vehicle and driver are taken from the
/// booking; the score is derived from categories when any are present.
pub async fn create_rating(
    RequireClient(auth): RequireClient,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateRating>,
) -> AppResult<impl IntoResponse> {
    let booking = BookingRepo::find_by_id(&state.pool, input.booking_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Booking",
                id: input.booking_id,
            })
        })?;

    if booking.client_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not authorized to rate this booking".into(),
        )));
    }

    if !is_rateable(&booking.status) {
        return Err(AppError::Core(CoreError::InvalidState(
            "Can only rate completed bookings".into(),
        )));
    }

    if RatingRepo::find_by_user_and_booking(&state.pool, auth.user_id, booking.id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "You have already rated this booking".into(),
        )));
    }

    input.validate().map_err(validation_error)?;
    let score = resolve_create_score(input.categories.as_ref(), input.score)?;

    let new_rating = NewRating {
        user_id: auth.user_id,
        booking_id: booking.id,
        vehicle_id: booking.vehicle_id,
        driver_id: booking.driver_id,
        score,
        categories: input.categories,
        review: input.review,
        pros: input.pros.unwrap_or_default(),
        cons: input.cons.unwrap_or_default(),
        would_recommend: input.would_recommend,
        is_public: input.is_public.unwrap_or(true),
    };

    // A concurrent create for the same pair fails here on the unique
    // constraint and surfaces as a conflict.
    let rating = RatingRepo::create(&state.pool, &new_rating).await?;

    refresh_vehicle_rating(&state.pool, rating.vehicle_id).await;

    tracing::info!(
        user_id = auth.user_id,
        booking_id = rating.booking_id,
        rating_id = rating.id,
        vehicle_id = rating.vehicle_id,
        score = rating.score,
        "Rating created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse::new(rating))))
}

/// PUT /ratings/{id}
///
/// Edit a rating. Only the author may edit; admins included in the refusal.
pub async fn update_rating(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    AppPath(rating_id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateRating>,
) -> AppResult<impl IntoResponse> {
    let existing = find_rating(&state.pool, rating_id).await?;

    if existing.user_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not authorized to update this rating".into(),
        )));
    }

    input.validate().map_err(validation_error)?;

    let categories = input.categories.as_ref().or(existing.categories());
    let score = resolve_update_score(categories, input.score, existing.score)?;

    let rating = RatingRepo::update(&state.pool, rating_id, score, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Rating",
                id: rating_id,
            })
        })?;

    refresh_vehicle_rating(&state.pool, rating.vehicle_id).await;

    tracing::info!(
        user_id = auth.user_id,
        rating_id,
        vehicle_id = rating.vehicle_id,
        score = rating.score,
        "Rating updated"
    );

    Ok(Json(DataResponse::new(rating)))
}

/// DELETE /ratings/{id}
///
/// Remove a rating. Admin only; the role gate is the extractor.
pub async fn delete_rating(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(rating_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let removed = RatingRepo::delete(&state.pool, rating_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Rating",
                id: rating_id,
            })
        })?;

    refresh_vehicle_rating(&state.pool, removed.vehicle_id).await;

    tracing::info!(
        user_id = admin.user_id,
        rating_id,
        vehicle_id = removed.vehicle_id,
        "Rating deleted"
    );

    Ok(Json(DataResponse::new(serde_json::json!({}))))
}

/// PUT /ratings/{id}/helpful
///
/// Add a helpful vote. Every call counts; the rating must be visible to
/// the caller.
pub async fn mark_helpful(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    AppPath(rating_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = find_rating(&state.pool, rating_id).await?;
    ensure_visible(&state.pool, &auth, &existing).await?;

    let rating = RatingRepo::increment_helpful(&state.pool, rating_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Rating",
                id: rating_id,
            })
        })?;

    tracing::debug!(
        user_id = auth.user_id,
        rating_id,
        helpful_votes = rating.helpful_votes,
        "Rating marked helpful"
    );

    Ok(Json(DataResponse::new(rating)))
}

/// PUT /ratings/{id}/report
///
/// Report a rating. Every call counts; the rating must be visible to the
/// caller.
pub async fn report_rating(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    AppPath(rating_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = find_rating(&state.pool, rating_id).await?;
    ensure_visible(&state.pool, &auth, &existing).await?;

    let rating = RatingRepo::increment_report(&state.pool, rating_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Rating",
                id: rating_id,
            })
        })?;

    tracing::info!(
        user_id = auth.user_id,
        rating_id,
        report_count = rating.report_count,
        "Rating reported"
    );

    Ok(Json(DataResponse::new(rating)))
}

/* --------------------------------------------------------------------------
Public handlers
-------------------------------------------------------------------------- */

/// GET /ratings/vehicle/{vehicle_id}
///
/// Public ratings of a vehicle with average, count, and star histogram.
pub async fn vehicle_ratings(
    State(state): State<AppState>,
    AppPath(vehicle_id): AppPath<DbId>,
    AppQuery(params): AppQuery<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let page = params.page_request();
    let ratings = RatingRepo::list_public_for_vehicle(&state.pool, vehicle_id, page).await?;
    let statistics = RatingRepo::public_statistics(&state.pool, vehicle_id).await?;
    let pagination = page.info(statistics.total_ratings);

    Ok(Json(StatisticsResponse::new(ratings, statistics, pagination)))
}
