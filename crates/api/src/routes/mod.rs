pub mod health;
pub mod ratings;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /ratings                          list, create
/// /ratings/{id}                     get, update, delete
/// /ratings/{id}/helpful             helpful vote
/// /ratings/{id}/report              report
/// /ratings/vehicle/{vehicle_id}     public vehicle ratings with statistics
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/ratings", ratings::router())
}
