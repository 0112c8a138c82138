//! Route definitions for ratings.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::ratings;
use crate::state::AppState;

/// Rating routes, nested under `/ratings`.
///
/// ```text
/// GET    /                          list_ratings (auth)
/// POST   /                          create_rating (client)
/// GET    /{id}                      get_rating (auth)
/// PUT    /{id}                      update_rating (author)
/// DELETE /{id}                      delete_rating (admin)
/// PUT    /{id}/helpful              mark_helpful (auth)
/// PUT    /{id}/report               report_rating (auth)
/// GET    /vehicle/{vehicle_id}      vehicle_ratings (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(ratings::list_ratings).post(ratings::create_rating),
        )
        .route(
            "/{id}",
            get(ratings::get_rating)
                .put(ratings::update_rating)
                .delete(ratings::delete_rating),
        )
        .route("/{id}/helpful", put(ratings::mark_helpful))
        .route("/{id}/report", put(ratings::report_rating))
        .route("/vehicle/{vehicle_id}", get(ratings::vehicle_ratings))
}
