//! Route definitions for the `/surveys` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{analytics, participants, submissions, surveys};
use crate::state::AppState;

/// Routes mounted at `/surveys`.
///
/// ```text
/// GET    /                                   -> list
/// GET    /{id}                               -> get_by_id
/// DELETE /{id}                               -> delete
/// POST   /{id}/responses                     -> submit
/// GET    /{id}/analytics                     -> get_analytics
/// GET    /{id}/participants                  -> list (roster)
/// GET    /{id}/participants/{participant_id} -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(surveys::list))
        .route("/{id}", get(surveys::get_by_id).delete(surveys::delete))
        .route("/{id}/responses", post(submissions::submit))
        .route("/{id}/analytics", get(analytics::get_analytics))
        .route("/{id}/participants", get(participants::list))
        .route(
            "/{id}/participants/{participant_id}",
            get(participants::get_by_id),
        )
}
