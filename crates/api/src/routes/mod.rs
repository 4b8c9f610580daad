pub mod health;
pub mod surveys;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /surveys                                         list
/// /surveys/{id}                                    definition, delete
/// /surveys/{id}/responses                          submit (POST, form-encoded)
/// /surveys/{id}/analytics                          overview + per-question stats
/// /surveys/{id}/participants                       roster (pf_<fieldId> filters)
/// /surveys/{id}/participants/{participant_id}      participant detail
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/surveys", surveys::router())
}
