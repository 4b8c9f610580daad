//! Handlers for the `/surveys` catalogue.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use survey_core::error::CoreError;
use survey_core::survey::SurveyDefinition;
use survey_core::types::DbId;
use survey_db::models::survey::Survey;
use survey_db::repositories::SurveyRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::load_definition;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/surveys
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Survey>>>> {
    let surveys = SurveyRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: surveys }))
}

/// GET /api/v1/surveys/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SurveyDefinition>>> {
    let definition = load_definition(&state, id).await?;
    Ok(Json(DataResponse { data: definition }))
}

/// DELETE /api/v1/surveys/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = SurveyRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Survey",
            id,
        }))
    }
}
