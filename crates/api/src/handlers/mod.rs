pub mod analytics;
pub mod participants;
pub mod submissions;
pub mod surveys;

use survey_core::error::CoreError;
use survey_core::survey::SurveyDefinition;
use survey_core::types::DbId;
use survey_db::repositories::SurveyRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Load a survey definition or fail with 404.
pub(crate) async fn load_definition(
    state: &AppState,
    survey_id: DbId,
) -> AppResult<SurveyDefinition> {
    SurveyRepo::load_definition(&state.pool, survey_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Survey",
            id: survey_id,
        }))
}
