//! Handler for survey analytics.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use survey_core::analytics::{
    question_statistics, survey_overview, ParticipantDetail, ParticipantRecord,
    QuestionStatistics, RecordedAnswer, SurveyOverview,
};
use survey_core::types::DbId;
use survey_db::repositories::{AnswerRepo, ParticipantRepo};

use crate::error::AppResult;
use crate::handlers::load_definition;
use crate::handlers::participants::load_participant_detail;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyticsParams {
    /// Participant being inspected alongside the aggregates.
    pub participant_id: Option<DbId>,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsReport {
    pub survey_id: DbId,
    pub title: String,
    pub overview: SurveyOverview,
    pub questions: Vec<QuestionStatistics>,
    pub participant: Option<ParticipantDetail>,
}

/// GET /api/v1/surveys/{id}/analytics
pub async fn get_analytics(
    State(state): State<AppState>,
    Path(survey_id): Path<DbId>,
    Query(params): Query<AnalyticsParams>,
) -> AppResult<Json<DataResponse<AnalyticsReport>>> {
    let definition = load_definition(&state, survey_id).await?;

    let participant = match params.participant_id {
        Some(pid) => Some(load_participant_detail(&state, &definition, pid).await?),
        None => None,
    };

    let participants: Vec<ParticipantRecord> =
        ParticipantRepo::list_for_survey(&state.pool, survey_id)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();
    let answers: Vec<RecordedAnswer> = AnswerRepo::list_for_survey(&state.pool, survey_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let overview = survey_overview(&definition, &participants);
    let questions = question_statistics(
        &definition,
        &answers,
        overview.participant_count,
        params.participant_id,
    );

    tracing::debug!(
        survey_id,
        participants = overview.participant_count,
        answers = answers.len(),
        "Analytics computed",
    );

    Ok(Json(DataResponse {
        data: AnalyticsReport {
            survey_id,
            title: definition.title.clone(),
            overview,
            questions,
            participant,
        },
    }))
}

