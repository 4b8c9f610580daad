//! Handlers for the participant roster and per-participant view.

use axum::extract::{Path, Query, State};
use axum::Json;
use survey_core::analytics::{participant_detail, ParticipantDetail, RecordedAnswer};
use survey_core::error::CoreError;
use survey_core::roster::{
    build_roster, parse_filter_params, resolve_filters, RecordedFieldAnswer, RosterEntry,
};
use survey_core::survey::SurveyDefinition;
use survey_core::types::DbId;
use survey_db::repositories::{AnswerRepo, ParticipantRepo, RosterRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::load_definition;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/surveys/{id}/participants?pf_<fieldId>=<value>
pub async fn list(
    State(state): State<AppState>,
    Path(survey_id): Path<DbId>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Json<DataResponse<Vec<RosterEntry>>>> {
    let definition = load_definition(&state, survey_id).await?;

    let filters = parse_filter_params(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    let predicates = resolve_filters(&definition, &filters)?;

    let participants = RosterRepo::list(&state.pool, survey_id, &predicates).await?;
    let ids: Vec<DbId> = participants.iter().map(|p| p.id).collect();
    let field_answers: Vec<RecordedFieldAnswer> =
        AnswerRepo::field_answers_for_participants(&state.pool, &ids)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

    let roster = build_roster(
        &definition,
        participants.into_iter().map(Into::into).collect(),
        &field_answers,
    );
    Ok(Json(DataResponse { data: roster }))
}

/// GET /api/v1/surveys/{id}/participants/{participant_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((survey_id, participant_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<ParticipantDetail>>> {
    let definition = load_definition(&state, survey_id).await?;
    let detail = load_participant_detail(&state, &definition, participant_id).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// Completion view of one participant; 404 unless the participant belongs
/// to the survey.
pub(crate) async fn load_participant_detail(
    state: &AppState,
    definition: &SurveyDefinition,
    participant_id: DbId,
) -> AppResult<ParticipantDetail> {
    let survey_id = definition.survey_id;
    let participant = ParticipantRepo::find_in_survey(&state.pool, survey_id, participant_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Participant",
            id: participant_id,
        }))?;

    let answers: Vec<RecordedAnswer> =
        AnswerRepo::list_for_participant(&state.pool, survey_id, participant_id)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();
    let field_answers: Vec<RecordedFieldAnswer> =
        AnswerRepo::field_answers_for_participants(&state.pool, &[participant_id])
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

    Ok(participant_detail(
        definition,
        participant.into(),
        &answers,
        &field_answers,
    ))
}
