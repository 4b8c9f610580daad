//! Handler for survey submissions.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Form, Json};
use survey_core::submission::{validate_submission, SubmissionPayload};
use survey_core::types::DbId;
use survey_db::repositories::SubmissionRepo;

use crate::error::AppResult;
use crate::handlers::load_definition;
use crate::response::SubmissionAccepted;
use crate::state::AppState;

/// POST /api/v1/surveys/{id}/responses
///
/// Form-encoded; multiple-choice selections repeat their key. The whole
/// payload is validated before anything is written.
pub async fn submit(
    State(state): State<AppState>,
    Path(survey_id): Path<DbId>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<(StatusCode, Json<SubmissionAccepted>)> {
    let definition = load_definition(&state, survey_id).await?;
    let payload = SubmissionPayload::from_pairs(pairs);

    let submission = validate_submission(&definition, &payload).inspect_err(|e| {
        tracing::debug!(survey_id, error = %e, "Submission rejected");
    })?;

    let receipt = SubmissionRepo::persist(&state.pool, &submission).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmissionAccepted {
            ok: true,
            participant_id: receipt.participant_id,
            response_id: receipt.response_id,
        }),
    ))
}
