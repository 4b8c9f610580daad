//! Read access to `answers` and `participant_answers` for analytics.

use sqlx::PgPool;
use survey_core::types::DbId;

use crate::models::answer::{AnswerRow, ParticipantAnswerRow};

const ANSWER_SELECT: &str = "SELECT a.id, a.response_id, r.participant_id, a.question_id, \
        a.option_id, a.answer_text, a.answer_number \
     FROM answers a \
     JOIN responses r ON r.id = a.response_id";

const FIELD_ANSWER_COLUMNS: &str = "id, participant_id, field_id, option_id, answer_text";

pub struct AnswerRepo;

impl AnswerRepo {
    /// Every answer recorded for a survey.
    pub async fn list_for_survey(
        pool: &PgPool,
        survey_id: DbId,
    ) -> Result<Vec<AnswerRow>, sqlx::Error> {
        let query = format!("{ANSWER_SELECT} WHERE r.survey_id = $1 ORDER BY a.id");
        sqlx::query_as::<_, AnswerRow>(&query)
            .bind(survey_id)
            .fetch_all(pool)
            .await
    }

    /// Answers of one participant within a survey.
    pub async fn list_for_participant(
        pool: &PgPool,
        survey_id: DbId,
        participant_id: DbId,
    ) -> Result<Vec<AnswerRow>, sqlx::Error> {
        let query = format!(
            "{ANSWER_SELECT} WHERE r.survey_id = $1 AND r.participant_id = $2 ORDER BY a.id"
        );
        sqlx::query_as::<_, AnswerRow>(&query)
            .bind(survey_id)
            .bind(participant_id)
            .fetch_all(pool)
            .await
    }

    /// Field answers of the given participants.
    pub async fn field_answers_for_participants(
        pool: &PgPool,
        participant_ids: &[DbId],
    ) -> Result<Vec<ParticipantAnswerRow>, sqlx::Error> {
        if participant_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {FIELD_ANSWER_COLUMNS} FROM participant_answers \
             WHERE participant_id = ANY($1) ORDER BY id"
        );
        sqlx::query_as::<_, ParticipantAnswerRow>(&query)
            .bind(participant_ids)
            .fetch_all(pool)
            .await
    }
}
