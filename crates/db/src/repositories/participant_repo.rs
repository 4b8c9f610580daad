//! Repository for reading the `participants` table.

use sqlx::PgPool;
use survey_core::types::DbId;

use crate::models::participant::Participant;

pub(crate) const COLUMNS: &str =
    "id, survey_id, first_name, last_name, email, duration_seconds, created_at";

pub struct ParticipantRepo;

impl ParticipantRepo {
    /// All participants of a survey, most recent submission first.
    pub async fn list_for_survey(
        pool: &PgPool,
        survey_id: DbId,
    ) -> Result<Vec<Participant>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM participants WHERE survey_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Participant>(&query)
            .bind(survey_id)
            .fetch_all(pool)
            .await
    }

    /// Find a participant, scoped to the survey it must belong to.
    pub async fn find_in_survey(
        pool: &PgPool,
        survey_id: DbId,
        participant_id: DbId,
    ) -> Result<Option<Participant>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM participants WHERE id = $1 AND survey_id = $2");
        sqlx::query_as::<_, Participant>(&query)
            .bind(participant_id)
            .bind(survey_id)
            .fetch_optional(pool)
            .await
    }
}
