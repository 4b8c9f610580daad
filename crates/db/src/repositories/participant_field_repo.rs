//! Repository for the `participant_fields` and `participant_field_options` tables.

use sqlx::PgPool;
use survey_core::types::DbId;

use crate::models::participant_field::{
    CreateParticipantField, ParticipantField, ParticipantFieldOption,
};

const COLUMNS: &str = "id, survey_id, field_label, field_type, is_required, sort_order";

const OPTION_COLUMNS: &str = "id, field_id, option_text, sort_order";

pub struct ParticipantFieldRepo;

impl ParticipantFieldRepo {
    /// Insert a field and its options in one transaction.
    ///
    /// The caller is expected to have run [`CreateParticipantField::validate`].
    pub async fn create(
        pool: &PgPool,
        survey_id: DbId,
        input: &CreateParticipantField,
    ) -> Result<(ParticipantField, Vec<ParticipantFieldOption>), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO participant_fields \
                (survey_id, field_label, field_type, is_required, sort_order) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let field = sqlx::query_as::<_, ParticipantField>(&query)
            .bind(survey_id)
            .bind(&input.field_label)
            .bind(&input.field_type)
            .bind(input.is_required)
            .bind(input.sort_order)
            .fetch_one(&mut *tx)
            .await?;

        let option_query = format!(
            "INSERT INTO participant_field_options (field_id, option_text, sort_order) \
             VALUES ($1, $2, $3) RETURNING {OPTION_COLUMNS}"
        );
        let mut options = Vec::with_capacity(input.options.len());
        for (position, text) in input.options.iter().enumerate() {
            let row = sqlx::query_as::<_, ParticipantFieldOption>(&option_query)
                .bind(field.id)
                .bind(text)
                .bind(position as i32)
                .fetch_one(&mut *tx)
                .await?;
            options.push(row);
        }

        tx.commit().await?;
        Ok((field, options))
    }

    /// All fields of a survey in sort order (ties by id), each with its
    /// options in sort order.
    pub async fn list_with_options(
        pool: &PgPool,
        survey_id: DbId,
    ) -> Result<Vec<(ParticipantField, Vec<ParticipantFieldOption>)>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM participant_fields WHERE survey_id = $1 \
             ORDER BY sort_order, id"
        );
        let fields = sqlx::query_as::<_, ParticipantField>(&query)
            .bind(survey_id)
            .fetch_all(pool)
            .await?;

        let option_query = "SELECT o.id, o.field_id, o.option_text, o.sort_order \
             FROM participant_field_options o \
             JOIN participant_fields f ON f.id = o.field_id \
             WHERE f.survey_id = $1 \
             ORDER BY o.sort_order, o.id";
        let options = sqlx::query_as::<_, ParticipantFieldOption>(option_query)
            .bind(survey_id)
            .fetch_all(pool)
            .await?;

        Ok(fields
            .into_iter()
            .map(|f| {
                let own = options.iter().filter(|o| o.field_id == f.id).cloned().collect();
                (f, own)
            })
            .collect())
    }
}
