//! Repository for the `surveys` table and whole-survey operations.

use sqlx::PgPool;
use survey_core::survey::SurveyDefinition;
use survey_core::types::DbId;

use crate::models::survey::{CreateSurvey, Survey};
use crate::repositories::{ParticipantFieldRepo, QuestionRepo};

const COLUMNS: &str = "id, title, description, created_at";

/// Provides catalogue operations for surveys.
pub struct SurveyRepo;

impl SurveyRepo {
    /// Insert a new survey, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSurvey) -> Result<Survey, sqlx::Error> {
        let query = format!(
            "INSERT INTO surveys (title, description) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Survey>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Survey>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM surveys WHERE id = $1");
        sqlx::query_as::<_, Survey>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all surveys, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Survey>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM surveys ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Survey>(&query).fetch_all(pool).await
    }

    /// Load a survey with its questions and participant fields.
    ///
    /// Returns `None` if the survey does not exist. A stored type string the
    /// core does not know surfaces as a decode error.
    pub async fn load_definition(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SurveyDefinition>, sqlx::Error> {
        let Some(survey) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let questions = QuestionRepo::list_with_options(pool, id).await?;
        let fields = ParticipantFieldRepo::list_with_options(pool, id).await?;

        let questions = questions
            .into_iter()
            .map(|(q, options)| q.into_def(options))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        let fields = fields
            .into_iter()
            .map(|(f, options)| f.into_def(options))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        Ok(Some(SurveyDefinition::new(
            survey.id,
            survey.title,
            survey.description,
            survey.created_at,
            questions,
            fields,
        )))
    }

    /// Delete a survey and every row that descends from it, in one
    /// transaction. Returns `true` if the survey existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Children first; no foreign key cascades.
        let statements = [
            "DELETE FROM participant_answers WHERE participant_id IN \
                (SELECT id FROM participants WHERE survey_id = $1) \
             OR field_id IN (SELECT id FROM participant_fields WHERE survey_id = $1)",
            "DELETE FROM answers WHERE response_id IN \
                (SELECT id FROM responses WHERE survey_id = $1) \
             OR question_id IN (SELECT id FROM questions WHERE survey_id = $1)",
            "DELETE FROM responses WHERE survey_id = $1",
            "DELETE FROM participants WHERE survey_id = $1",
            "DELETE FROM options WHERE question_id IN \
                (SELECT id FROM questions WHERE survey_id = $1)",
            "DELETE FROM questions WHERE survey_id = $1",
            "DELETE FROM participant_field_options WHERE field_id IN \
                (SELECT id FROM participant_fields WHERE survey_id = $1)",
            "DELETE FROM participant_fields WHERE survey_id = $1",
        ];
        for statement in statements {
            sqlx::query(statement).bind(id).execute(&mut *tx).await?;
        }

        let result = sqlx::query("DELETE FROM surveys WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(survey_id = id, "Survey deleted with all descendants");
        }
        Ok(deleted)
    }
}
