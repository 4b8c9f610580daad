//! Repository for the `questions` and `options` tables.

use sqlx::PgPool;
use survey_core::types::DbId;

use crate::models::question::{CreateQuestion, Question, QuestionOption};

const COLUMNS: &str =
    "id, survey_id, question_text, question_type, is_required, rating_min, rating_max";

const OPTION_COLUMNS: &str = "id, question_id, option_text, is_other";

pub struct QuestionRepo;

impl QuestionRepo {
    /// Insert a question and its options in one transaction.
    ///
    /// The caller is expected to have run [`CreateQuestion::validate`].
    pub async fn create(
        pool: &PgPool,
        survey_id: DbId,
        input: &CreateQuestion,
    ) -> Result<(Question, Vec<QuestionOption>), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO questions \
                (survey_id, question_text, question_type, is_required, rating_min, rating_max) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let question = sqlx::query_as::<_, Question>(&query)
            .bind(survey_id)
            .bind(&input.question_text)
            .bind(&input.question_type)
            .bind(input.is_required)
            .bind(input.rating_min)
            .bind(input.rating_max)
            .fetch_one(&mut *tx)
            .await?;

        let option_query = format!(
            "INSERT INTO options (question_id, option_text, is_other) \
             VALUES ($1, $2, $3) RETURNING {OPTION_COLUMNS}"
        );
        let mut options = Vec::with_capacity(input.options.len());
        for option in &input.options {
            let row = sqlx::query_as::<_, QuestionOption>(&option_query)
                .bind(question.id)
                .bind(&option.option_text)
                .bind(option.is_other)
                .fetch_one(&mut *tx)
                .await?;
            options.push(row);
        }

        tx.commit().await?;
        Ok((question, options))
    }

    /// All questions of a survey in id order, each with its options.
    pub async fn list_with_options(
        pool: &PgPool,
        survey_id: DbId,
    ) -> Result<Vec<(Question, Vec<QuestionOption>)>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions WHERE survey_id = $1 ORDER BY id");
        let questions = sqlx::query_as::<_, Question>(&query)
            .bind(survey_id)
            .fetch_all(pool)
            .await?;

        let option_query = "SELECT o.id, o.question_id, o.option_text, o.is_other \
             FROM options o \
             JOIN questions q ON q.id = o.question_id \
             WHERE q.survey_id = $1 \
             ORDER BY o.id";
        let options = sqlx::query_as::<_, QuestionOption>(option_query)
            .bind(survey_id)
            .fetch_all(pool)
            .await?;

        Ok(questions
            .into_iter()
            .map(|q| {
                let own = options.iter().filter(|o| o.question_id == q.id).cloned().collect();
                (q, own)
            })
            .collect())
    }
}
