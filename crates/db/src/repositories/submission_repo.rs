//! Submission writer: persists one validated submission atomically.

use sqlx::PgPool;
use survey_core::submission::NormalizedSubmission;
use survey_core::types::DbId;

use crate::models::participant::SubmissionReceipt;

pub struct SubmissionRepo;

impl SubmissionRepo {
    /// Write participant, response, answers and field answers in one
    /// transaction.
    ///
    /// Any failure drops the transaction before commit, so no partial
    /// submission is ever visible.
    pub async fn persist(
        pool: &PgPool,
        submission: &NormalizedSubmission,
    ) -> Result<SubmissionReceipt, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (participant_id,): (DbId,) = sqlx::query_as(
            "INSERT INTO participants (survey_id, email, duration_seconds) \
             VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(submission.survey_id)
        .bind(&submission.email)
        .bind(submission.duration_seconds)
        .fetch_one(&mut *tx)
        .await?;

        let (response_id,): (DbId,) = sqlx::query_as(
            "INSERT INTO responses (survey_id, participant_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(submission.survey_id)
        .bind(participant_id)
        .fetch_one(&mut *tx)
        .await?;

        let answer_rows = submission.answer_rows();
        for row in &answer_rows {
            sqlx::query(
                "INSERT INTO answers \
                    (response_id, question_id, option_id, answer_text, answer_number) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(response_id)
            .bind(row.question_id)
            .bind(row.option_id)
            .bind(&row.answer_text)
            .bind(row.answer_number)
            .execute(&mut *tx)
            .await?;
        }

        let field_rows = submission.field_answer_rows();
        for row in &field_rows {
            sqlx::query(
                "INSERT INTO participant_answers \
                    (participant_id, field_id, option_id, answer_text) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(participant_id)
            .bind(row.field_id)
            .bind(row.option_id)
            .bind(&row.answer_text)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(
            survey_id = submission.survey_id,
            participant_id,
            response_id,
            answers = answer_rows.len(),
            field_answers = field_rows.len(),
            "Submission persisted",
        );

        Ok(SubmissionReceipt {
            participant_id,
            response_id,
        })
    }
}
