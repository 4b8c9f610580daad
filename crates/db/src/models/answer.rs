//! Read models for persisted answers.

use sqlx::FromRow;
use survey_core::analytics::RecordedAnswer;
use survey_core::roster::RecordedFieldAnswer;
use survey_core::types::DbId;

/// An `answers` row joined with its response's participant.
#[derive(Debug, Clone, FromRow)]
pub struct AnswerRow {
    pub id: DbId,
    pub response_id: DbId,
    pub participant_id: DbId,
    pub question_id: DbId,
    pub option_id: Option<DbId>,
    pub answer_text: Option<String>,
    pub answer_number: Option<i32>,
}

impl From<AnswerRow> for RecordedAnswer {
    fn from(r: AnswerRow) -> Self {
        Self {
            id: r.id,
            response_id: r.response_id,
            participant_id: r.participant_id,
            question_id: r.question_id,
            option_id: r.option_id,
            answer_text: r.answer_text,
            answer_number: r.answer_number,
        }
    }
}

/// A row from the `participant_answers` table.
#[derive(Debug, Clone, FromRow)]
pub struct ParticipantAnswerRow {
    pub id: DbId,
    pub participant_id: DbId,
    pub field_id: DbId,
    pub option_id: Option<DbId>,
    pub answer_text: Option<String>,
}

impl From<ParticipantAnswerRow> for RecordedFieldAnswer {
    fn from(r: ParticipantAnswerRow) -> Self {
        Self {
            participant_id: r.participant_id,
            field_id: r.field_id,
            option_id: r.option_id,
            answer_text: r.answer_text,
        }
    }
}
