//! Participant model and the submission receipt.

use serde::Serialize;
use sqlx::FromRow;
use survey_core::analytics::ParticipantRecord;
use survey_core::types::{DbId, Timestamp};

/// A row from the `participants` table.
///
/// `first_name` and `last_name` are legacy columns and stay NULL for new
/// submissions.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Participant {
    pub id: DbId,
    pub survey_id: DbId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub duration_seconds: Option<i32>,
    pub created_at: Timestamp,
}

impl From<Participant> for ParticipantRecord {
    fn from(p: Participant) -> Self {
        Self {
            id: p.id,
            survey_id: p.survey_id,
            email: p.email,
            duration_seconds: p.duration_seconds,
            created_at: p.created_at,
        }
    }
}

/// Ids created by one persisted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    pub participant_id: DbId,
    pub response_id: DbId,
}
