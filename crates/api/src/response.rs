//! Shared response envelope types for API handlers.
//!
//! Read endpoints use a `{ "data": ... }` envelope; the submission endpoint
//! answers with the `{ "ok": ... }` acknowledgement form clients expect.

use serde::Serialize;
use survey_core::types::DbId;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Acknowledgement of an accepted submission.
#[derive(Debug, Serialize)]
pub struct SubmissionAccepted {
    pub ok: bool,
    pub participant_id: DbId,
    pub response_id: DbId,
}
