//! Survey entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use survey_core::types::{DbId, Timestamp};

/// A row from the `surveys` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Survey {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a new survey.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSurvey {
    pub title: String,
    pub description: Option<String>,
}
