//! Question and option models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use survey_core::error::CoreError;
use survey_core::survey::{validate_rating_bounds, ChoiceOption, QuestionDef, QuestionType};
use survey_core::types::DbId;

/// A row from the `questions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Question {
    pub id: DbId,
    pub survey_id: DbId,
    pub question_text: String,
    pub question_type: String,
    pub is_required: bool,
    pub rating_min: Option<i32>,
    pub rating_max: Option<i32>,
}

/// A row from the `options` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuestionOption {
    pub id: DbId,
    pub question_id: DbId,
    pub option_text: String,
    pub is_other: bool,
}

impl Question {
    /// Combine the row with its options into a validator-ready definition.
    pub fn into_def(self, options: Vec<QuestionOption>) -> Result<QuestionDef, CoreError> {
        Ok(QuestionDef {
            id: self.id,
            text: self.question_text,
            question_type: QuestionType::from_str_value(&self.question_type)?,
            is_required: self.is_required,
            rating_min: self.rating_min,
            rating_max: self.rating_max,
            options: options
                .into_iter()
                .map(|o| ChoiceOption {
                    id: o.id,
                    text: o.option_text,
                    is_other: o.is_other,
                })
                .collect(),
        })
    }
}

/// DTO for one option of a new question.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuestionOption {
    pub option_text: String,
    #[serde(default)]
    pub is_other: bool,
}

/// DTO for creating a question together with its options.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuestion {
    pub question_text: String,
    pub question_type: String,
    #[serde(default)]
    pub is_required: bool,
    pub rating_min: Option<i32>,
    pub rating_max: Option<i32>,
    #[serde(default)]
    pub options: Vec<CreateQuestionOption>,
}

impl CreateQuestion {
    /// Check the DTO before insert.
    ///
    /// Rating bounds are only accepted on rating questions and must be given
    /// as a pair; options are only accepted on choice questions.
    pub fn validate(&self) -> Result<QuestionType, CoreError> {
        if self.question_text.trim().is_empty() {
            return Err(CoreError::Validation("Question text must not be empty".to_string()));
        }
        let question_type = QuestionType::from_str_value(&self.question_type)?;

        match (question_type, self.rating_min, self.rating_max) {
            (QuestionType::Rating, Some(min), Some(max)) => validate_rating_bounds(min, max)?,
            (QuestionType::Rating, None, None) => {}
            (QuestionType::Rating, _, _) => {
                return Err(CoreError::Validation(
                    "Rating bounds must be given together".to_string(),
                ))
            }
            (_, None, None) => {}
            _ => {
                return Err(CoreError::Validation(
                    "Only rating questions take rating bounds".to_string(),
                ))
            }
        }

        if !question_type.is_choice() && !self.options.is_empty() {
            return Err(CoreError::Validation(format!(
                "A {} question takes no options",
                question_type.as_str()
            )));
        }
        Ok(question_type)
    }
}
