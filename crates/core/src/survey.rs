//! Survey definition types shared by the validator and the analytics engine.
//!
//! A [`SurveyDefinition`] is the in-memory view of one survey: its questions
//! (with options) and its participant fields (with options), each already in
//! the order the validator walks them.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const TYPE_SINGLE_CHOICE: &str = "single_choice";
pub const TYPE_MULTIPLE_CHOICE: &str = "multiple_choice";
pub const TYPE_RATING: &str = "rating";
pub const TYPE_TEXT: &str = "text";

/// All valid question type strings.
pub const VALID_QUESTION_TYPES: &[&str] = &[
    TYPE_SINGLE_CHOICE,
    TYPE_MULTIPLE_CHOICE,
    TYPE_RATING,
    TYPE_TEXT,
];

/// All valid participant field type strings.
pub const VALID_FIELD_TYPES: &[&str] = &[TYPE_TEXT, TYPE_SINGLE_CHOICE, TYPE_MULTIPLE_CHOICE];

/// Rating scale used when a rating question has no bounds configured.
pub const DEFAULT_RATING_MIN: i32 = 1;
pub const DEFAULT_RATING_MAX: i32 = 5;

/// Hard limits for configured rating bounds.
pub const RATING_LOWER_LIMIT: i32 = 1;
pub const RATING_UPPER_LIMIT: i32 = 10;

/// Choice-type participant fields need at least this many options.
pub const MIN_CHOICE_FIELD_OPTIONS: usize = 2;

/// Label fragments that mark a text field as an email address.
const EMAIL_LABEL_MARKERS: &[&str] = &["email", "e-mail", "mail"];

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// The answer shape a question expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    SingleChoice,
    MultipleChoice,
    Rating,
    Text,
}

impl QuestionType {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            TYPE_SINGLE_CHOICE => Ok(Self::SingleChoice),
            TYPE_MULTIPLE_CHOICE => Ok(Self::MultipleChoice),
            TYPE_RATING => Ok(Self::Rating),
            TYPE_TEXT => Ok(Self::Text),
            _ => Err(CoreError::Validation(format!(
                "Invalid question type '{s}'. Must be one of: {}",
                VALID_QUESTION_TYPES.join(", ")
            ))),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SingleChoice => TYPE_SINGLE_CHOICE,
            Self::MultipleChoice => TYPE_MULTIPLE_CHOICE,
            Self::Rating => TYPE_RATING,
            Self::Text => TYPE_TEXT,
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self, Self::SingleChoice | Self::MultipleChoice)
    }
}

/// The answer shape a participant field expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    SingleChoice,
    MultipleChoice,
}

impl FieldType {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            TYPE_TEXT => Ok(Self::Text),
            TYPE_SINGLE_CHOICE => Ok(Self::SingleChoice),
            TYPE_MULTIPLE_CHOICE => Ok(Self::MultipleChoice),
            _ => Err(CoreError::Validation(format!(
                "Invalid field type '{s}'. Must be one of: {}",
                VALID_FIELD_TYPES.join(", ")
            ))),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => TYPE_TEXT,
            Self::SingleChoice => TYPE_SINGLE_CHOICE,
            Self::MultipleChoice => TYPE_MULTIPLE_CHOICE,
        }
    }

    pub fn is_choice(&self) -> bool {
        !matches!(self, Self::Text)
    }
}

// ---------------------------------------------------------------------------
// Definition structs
// ---------------------------------------------------------------------------

/// One selectable option of a choice question.
#[derive(Debug, Clone, Serialize)]
pub struct ChoiceOption {
    pub id: DbId,
    pub text: String,
    /// Selecting this option unlocks the free-text "other" answer.
    pub is_other: bool,
}

/// A survey question with its options.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionDef {
    pub id: DbId,
    pub text: String,
    pub question_type: QuestionType,
    pub is_required: bool,
    pub rating_min: Option<i32>,
    pub rating_max: Option<i32>,
    pub options: Vec<ChoiceOption>,
}

impl QuestionDef {
    /// Effective `[min, max]` scale of a rating question.
    ///
    /// Falls back to 1..=5 when either bound is unset or the stored pair
    /// is inconsistent.
    pub fn rating_bounds(&self) -> (i32, i32) {
        match (self.rating_min, self.rating_max) {
            (Some(min), Some(max)) if validate_rating_bounds(min, max).is_ok() => (min, max),
            _ => (DEFAULT_RATING_MIN, DEFAULT_RATING_MAX),
        }
    }

    pub fn option(&self, option_id: DbId) -> Option<&ChoiceOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

/// One selectable option of a choice-type participant field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldOption {
    pub id: DbId,
    pub text: String,
    pub sort_order: i32,
}

/// A custom participant intake field with its options.
#[derive(Debug, Clone, Serialize)]
pub struct FieldDef {
    pub id: DbId,
    pub label: String,
    pub field_type: FieldType,
    pub is_required: bool,
    pub sort_order: i32,
    pub options: Vec<FieldOption>,
}

impl FieldDef {
    /// Whether the label names an email address (case-insensitive).
    pub fn denotes_email(&self) -> bool {
        let label = self.label.to_lowercase();
        EMAIL_LABEL_MARKERS.iter().any(|m| label.contains(m))
    }

    pub fn option(&self, option_id: DbId) -> Option<&FieldOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

/// Everything the validator and the analytics engine need to know about a survey.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyDefinition {
    pub survey_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    /// Questions in id order.
    pub questions: Vec<QuestionDef>,
    /// Participant fields in sort order (ties by id).
    pub fields: Vec<FieldDef>,
}

impl SurveyDefinition {
    /// Build a definition, putting questions, fields and options into
    /// their canonical order.
    pub fn new(
        survey_id: DbId,
        title: String,
        description: Option<String>,
        created_at: Timestamp,
        mut questions: Vec<QuestionDef>,
        mut fields: Vec<FieldDef>,
    ) -> Self {
        questions.sort_by_key(|q| q.id);
        for q in &mut questions {
            q.options.sort_by_key(|o| o.id);
        }
        fields.sort_by_key(|f| (f.sort_order, f.id));
        for f in &mut fields {
            f.options.sort_by_key(|o| (o.sort_order, o.id));
        }
        Self {
            survey_id,
            title,
            description,
            created_at,
            questions,
            fields,
        }
    }

    pub fn question(&self, question_id: DbId) -> Option<&QuestionDef> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    pub fn field(&self, field_id: DbId) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    pub fn required_question_count(&self) -> usize {
        self.questions.iter().filter(|q| q.is_required).count()
    }
}

// ---------------------------------------------------------------------------
// Definition validation
// ---------------------------------------------------------------------------

/// Validate configured rating bounds: `1 <= min <= max <= 10`.
pub fn validate_rating_bounds(min: i32, max: i32) -> Result<(), CoreError> {
    if min < RATING_LOWER_LIMIT || max > RATING_UPPER_LIMIT || min > max {
        return Err(CoreError::Validation(format!(
            "Rating bounds must satisfy {RATING_LOWER_LIMIT} <= min <= max <= {RATING_UPPER_LIMIT} \
             (got min={min}, max={max})"
        )));
    }
    Ok(())
}

/// Validate the option count of a participant field.
pub fn validate_field_options(field_type: FieldType, option_count: usize) -> Result<(), CoreError> {
    if field_type.is_choice() && option_count < MIN_CHOICE_FIELD_OPTIONS {
        return Err(CoreError::Validation(format!(
            "A {} field needs at least {MIN_CHOICE_FIELD_OPTIONS} options (got {option_count})",
            field_type.as_str()
        )));
    }
    Ok(())
}
