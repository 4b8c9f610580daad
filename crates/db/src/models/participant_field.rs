//! Participant intake field models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use survey_core::error::CoreError;
use survey_core::survey::{validate_field_options, FieldDef, FieldOption, FieldType};
use survey_core::types::DbId;

/// A row from the `participant_fields` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ParticipantField {
    pub id: DbId,
    pub survey_id: DbId,
    pub field_label: String,
    pub field_type: String,
    pub is_required: bool,
    pub sort_order: i32,
}

/// A row from the `participant_field_options` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ParticipantFieldOption {
    pub id: DbId,
    pub field_id: DbId,
    pub option_text: String,
    pub sort_order: i32,
}

impl ParticipantField {
    pub fn into_def(self, options: Vec<ParticipantFieldOption>) -> Result<FieldDef, CoreError> {
        Ok(FieldDef {
            id: self.id,
            label: self.field_label,
            field_type: FieldType::from_str_value(&self.field_type)?,
            is_required: self.is_required,
            sort_order: self.sort_order,
            options: options
                .into_iter()
                .map(|o| FieldOption {
                    id: o.id,
                    text: o.option_text,
                    sort_order: o.sort_order,
                })
                .collect(),
        })
    }
}

/// DTO for creating a participant field. Option sort order follows the
/// order of `options`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateParticipantField {
    pub field_label: String,
    pub field_type: String,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub options: Vec<String>,
}

impl CreateParticipantField {
    pub fn validate(&self) -> Result<FieldType, CoreError> {
        if self.field_label.trim().is_empty() {
            return Err(CoreError::Validation("Field label must not be empty".to_string()));
        }
        let field_type = FieldType::from_str_value(&self.field_type)?;
        validate_field_options(field_type, self.options.len())?;
        if !field_type.is_choice() && !self.options.is_empty() {
            return Err(CoreError::Validation("A text field takes no options".to_string()));
        }
        Ok(field_type)
    }
}
