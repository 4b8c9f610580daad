//! Roster filtering: field-value filters resolved into typed predicates,
//! plus rendering of each participant's field values.
//!
//! The storage layer turns a `&[RosterPredicate]` into parameterized
//! conditions joined with AND; nothing here touches SQL text.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::analytics::ParticipantRecord;
use crate::error::CoreError;
use crate::survey::{FieldDef, FieldType, SurveyDefinition};
use crate::text_analysis::turkish_lowercase;
use crate::types::DbId;

/// Query key prefix of a roster filter: `pf_<fieldId>=<value>`.
pub const FILTER_KEY_PREFIX: &str = "pf_";

/// One field-based condition a participant must satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterPredicate {
    /// Case-insensitive substring match on a text field answer.
    TextContains { field_id: DbId, needle: String },
    /// The participant selected at least one of these options. An empty
    /// list matches nobody.
    ChoiceIn { field_id: DbId, option_ids: Vec<DbId> },
}

impl RosterPredicate {
    pub fn field_id(&self) -> DbId {
        match self {
            Self::TextContains { field_id, .. } | Self::ChoiceIn { field_id, .. } => *field_id,
        }
    }
}

/// A persisted `participant_answers` row.
#[derive(Debug, Clone)]
pub struct RecordedFieldAnswer {
    pub participant_id: DbId,
    pub field_id: DbId,
    pub option_id: Option<DbId>,
    pub answer_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDisplay {
    pub field_id: DbId,
    pub label: String,
    pub display: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RosterEntry {
    pub participant: ParticipantRecord,
    pub fields: Vec<FieldDisplay>,
}

/// Pull `pf_<fieldId>` filters out of raw query parameters.
///
/// Keys that do not carry a numeric field id are ignored.
pub fn parse_filter_params<'a, I>(params: I) -> BTreeMap<DbId, String>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    params
        .into_iter()
        .filter_map(|(key, value)| {
            let field_id = key.strip_prefix(FILTER_KEY_PREFIX)?.parse::<DbId>().ok()?;
            Some((field_id, value.to_string()))
        })
        .collect()
}

/// Resolve raw filter values (keyed by field id) into predicates.
///
/// Blank values are skipped. A field id not belonging to the survey is
/// `NotFound`. A choice value matches an option by id or by label
/// (case-insensitive).
pub fn resolve_filters(
    definition: &SurveyDefinition,
    filters: &BTreeMap<DbId, String>,
) -> Result<Vec<RosterPredicate>, CoreError> {
    let mut predicates = Vec::new();

    for (&field_id, raw) in filters {
        let value = raw.trim();
        if value.is_empty() {
            continue;
        }
        let field = definition.field(field_id).ok_or(CoreError::NotFound {
            entity: "participant_field",
            id: field_id,
        })?;

        predicates.push(match field.field_type {
            FieldType::Text => RosterPredicate::TextContains {
                field_id,
                needle: value.to_string(),
            },
            FieldType::SingleChoice | FieldType::MultipleChoice => RosterPredicate::ChoiceIn {
                field_id,
                option_ids: matching_options(field, value),
            },
        });
    }

    Ok(predicates)
}

fn matching_options(field: &FieldDef, value: &str) -> Vec<DbId> {
    let by_id = value.parse::<DbId>().ok();
    let label = turkish_lowercase(value);
    field
        .options
        .iter()
        .filter(|o| Some(o.id) == by_id || turkish_lowercase(o.text.trim()) == label)
        .map(|o| o.id)
        .collect()
}

/// Render one participant's field answers, one entry per field in field
/// order.
pub fn render_field_values(
    fields: &[FieldDef],
    answers: &[RecordedFieldAnswer],
) -> Vec<FieldDisplay> {
    fields
        .iter()
        .map(|field| {
            let rows: Vec<&RecordedFieldAnswer> =
                answers.iter().filter(|a| a.field_id == field.id).collect();
            let display = match field.field_type {
                FieldType::Text => rows
                    .iter()
                    .filter_map(|a| a.answer_text.as_deref())
                    .map(str::trim)
                    .find(|t| !t.is_empty())
                    .map(str::to_string),
                FieldType::SingleChoice | FieldType::MultipleChoice => {
                    let labels: Vec<&str> = field
                        .options
                        .iter()
                        .filter(|o| rows.iter().any(|a| a.option_id == Some(o.id)))
                        .map(|o| o.text.as_str())
                        .collect();
                    (!labels.is_empty()).then(|| labels.join(", "))
                }
            };
            FieldDisplay {
                field_id: field.id,
                label: field.label.clone(),
                display,
            }
        })
        .collect()
}

/// Attach rendered field values to an already filtered and ordered list of
/// participants.
pub fn build_roster(
    definition: &SurveyDefinition,
    participants: Vec<ParticipantRecord>,
    field_answers: &[RecordedFieldAnswer],
) -> Vec<RosterEntry> {
    participants
        .into_iter()
        .map(|participant| {
            let own: Vec<RecordedFieldAnswer> = field_answers
                .iter()
                .filter(|a| a.participant_id == participant.id)
                .cloned()
                .collect();
            RosterEntry {
                fields: render_field_values(&definition.fields, &own),
                participant,
            }
        })
        .collect()
}
