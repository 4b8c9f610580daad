//! Submission validation: raw keyed payload in, normalized answer set out.
//!
//! Validation runs fully in memory before anything is written. Participant
//! fields are checked first (in sort order), then questions (in id order);
//! the first failure aborts with a [`ValidationError`] naming the offending
//! label. On success the [`NormalizedSubmission`] carries exactly the rows
//! the writer has to insert.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use validator::ValidateEmail;

use crate::error::CoreError;
use crate::survey::{FieldDef, FieldType, QuestionDef, QuestionType, SurveyDefinition};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Upper bound for a recorded submission duration (six hours).
pub const MAX_DURATION_SECONDS: i64 = 21_600;

/// Payload key carrying the client-measured fill-in duration.
pub const DURATION_KEY: &str = "duration_seconds";

/// Letters of the extended working alphabet that are never valid in an email.
const DIACRITIC_LETTERS: &str = "çğıöşüâîûÇĞİÖŞÜÂÎÛ";

static EMAIL_SHAPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex"));

/// First numeric token in a rating value, e.g. `"4"` in `"4 stars"`.
static NUMERIC_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+(?:[.,]\d+)?").expect("valid regex"));

// ---------------------------------------------------------------------------
// Raw payload
// ---------------------------------------------------------------------------

/// A raw submission: an ordered multimap of form keys to values.
///
/// Keys follow the request surface: `pf_text_<fieldId>`, `pf_<fieldId>`,
/// `question_text_<qId>`, `question_<qId>`, `other_<qId>` and
/// `duration_seconds`. Multiple-choice selections repeat their key.
#[derive(Debug, Clone, Default)]
pub struct SubmissionPayload {
    entries: Vec<(String, String)>,
}

impl SubmissionPayload {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// First value for `key`, trimmed. Empty values count as absent.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.trim())
            .find(|v| !v.is_empty())
    }

    /// All non-empty trimmed values for `key`, duplicates removed, in
    /// submission order.
    pub fn all(&self, key: &str) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.trim())
            .filter(|v| !v.is_empty() && seen.insert(*v))
            .collect()
    }
}

fn field_text_key(field_id: DbId) -> String {
    format!("pf_text_{field_id}")
}

fn field_choice_key(field_id: DbId) -> String {
    format!("pf_{field_id}")
}

fn question_text_key(question_id: DbId) -> String {
    format!("question_text_{question_id}")
}

fn question_key(question_id: DbId) -> String {
    format!("question_{question_id}")
}

fn other_key(question_id: DbId) -> String {
    format!("other_{question_id}")
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a single field or question was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationReason {
    #[error("this field is required")]
    Required,
    #[error("not a valid email address")]
    InvalidEmail,
    #[error("the selected option is not valid")]
    UnknownOption,
    #[error("only one option may be selected")]
    SingleSelectionExpected,
    #[error("a whole number is required")]
    NotANumber,
    #[error("the rating must be between {min} and {max}")]
    RatingOutOfRange { min: i32, max: i32 },
}

/// First-failure rejection of a submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{label}: {reason}")]
pub struct ValidationError {
    /// Field label or question text shown back to the participant.
    pub label: String,
    pub reason: ValidationReason,
}

impl ValidationError {
    fn new(label: &str, reason: ValidationReason) -> Self {
        Self {
            label: label.to_string(),
            reason,
        }
    }
}

impl From<ValidationError> for CoreError {
    fn from(err: ValidationError) -> Self {
        CoreError::Validation(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Normalized output
// ---------------------------------------------------------------------------

/// Validated value of one participant field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum FieldValue {
    Text(String),
    Options(Vec<DbId>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldAnswer {
    pub field_id: DbId,
    pub value: FieldValue,
}

/// Validated answer to one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum QuestionAnswer {
    Choice {
        question_id: DbId,
        option_ids: Vec<DbId>,
        /// `(option_id, text)` of the free-text complement, when the
        /// selected option is flagged `is_other`.
        other: Option<(DbId, String)>,
    },
    Rating {
        question_id: DbId,
        value: i32,
    },
    Text {
        question_id: DbId,
        text: String,
    },
}

impl QuestionAnswer {
    pub fn question_id(&self) -> DbId {
        match self {
            Self::Choice { question_id, .. }
            | Self::Rating { question_id, .. }
            | Self::Text { question_id, .. } => *question_id,
        }
    }
}

/// One row destined for the `answers` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRow {
    pub question_id: DbId,
    pub option_id: Option<DbId>,
    pub answer_text: Option<String>,
    pub answer_number: Option<i32>,
}

/// One row destined for the `participant_answers` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAnswerRow {
    pub field_id: DbId,
    pub option_id: Option<DbId>,
    pub answer_text: Option<String>,
}

/// A fully validated submission, ready for atomic persistence.
///
/// Unanswered optional items are simply absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedSubmission {
    pub survey_id: DbId,
    pub duration_seconds: Option<i32>,
    /// Copied into the legacy `participants.email` column.
    pub email: Option<String>,
    pub field_answers: Vec<FieldAnswer>,
    pub question_answers: Vec<QuestionAnswer>,
}

impl NormalizedSubmission {
    /// Flatten question answers into `answers` rows (one per selected option
    /// for choice questions).
    pub fn answer_rows(&self) -> Vec<AnswerRow> {
        let mut rows = Vec::new();
        for answer in &self.question_answers {
            match answer {
                QuestionAnswer::Choice {
                    question_id,
                    option_ids,
                    other,
                } => {
                    for &option_id in option_ids {
                        let answer_text = other
                            .as_ref()
                            .filter(|(other_id, _)| *other_id == option_id)
                            .map(|(_, text)| text.clone());
                        rows.push(AnswerRow {
                            question_id: *question_id,
                            option_id: Some(option_id),
                            answer_text,
                            answer_number: None,
                        });
                    }
                }
                QuestionAnswer::Rating { question_id, value } => rows.push(AnswerRow {
                    question_id: *question_id,
                    option_id: None,
                    answer_text: None,
                    answer_number: Some(*value),
                }),
                QuestionAnswer::Text { question_id, text } => rows.push(AnswerRow {
                    question_id: *question_id,
                    option_id: None,
                    answer_text: Some(text.clone()),
                    answer_number: None,
                }),
            }
        }
        rows
    }

    /// Flatten field answers into `participant_answers` rows.
    pub fn field_answer_rows(&self) -> Vec<FieldAnswerRow> {
        let mut rows = Vec::new();
        for answer in &self.field_answers {
            match &answer.value {
                FieldValue::Text(text) => rows.push(FieldAnswerRow {
                    field_id: answer.field_id,
                    option_id: None,
                    answer_text: Some(text.clone()),
                }),
                FieldValue::Options(ids) => rows.extend(ids.iter().map(|&id| FieldAnswerRow {
                    field_id: answer.field_id,
                    option_id: Some(id),
                    answer_text: None,
                })),
            }
        }
        rows
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a raw payload against a survey definition.
///
/// Returns the normalized submission, or the first failure. Nothing is
/// returned partially: on error the caller has nothing to persist.
pub fn validate_submission(
    definition: &SurveyDefinition,
    payload: &SubmissionPayload,
) -> Result<NormalizedSubmission, ValidationError> {
    let mut field_answers = Vec::new();
    let mut email = None;

    for field in &definition.fields {
        if let Some(value) = validate_field(field, payload)? {
            if email.is_none() && field.denotes_email() {
                if let FieldValue::Text(text) = &value {
                    email = Some(text.clone());
                }
            }
            field_answers.push(FieldAnswer {
                field_id: field.id,
                value,
            });
        }
    }

    let mut question_answers = Vec::new();
    for question in &definition.questions {
        if let Some(answer) = validate_question(question, payload)? {
            question_answers.push(answer);
        }
    }

    Ok(NormalizedSubmission {
        survey_id: definition.survey_id,
        duration_seconds: parse_duration(payload.first(DURATION_KEY)),
        email,
        field_answers,
        question_answers,
    })
}

fn validate_field(
    field: &FieldDef,
    payload: &SubmissionPayload,
) -> Result<Option<FieldValue>, ValidationError> {
    match field.field_type {
        FieldType::Text => {
            let value = payload.first(&field_text_key(field.id));
            let Some(text) = require_text(&field.label, field.is_required, value)? else {
                return Ok(None);
            };
            if field.denotes_email() && !is_valid_email(&text) {
                return Err(ValidationError::new(
                    &field.label,
                    ValidationReason::InvalidEmail,
                ));
            }
            Ok(Some(FieldValue::Text(text)))
        }
        FieldType::SingleChoice | FieldType::MultipleChoice => {
            let raw = payload.all(&field_choice_key(field.id));
            let single = field.field_type == FieldType::SingleChoice;
            let ids = select_options(&field.label, field.is_required, single, &raw, |id| {
                field.option(id).is_some()
            })?;
            Ok(ids.map(FieldValue::Options))
        }
    }
}

fn validate_question(
    question: &QuestionDef,
    payload: &SubmissionPayload,
) -> Result<Option<QuestionAnswer>, ValidationError> {
    match question.question_type {
        QuestionType::Text => {
            let value = payload.first(&question_text_key(question.id));
            Ok(require_text(&question.text, question.is_required, value)?.map(|text| {
                QuestionAnswer::Text {
                    question_id: question.id,
                    text,
                }
            }))
        }
        QuestionType::Rating => {
            let value = payload.first(&question_key(question.id));
            Ok(parse_rating(question, value)?.map(|value| QuestionAnswer::Rating {
                question_id: question.id,
                value,
            }))
        }
        QuestionType::SingleChoice | QuestionType::MultipleChoice => {
            let raw = payload.all(&question_key(question.id));
            let single = question.question_type == QuestionType::SingleChoice;
            let Some(option_ids) =
                select_options(&question.text, question.is_required, single, &raw, |id| {
                    question.option(id).is_some()
                })?
            else {
                return Ok(None);
            };

            // The free-text complement only survives when an "other"
            // option is among the selections.
            let other = option_ids
                .iter()
                .copied()
                .find(|&id| question.option(id).is_some_and(|o| o.is_other))
                .and_then(|id| {
                    payload
                        .first(&other_key(question.id))
                        .map(|text| (id, text.to_string()))
                });

            Ok(Some(QuestionAnswer::Choice {
                question_id: question.id,
                option_ids,
                other,
            }))
        }
    }
}

/// Trimmed text value; required items must be non-empty.
fn require_text(
    label: &str,
    required: bool,
    value: Option<&str>,
) -> Result<Option<String>, ValidationError> {
    match value {
        Some(v) => Ok(Some(v.to_string())),
        None if required => Err(ValidationError::new(label, ValidationReason::Required)),
        None => Ok(None),
    }
}

/// Parse selected option ids and check membership in the option set.
fn select_options(
    label: &str,
    required: bool,
    single: bool,
    raw: &[&str],
    is_known: impl Fn(DbId) -> bool,
) -> Result<Option<Vec<DbId>>, ValidationError> {
    if raw.is_empty() {
        return if required {
            Err(ValidationError::new(label, ValidationReason::Required))
        } else {
            Ok(None)
        };
    }
    if single && raw.len() > 1 {
        return Err(ValidationError::new(
            label,
            ValidationReason::SingleSelectionExpected,
        ));
    }

    let mut ids = Vec::with_capacity(raw.len());
    for value in raw {
        let id = value
            .parse::<DbId>()
            .ok()
            .filter(|&id| is_known(id))
            .ok_or_else(|| ValidationError::new(label, ValidationReason::UnknownOption))?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(Some(ids))
}

/// Extract and range-check a rating value.
fn parse_rating(
    question: &QuestionDef,
    value: Option<&str>,
) -> Result<Option<i32>, ValidationError> {
    let token = value.and_then(|v| NUMERIC_TOKEN_RE.find(v)).map(|m| m.as_str());
    let Some(token) = token else {
        return if question.is_required {
            Err(ValidationError::new(&question.text, ValidationReason::Required))
        } else {
            Ok(None)
        };
    };

    let (min, max) = question.rating_bounds();
    let out_of_range = || {
        ValidationError::new(
            &question.text,
            ValidationReason::RatingOutOfRange { min, max },
        )
    };
    let value = token
        .parse::<i64>()
        .map_err(|_| ValidationError::new(&question.text, ValidationReason::NotANumber))?;
    if value < i64::from(min) || value > i64::from(max) {
        return Err(out_of_range());
    }
    i32::try_from(value).map(Some).map_err(|_| out_of_range())
}

/// `local@domain.tld`, no whitespace, no letters from the extended alphabet.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(|c| c.is_whitespace() || DIACRITIC_LETTERS.contains(c)) {
        return false;
    }
    EMAIL_SHAPE_RE.is_match(value) && value.validate_email()
}

/// Accept a duration only when it is an integer within `0..=21600`.
pub fn parse_duration(value: Option<&str>) -> Option<i32> {
    value
        .and_then(|v| v.parse::<i64>().ok())
        .filter(|d| (0..=MAX_DURATION_SECONDS).contains(d))
        .and_then(|d| i32::try_from(d).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::{ChoiceOption, FieldOption};
    use assert_matches::assert_matches;

    fn option(id: DbId, text: &str, is_other: bool) -> ChoiceOption {
        ChoiceOption {
            id,
            text: text.to_string(),
            is_other,
        }
    }

    fn question(id: DbId, question_type: QuestionType, required: bool) -> QuestionDef {
        QuestionDef {
            id,
            text: format!("Question {id}"),
            question_type,
            is_required: required,
            rating_min: None,
            rating_max: None,
            options: Vec::new(),
        }
    }

    fn text_field(id: DbId, label: &str, required: bool, sort_order: i32) -> FieldDef {
        FieldDef {
            id,
            label: label.to_string(),
            field_type: FieldType::Text,
            is_required: required,
            sort_order,
            options: Vec::new(),
        }
    }

    fn choice_field(id: DbId, label: &str, required: bool) -> FieldDef {
        FieldDef {
            id,
            label: label.to_string(),
            field_type: FieldType::SingleChoice,
            is_required: required,
            sort_order: 10,
            options: vec![
                FieldOption {
                    id: 100,
                    text: "Sales".to_string(),
                    sort_order: 0,
                },
                FieldOption {
                    id: 101,
                    text: "Support".to_string(),
                    sort_order: 1,
                },
            ],
        }
    }

    fn survey(questions: Vec<QuestionDef>, fields: Vec<FieldDef>) -> SurveyDefinition {
        SurveyDefinition::new(
            7,
            "Feedback".to_string(),
            None,
            chrono::Utc::now(),
            questions,
            fields,
        )
    }

    fn full_survey() -> SurveyDefinition {
        let mut single = question(1, QuestionType::SingleChoice, true);
        single.options = vec![option(10, "Yes", false), option(11, "Other", true)];
        let mut multi = question(2, QuestionType::MultipleChoice, false);
        multi.options = vec![option(20, "A", false), option(21, "B", false)];
        let mut rating = question(3, QuestionType::Rating, true);
        rating.rating_min = Some(1);
        rating.rating_max = Some(10);
        let text = question(4, QuestionType::Text, false);
        survey(
            vec![single, multi, rating, text],
            vec![
                text_field(1, "Email", true, 0),
                choice_field(2, "Department", false),
            ],
        )
    }

    fn payload(pairs: &[(&str, &str)]) -> SubmissionPayload {
        SubmissionPayload::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn accepts_complete_submission() {
        let def = full_survey();
        let p = payload(&[
            ("pf_text_1", "  ali@example.com "),
            ("pf_2", "101"),
            ("question_1", "11"),
            ("other_1", "Something else"),
            ("question_2", "20"),
            ("question_2", "21"),
            ("question_3", "8"),
            ("question_text_4", "Great service"),
            ("duration_seconds", "95"),
        ]);
        let sub = validate_submission(&def, &p).unwrap();

        assert_eq!(sub.survey_id, 7);
        assert_eq!(sub.email.as_deref(), Some("ali@example.com"));
        assert_eq!(sub.duration_seconds, Some(95));
        assert_eq!(sub.field_answers.len(), 2);
        assert_eq!(sub.question_answers.len(), 4);
        assert_eq!(
            sub.question_answers[0],
            QuestionAnswer::Choice {
                question_id: 1,
                option_ids: vec![11],
                other: Some((11, "Something else".to_string())),
            }
        );
        // 1 single + 2 multi + 1 rating + 1 text
        assert_eq!(sub.answer_rows().len(), 5);
        assert_eq!(sub.field_answer_rows().len(), 2);
    }

    #[test]
    fn optional_items_are_sparse() {
        let def = full_survey();
        let p = payload(&[
            ("pf_text_1", "ali@example.com"),
            ("question_1", "10"),
            ("question_3", "5"),
        ]);
        let sub = validate_submission(&def, &p).unwrap();
        let answered: Vec<DbId> = sub.question_answers.iter().map(|a| a.question_id()).collect();
        assert_eq!(answered, vec![1, 3]);
        assert_eq!(sub.field_answers.len(), 1);
        assert_eq!(sub.duration_seconds, None);
    }

    #[test]
    fn missing_required_text_field_is_rejected() {
        let def = full_survey();
        let p = payload(&[("pf_text_1", "   "), ("question_1", "10"), ("question_3", "5")]);
        let err = validate_submission(&def, &p).unwrap_err();
        assert_eq!(err.label, "Email");
        assert_eq!(err.reason, ValidationReason::Required);
    }

    #[test]
    fn fields_are_checked_before_questions() {
        let def = full_survey();
        // Both the email field and question 1 are missing.
        let err = validate_submission(&def, &payload(&[])).unwrap_err();
        assert_eq!(err.label, "Email");
    }

    #[test]
    fn questions_are_checked_in_id_order() {
        let def = full_survey();
        let p = payload(&[("pf_text_1", "ali@example.com")]);
        let err = validate_submission(&def, &p).unwrap_err();
        assert_eq!(err.label, "Question 1");
    }

    #[test]
    fn malformed_email_is_rejected() {
        for bad in ["ali@example", "ali veli@example.com", "çağrı@example.com", "no-at-sign"] {
            let def = full_survey();
            let p = payload(&[("pf_text_1", bad), ("question_1", "10"), ("question_3", "5")]);
            let err = validate_submission(&def, &p).unwrap_err();
            assert_eq!(err.reason, ValidationReason::InvalidEmail, "input {bad}");
        }
    }

    #[test]
    fn email_check_accepts_plain_addresses() {
        assert!(is_valid_email("ali.veli@example.com.tr"));
        assert!(is_valid_email("a+b@mail.example.org"));
        assert!(!is_valid_email("ali@@example.com"));
        assert!(!is_valid_email("ali@exam ple.com"));
    }

    #[test]
    fn unknown_option_is_rejected() {
        let def = full_survey();
        let p = payload(&[
            ("pf_text_1", "ali@example.com"),
            ("question_1", "99"),
            ("question_3", "5"),
        ]);
        let err = validate_submission(&def, &p).unwrap_err();
        assert_eq!(err.reason, ValidationReason::UnknownOption);
    }

    #[test]
    fn single_choice_rejects_two_selections() {
        let def = full_survey();
        let p = payload(&[
            ("pf_text_1", "ali@example.com"),
            ("question_1", "10"),
            ("question_1", "11"),
            ("question_3", "5"),
        ]);
        let err = validate_submission(&def, &p).unwrap_err();
        assert_eq!(err.reason, ValidationReason::SingleSelectionExpected);
    }

    #[test]
    fn other_text_is_discarded_without_other_option() {
        let def = full_survey();
        let p = payload(&[
            ("pf_text_1", "ali@example.com"),
            ("question_1", "10"),
            ("other_1", "ignored"),
            ("question_3", "5"),
        ]);
        let sub = validate_submission(&def, &p).unwrap();
        assert_matches!(&sub.question_answers[0], QuestionAnswer::Choice { other: None, .. });
        assert!(sub.answer_rows()[0].answer_text.is_none());
    }

    #[test]
    fn rating_outside_bounds_is_rejected() {
        let def = full_survey();
        let p = payload(&[
            ("pf_text_1", "ali@example.com"),
            ("question_1", "10"),
            ("question_3", "11"),
        ]);
        let err = validate_submission(&def, &p).unwrap_err();
        assert_eq!(err.reason, ValidationReason::RatingOutOfRange { min: 1, max: 10 });
    }

    #[test]
    fn rating_uses_default_scale_when_unset() {
        let def = survey(vec![question(1, QuestionType::Rating, true)], Vec::new());
        let err = validate_submission(&def, &payload(&[("question_1", "6")])).unwrap_err();
        assert_eq!(err.reason, ValidationReason::RatingOutOfRange { min: 1, max: 5 });
    }

    #[test]
    fn rating_extracts_numeric_token() {
        let def = survey(vec![question(1, QuestionType::Rating, true)], Vec::new());
        let sub = validate_submission(&def, &payload(&[("question_1", "4 stars")])).unwrap();
        assert_eq!(
            sub.question_answers,
            vec![QuestionAnswer::Rating {
                question_id: 1,
                value: 4
            }]
        );
    }

    #[test]
    fn rating_without_numeric_token_counts_as_missing() {
        let def = survey(vec![question(1, QuestionType::Rating, true)], Vec::new());
        let err = validate_submission(&def, &payload(&[("question_1", "great")])).unwrap_err();
        assert_eq!(err.reason, ValidationReason::Required);

        let optional = survey(vec![question(1, QuestionType::Rating, false)], Vec::new());
        let sub = validate_submission(&optional, &payload(&[("question_1", "great")])).unwrap();
        assert!(sub.question_answers.is_empty());
    }

    #[test]
    fn fractional_rating_is_rejected() {
        let def = survey(vec![question(1, QuestionType::Rating, true)], Vec::new());
        let err = validate_submission(&def, &payload(&[("question_1", "3.5")])).unwrap_err();
        assert_eq!(err.reason, ValidationReason::NotANumber);
    }

    #[test]
    fn duplicate_multiple_choice_values_collapse() {
        let mut multi = question(1, QuestionType::MultipleChoice, true);
        multi.options = vec![option(20, "A", false), option(21, "B", false)];
        let def = survey(vec![multi], Vec::new());
        let p = payload(&[("question_1", "21"), ("question_1", "21"), ("question_1", "20")]);
        let sub = validate_submission(&def, &p).unwrap();
        assert_matches!(
            &sub.question_answers[0],
            QuestionAnswer::Choice { option_ids, .. } if option_ids == &vec![21, 20]
        );
    }

    #[test]
    fn duration_outside_bounds_is_discarded() {
        assert_eq!(parse_duration(Some("0")), Some(0));
        assert_eq!(parse_duration(Some("21600")), Some(21_600));
        assert_eq!(parse_duration(Some("21601")), None);
        assert_eq!(parse_duration(Some("-3")), None);
        assert_eq!(parse_duration(Some("soon")), None);
        assert_eq!(parse_duration(None), None);
    }

    #[test]
    fn validation_error_converts_to_core_error() {
        let err = ValidationError::new("Email", ValidationReason::InvalidEmail);
        let core: CoreError = err.into();
        assert_matches!(
            core,
            CoreError::Validation(msg) if msg == "Email: not a valid email address"
        );
    }
}
