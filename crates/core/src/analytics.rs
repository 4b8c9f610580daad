//! Aggregation engine: survey overview, per-question statistics and the
//! per-participant completion view.
//!
//! Everything here works on answers already loaded by the caller. Numeric
//! edge cases (zero denominators, empty samples) produce defined values,
//! never errors.

use std::collections::HashSet;

use serde::Serialize;

use crate::roster::{render_field_values, FieldDisplay, RecordedFieldAnswer};
use crate::survey::{QuestionDef, QuestionType, SurveyDefinition};
use crate::text_analysis::{top_terms, TermCount, TOP_TERMS};
use crate::types::{DbId, Timestamp};

/// Maximum number of "other" free-text answers listed per question.
pub const MAX_OTHER_ANSWERS: usize = 50;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// A participant as far as analytics are concerned.
#[derive(Debug, Clone, Serialize)]
pub struct ParticipantRecord {
    pub id: DbId,
    pub survey_id: DbId,
    pub email: Option<String>,
    pub duration_seconds: Option<i32>,
    pub created_at: Timestamp,
}

/// One persisted `answers` row joined with its response's participant.
#[derive(Debug, Clone)]
pub struct RecordedAnswer {
    pub id: DbId,
    pub response_id: DbId,
    pub participant_id: DbId,
    pub question_id: DbId,
    pub option_id: Option<DbId>,
    pub answer_text: Option<String>,
    pub answer_number: Option<i32>,
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct SurveyOverview {
    pub participant_count: i64,
    pub question_count: usize,
    pub required_question_count: usize,
    /// Mean duration over participants with a recorded duration.
    pub average_duration_seconds: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionTally {
    pub option_id: DbId,
    pub text: String,
    pub is_other: bool,
    pub count: i64,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionRef {
    pub option_id: DbId,
    pub text: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OtherAnswer {
    pub answer_id: DbId,
    pub participant_id: DbId,
    pub text: String,
    /// Belongs to the participant currently being inspected.
    pub is_own: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChoiceStats {
    pub options: Vec<OptionTally>,
    /// Percentage denominator: responders for single choice, selections
    /// for multiple choice.
    pub total_votes: i64,
    pub most: Option<OptionRef>,
    pub least: Option<OptionRef>,
    pub other_answers: Vec<OtherAnswer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingBucket {
    pub value: i32,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RatingStats {
    pub min: i32,
    pub max: i32,
    pub n: i64,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    /// Sample standard deviation (`n - 1` denominator), 0 when `n <= 1`.
    pub std_dev: f64,
    /// One bucket per integer in `[min, max]`.
    pub distribution: Vec<RatingBucket>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextStats {
    pub response_count: i64,
    pub average_length: Option<f64>,
    pub top_terms: Vec<TermCount>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum QuestionDetail {
    Choice(ChoiceStats),
    Rating(RatingStats),
    Text(TextStats),
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionStatistics {
    pub question_id: DbId,
    pub question_text: String,
    pub question_type: QuestionType,
    pub is_required: bool,
    /// Distinct responses with at least one answer to this question.
    pub responders: i64,
    pub missing: i64,
    pub detail: QuestionDetail,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticipantQuestionView {
    pub question_id: DbId,
    pub question_text: String,
    pub question_type: QuestionType,
    pub is_required: bool,
    pub answered: bool,
    pub display: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticipantDetail {
    pub participant: ParticipantRecord,
    pub answered_count: usize,
    pub missing_required: usize,
    pub questions: Vec<ParticipantQuestionView>,
    pub fields: Vec<FieldDisplay>,
}

// ---------------------------------------------------------------------------
// Numeric helpers
// ---------------------------------------------------------------------------

/// `count / denominator` as a percentage rounded to one decimal (ties to
/// even); 0 when the denominator is 0.
pub fn percentage(count: i64, denominator: i64) -> f64 {
    if denominator <= 0 {
        return 0.0;
    }
    (count as f64 * 1000.0 / denominator as f64).round_ties_even() / 10.0
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Bessel-corrected standard deviation; 0 for fewer than two values.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() <= 1 {
        return 0.0;
    }
    let avg = values.iter().sum::<f64>() / values.len() as f64;
    let sum_sq: f64 = values.iter().map(|v| (v - avg).powi(2)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

pub fn survey_overview(
    definition: &SurveyDefinition,
    participants: &[ParticipantRecord],
) -> SurveyOverview {
    let durations: Vec<f64> = participants
        .iter()
        .filter_map(|p| p.duration_seconds)
        .map(f64::from)
        .collect();

    SurveyOverview {
        participant_count: participants.len() as i64,
        question_count: definition.questions.len(),
        required_question_count: definition.required_question_count(),
        average_duration_seconds: mean(&durations),
    }
}

// ---------------------------------------------------------------------------
// Per-question statistics
// ---------------------------------------------------------------------------

/// Statistics for every question of the survey, in question order.
///
/// `inspected_participant` pins that participant's own "other" answer to
/// the front of each choice question's free-text list.
pub fn question_statistics(
    definition: &SurveyDefinition,
    answers: &[RecordedAnswer],
    participant_count: i64,
    inspected_participant: Option<DbId>,
) -> Vec<QuestionStatistics> {
    definition
        .questions
        .iter()
        .map(|q| {
            let rows: Vec<&RecordedAnswer> =
                answers.iter().filter(|a| a.question_id == q.id).collect();
            question_statistic(q, &rows, participant_count, inspected_participant)
        })
        .collect()
}

/// Statistics for one question given only that question's answer rows.
pub fn question_statistic(
    question: &QuestionDef,
    rows: &[&RecordedAnswer],
    participant_count: i64,
    inspected_participant: Option<DbId>,
) -> QuestionStatistics {
    // Stale ratings outside the current scale count as unanswered.
    let kept: Vec<&RecordedAnswer> = match question.question_type {
        QuestionType::Rating => {
            let (min, max) = question.rating_bounds();
            rows.iter()
                .copied()
                .filter(|a| a.answer_number.is_some_and(|v| (min..=max).contains(&v)))
                .collect()
        }
        _ => rows.to_vec(),
    };
    let rows = kept.as_slice();

    let responders = rows
        .iter()
        .map(|a| a.response_id)
        .collect::<HashSet<_>>()
        .len() as i64;

    let detail = match question.question_type {
        QuestionType::SingleChoice | QuestionType::MultipleChoice => QuestionDetail::Choice(
            choice_stats(question, rows, responders, inspected_participant),
        ),
        QuestionType::Rating => QuestionDetail::Rating(rating_stats(question, rows)),
        QuestionType::Text => QuestionDetail::Text(text_stats(rows)),
    };

    QuestionStatistics {
        question_id: question.id,
        question_text: question.text.clone(),
        question_type: question.question_type,
        is_required: question.is_required,
        responders,
        missing: (participant_count - responders).max(0),
        detail,
    }
}

fn choice_stats(
    question: &QuestionDef,
    rows: &[&RecordedAnswer],
    responders: i64,
    inspected_participant: Option<DbId>,
) -> ChoiceStats {
    let counts: Vec<i64> = question
        .options
        .iter()
        .map(|o| rows.iter().filter(|a| a.option_id == Some(o.id)).count() as i64)
        .collect();

    let total_votes = match question.question_type {
        QuestionType::MultipleChoice => counts.iter().sum(),
        _ => responders,
    };

    let options: Vec<OptionTally> = question
        .options
        .iter()
        .zip(&counts)
        .map(|(o, &count)| OptionTally {
            option_id: o.id,
            text: o.text.clone(),
            is_other: o.is_other,
            count,
            percent: percentage(count, total_votes),
        })
        .collect();

    let (most, least) = if counts.iter().sum::<i64>() == 0 {
        (None, None)
    } else {
        (
            pick_option(&options, |count, best| count > best),
            pick_option(&options, |count, best| count < best),
        )
    };

    ChoiceStats {
        other_answers: other_answers(question, rows, inspected_participant),
        options,
        total_votes,
        most,
        least,
    }
}

/// First option (in option order) that wins under `better`.
fn pick_option(options: &[OptionTally], better: impl Fn(i64, i64) -> bool) -> Option<OptionRef> {
    let mut best: Option<&OptionTally> = None;
    for o in options {
        if best.map_or(true, |b| better(o.count, b.count)) {
            best = Some(o);
        }
    }
    best.map(|o| OptionRef {
        option_id: o.option_id,
        text: o.text.clone(),
        count: o.count,
    })
}

/// Most recent free-text "other" answers, the inspected participant's own
/// answer first.
fn other_answers(
    question: &QuestionDef,
    rows: &[&RecordedAnswer],
    inspected_participant: Option<DbId>,
) -> Vec<OtherAnswer> {
    let mut texts: Vec<&RecordedAnswer> = rows
        .iter()
        .copied()
        .filter(|a| {
            a.option_id
                .and_then(|id| question.option(id))
                .is_some_and(|o| o.is_other)
        })
        .filter(|a| a.answer_text.as_deref().is_some_and(|t| !t.trim().is_empty()))
        .collect();
    // Answer ids are monotonic, so id order is recency order.
    texts.sort_by(|a, b| b.id.cmp(&a.id));

    let to_view = |a: &RecordedAnswer| OtherAnswer {
        answer_id: a.id,
        participant_id: a.participant_id,
        text: a.answer_text.clone().unwrap_or_default(),
        is_own: Some(a.participant_id) == inspected_participant,
    };

    let own = inspected_participant
        .and_then(|pid| texts.iter().copied().find(|a| a.participant_id == pid));

    let mut result: Vec<OtherAnswer> = Vec::with_capacity(MAX_OTHER_ANSWERS);
    if let Some(own) = own {
        result.push(to_view(own));
    }
    result.extend(
        texts
            .iter()
            .copied()
            .filter(|a| own.map_or(true, |o| o.id != a.id))
            .map(to_view),
    );
    result.truncate(MAX_OTHER_ANSWERS);
    result
}

fn rating_stats(question: &QuestionDef, rows: &[&RecordedAnswer]) -> RatingStats {
    let (min, max) = question.rating_bounds();
    // Values outside the current scale are stale (bounds edited later).
    let values: Vec<i32> = rows
        .iter()
        .filter_map(|a| a.answer_number)
        .filter(|v| (min..=max).contains(v))
        .collect();
    let as_f64: Vec<f64> = values.iter().copied().map(f64::from).collect();

    let distribution = (min..=max)
        .map(|value| RatingBucket {
            value,
            count: values.iter().filter(|&&v| v == value).count() as i64,
        })
        .collect();

    RatingStats {
        min,
        max,
        n: values.len() as i64,
        mean: mean(&as_f64),
        median: median(&as_f64),
        std_dev: sample_std_dev(&as_f64),
        distribution,
    }
}

fn text_stats(rows: &[&RecordedAnswer]) -> TextStats {
    let texts: Vec<&str> = rows
        .iter()
        .filter_map(|a| a.answer_text.as_deref())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    let lengths: Vec<f64> = texts.iter().map(|t| t.chars().count() as f64).collect();

    TextStats {
        response_count: texts.len() as i64,
        average_length: mean(&lengths),
        top_terms: top_terms(texts.iter().copied(), TOP_TERMS),
    }
}

// ---------------------------------------------------------------------------
// Per-participant view
// ---------------------------------------------------------------------------

/// Completion state and rendered answers of one participant.
///
/// `answers` and `field_answers` must already be restricted to this
/// participant.
pub fn participant_detail(
    definition: &SurveyDefinition,
    participant: ParticipantRecord,
    answers: &[RecordedAnswer],
    field_answers: &[RecordedFieldAnswer],
) -> ParticipantDetail {
    let questions: Vec<ParticipantQuestionView> = definition
        .questions
        .iter()
        .map(|q| {
            let rows: Vec<&RecordedAnswer> =
                answers.iter().filter(|a| a.question_id == q.id).collect();
            let display = render_answer(q, &rows);
            ParticipantQuestionView {
                question_id: q.id,
                question_text: q.text.clone(),
                question_type: q.question_type,
                is_required: q.is_required,
                answered: display.is_some(),
                display,
            }
        })
        .collect();

    let answered_count = questions.iter().filter(|q| q.answered).count();
    let missing_required = questions
        .iter()
        .filter(|q| q.is_required && !q.answered)
        .count();

    ParticipantDetail {
        fields: render_field_values(&definition.fields, field_answers),
        participant,
        answered_count,
        missing_required,
        questions,
    }
}

/// Human-readable rendering of one participant's answer rows.
fn render_answer(question: &QuestionDef, rows: &[&RecordedAnswer]) -> Option<String> {
    match question.question_type {
        QuestionType::SingleChoice | QuestionType::MultipleChoice => {
            let labels: Vec<String> = question
                .options
                .iter()
                .filter_map(|o| {
                    let row = rows.iter().find(|a| a.option_id == Some(o.id))?;
                    let other = row
                        .answer_text
                        .as_deref()
                        .map(str::trim)
                        .filter(|t| o.is_other && !t.is_empty());
                    Some(match other {
                        Some(text) => format!("{} ({text})", o.text),
                        None => o.text.clone(),
                    })
                })
                .collect();
            (!labels.is_empty()).then(|| labels.join(", "))
        }
        QuestionType::Rating => rows
            .iter()
            .find_map(|a| a.answer_number)
            .map(|n| n.to_string()),
        QuestionType::Text => rows
            .iter()
            .filter_map(|a| a.answer_text.as_deref())
            .map(str::trim)
            .find(|t| !t.is_empty())
            .map(str::to_string),
    }
}
