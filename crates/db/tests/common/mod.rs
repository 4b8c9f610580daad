//! Shared seeding helpers for database integration tests.

#![allow(dead_code)]

use sqlx::PgPool;
use survey_core::types::DbId;
use survey_db::models::participant_field::CreateParticipantField;
use survey_db::models::question::{CreateQuestion, CreateQuestionOption};
use survey_db::models::survey::CreateSurvey;
use survey_db::repositories::{ParticipantFieldRepo, QuestionRepo, SurveyRepo};

/// Ids of a seeded survey.
pub struct Seeded {
    pub survey_id: DbId,
    pub email_field: DbId,
    pub department_field: DbId,
    /// `[Sales, Engineering]`
    pub department_options: Vec<DbId>,
    pub color_question: DbId,
    /// `[Red, Green, Other]`, the last one flagged `is_other`.
    pub color_options: Vec<DbId>,
    pub rating_question: DbId,
    pub comment_question: DbId,
}

fn option(text: &str, is_other: bool) -> CreateQuestionOption {
    CreateQuestionOption {
        option_text: text.to_string(),
        is_other,
    }
}

/// Seed a survey with an email field, a department field, a
/// single-choice question with an "other" option, a 1..5 rating and an
/// optional text question.
pub async fn seed_survey(pool: &PgPool) -> Seeded {
    let survey = SurveyRepo::create(
        pool,
        &CreateSurvey {
            title: "Customer feedback".to_string(),
            description: Some("Quarterly".to_string()),
        },
    )
    .await
    .unwrap();

    let email = CreateParticipantField {
        field_label: "E-mail".to_string(),
        field_type: "text".to_string(),
        is_required: true,
        sort_order: 0,
        options: Vec::new(),
    };
    email.validate().unwrap();
    let (email_field, _) = ParticipantFieldRepo::create(pool, survey.id, &email)
        .await
        .unwrap();

    let department = CreateParticipantField {
        field_label: "Department".to_string(),
        field_type: "single_choice".to_string(),
        is_required: false,
        sort_order: 1,
        options: vec!["Sales".to_string(), "Engineering".to_string()],
    };
    department.validate().unwrap();
    let (department_field, department_options) =
        ParticipantFieldRepo::create(pool, survey.id, &department)
            .await
            .unwrap();

    let color = CreateQuestion {
        question_text: "Favourite colour".to_string(),
        question_type: "single_choice".to_string(),
        is_required: true,
        rating_min: None,
        rating_max: None,
        options: vec![option("Red", false), option("Green", false), option("Other", true)],
    };
    color.validate().unwrap();
    let (color_question, color_options) = QuestionRepo::create(pool, survey.id, &color)
        .await
        .unwrap();

    let rating = CreateQuestion {
        question_text: "Overall satisfaction".to_string(),
        question_type: "rating".to_string(),
        is_required: true,
        rating_min: Some(1),
        rating_max: Some(5),
        options: Vec::new(),
    };
    rating.validate().unwrap();
    let (rating_question, _) = QuestionRepo::create(pool, survey.id, &rating)
        .await
        .unwrap();

    let comment = CreateQuestion {
        question_text: "Comments".to_string(),
        question_type: "text".to_string(),
        is_required: false,
        rating_min: None,
        rating_max: None,
        options: Vec::new(),
    };
    comment.validate().unwrap();
    let (comment_question, _) = QuestionRepo::create(pool, survey.id, &comment)
        .await
        .unwrap();

    Seeded {
        survey_id: survey.id,
        email_field: email_field.id,
        department_field: department_field.id,
        department_options: department_options.iter().map(|o| o.id).collect(),
        color_question: color_question.id,
        color_options: color_options.iter().map(|o| o.id).collect(),
        rating_question: rating_question.id,
        comment_question: comment_question.id,
    }
}

/// Row count of `table`, optionally restricted by a raw `WHERE` clause.
pub async fn count(pool: &PgPool, table: &str, filter: &str) -> i64 {
    let query = if filter.is_empty() {
        format!("SELECT COUNT(*) FROM {table}")
    } else {
        format!("SELECT COUNT(*) FROM {table} WHERE {filter}")
    };
    let (n,): (i64,) = sqlx::query_as(&query)
        .fetch_one(pool)
        .await
        .unwrap_or_else(|e| panic!("{table} count failed: {e}"));
    n
}
