//! Shared helpers for HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use survey_api::config::ServerConfig;
use survey_api::router::build_app_router;
use survey_api::state::AppState;
use survey_core::types::DbId;
use survey_db::models::participant_field::CreateParticipantField;
use survey_db::models::question::{CreateQuestion, CreateQuestionOption};
use survey_db::models::survey::CreateSurvey;
use survey_db::repositories::{ParticipantFieldRepo, QuestionRepo, SurveyRepo};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
    }
}

/// Build the full application router (same middleware stack as production).
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST an `application/x-www-form-urlencoded` body built from `pairs`.
///
/// Values are percent-encoded byte by byte, enough for the ASCII and UTF-8
/// test inputs used here.
pub async fn post_form(app: Router, uri: &str, pairs: &[(String, String)]) -> Response<Body> {
    let body = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", form_encode(k), form_encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

fn form_encode(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{b:02X}"),
        })
        .collect()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Ids of a seeded survey.
pub struct Seeded {
    pub survey_id: DbId,
    pub email_field: DbId,
    pub department_field: DbId,
    /// `[Sales, Engineering]`
    pub department_options: Vec<DbId>,
    /// Single choice, required; options `[Red, Green, Other]` (Other is free-text).
    pub color_question: DbId,
    pub color_options: Vec<DbId>,
    /// Multiple choice, optional; options `[Fast, Cheap, Good]`.
    pub traits_question: DbId,
    pub traits_options: Vec<DbId>,
    /// Rating 1..5, required.
    pub rating_question: DbId,
    /// Text, optional.
    pub comment_question: DbId,
}

fn options(texts: &[(&str, bool)]) -> Vec<CreateQuestionOption> {
    texts
        .iter()
        .map(|(text, is_other)| CreateQuestionOption {
            option_text: text.to_string(),
            is_other: *is_other,
        })
        .collect()
}

async fn question(
    pool: &PgPool,
    survey_id: DbId,
    text: &str,
    question_type: &str,
    is_required: bool,
    option_texts: &[(&str, bool)],
) -> (DbId, Vec<DbId>) {
    let input = CreateQuestion {
        question_text: text.to_string(),
        question_type: question_type.to_string(),
        is_required,
        rating_min: (question_type == "rating").then_some(1),
        rating_max: (question_type == "rating").then_some(5),
        options: options(option_texts),
    };
    input.validate().unwrap();
    let (q, opts) = QuestionRepo::create(pool, survey_id, &input).await.unwrap();
    (q.id, opts.iter().map(|o| o.id).collect())
}

pub async fn seed_survey(pool: &PgPool) -> Seeded {
    let survey = SurveyRepo::create(
        pool,
        &CreateSurvey {
            title: "Müşteri memnuniyeti".to_string(),
            description: None,
        },
    )
    .await
    .unwrap();

    let email = CreateParticipantField {
        field_label: "Email".to_string(),
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

    let (color_question, color_options) = question(
        pool,
        survey.id,
        "Favourite colour",
        "single_choice",
        true,
        &[("Red", false), ("Green", false), ("Other", true)],
    )
    .await;
    let (traits_question, traits_options) = question(
        pool,
        survey.id,
        "What describes us?",
        "multiple_choice",
        false,
        &[("Fast", false), ("Cheap", false), ("Good", false)],
    )
    .await;
    let (rating_question, _) =
        question(pool, survey.id, "Overall satisfaction", "rating", true, &[]).await;
    let (comment_question, _) = question(pool, survey.id, "Comments", "text", false, &[]).await;

    Seeded {
        survey_id: survey.id,
        email_field: email_field.id,
        department_field: department_field.id,
        department_options: department_options.iter().map(|o| o.id).collect(),
        color_question,
        color_options,
        traits_question,
        traits_options,
        rating_question,
        comment_question,
    }
}

/// A submission builder for the seeded survey.
pub struct Submission<'a> {
    seeded: &'a Seeded,
    pairs: Vec<(String, String)>,
}

impl<'a> Submission<'a> {
    /// Starts with a valid email, the first colour and a rating of 3.
    pub fn new(seeded: &'a Seeded) -> Self {
        Self {
            seeded,
            pairs: vec![
                (format!("pf_text_{}", seeded.email_field), "user@example.com".to_string()),
                (
                    format!("question_{}", seeded.color_question),
                    seeded.color_options[0].to_string(),
                ),
                (format!("question_{}", seeded.rating_question), "3".to_string()),
            ],
        }
    }

    /// Replace every pair with `key`, or remove them when `value` is `None`.
    pub fn set(mut self, key: String, value: Option<&str>) -> Self {
        self.pairs.retain(|(k, _)| *k != key);
        if let Some(value) = value {
            self.pairs.push((key, value.to_string()));
        }
        self
    }

    /// Append a pair without removing existing ones (repeated keys).
    pub fn add(mut self, key: String, value: &str) -> Self {
        self.pairs.push((key, value.to_string()));
        self
    }

    pub fn email(self, value: &str) -> Self {
        let key = format!("pf_text_{}", self.seeded.email_field);
        self.set(key, Some(value))
    }

    pub fn department(self, index: usize) -> Self {
        let key = format!("pf_{}", self.seeded.department_field);
        let value = self.seeded.department_options[index].to_string();
        self.set(key, Some(value.as_str()))
    }

    pub fn color(self, index: usize) -> Self {
        let key = format!("question_{}", self.seeded.color_question);
        let value = self.seeded.color_options[index].to_string();
        self.set(key, Some(value.as_str()))
    }

    pub fn rating(self, value: &str) -> Self {
        let key = format!("question_{}", self.seeded.rating_question);
        self.set(key, Some(value))
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// POST to the survey's responses endpoint.
    pub async fn send(&self, app: Router) -> Response<Body> {
        let uri = format!("/api/v1/surveys/{}/responses", self.seeded.survey_id);
        post_form(app, &uri, &self.pairs).await
    }
}

pub async fn count(pool: &PgPool, table: &str) -> i64 {
    let (n,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap_or_else(|e| panic!("{table} count failed: {e}"));
    n
}
