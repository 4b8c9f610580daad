//! Integration tests for `POST /api/v1/surveys/{id}/responses`.

mod common;

use axum::http::StatusCode;
use common::{body_json, count, seed_survey, Submission};
use sqlx::PgPool;

async fn assert_nothing_written(pool: &PgPool) {
    for table in ["participants", "responses", "answers", "participant_answers"] {
        assert_eq!(count(pool, table).await, 0, "{table} must stay empty");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn valid_submission_is_persisted(pool: PgPool) {
    let seeded = seed_survey(&pool).await;
    let app = common::build_test_app(pool.clone());

    let response = Submission::new(&seeded)
        .department(1)
        .set("duration_seconds".to_string(), Some("120"))
        .send(app)
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["ok"], true);
    assert!(json["participant_id"].as_i64().is_some());
    assert!(json["response_id"].as_i64().is_some());

    assert_eq!(count(&pool, "participants").await, 1);
    assert_eq!(count(&pool, "responses").await, 1);
    assert_eq!(count(&pool, "answers").await, 2);
    assert_eq!(count(&pool, "participant_answers").await, 2);

    let (email, duration): (Option<String>, Option<i32>) =
        sqlx::query_as("SELECT email, duration_seconds FROM participants")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(email.as_deref(), Some("user@example.com"));
    assert_eq!(duration, Some(120));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn multiple_choice_writes_one_row_per_selection(pool: PgPool) {
    let seeded = seed_survey(&pool).await;
    let app = common::build_test_app(pool.clone());

    let key = format!("question_{}", seeded.traits_question);
    let response = Submission::new(&seeded)
        .add(key.clone(), &seeded.traits_options[0].to_string())
        .add(key, &seeded.traits_options[2].to_string())
        .send(app)
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let (traits,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM answers WHERE question_id = $1")
        .bind(seeded.traits_question)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(traits, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn other_text_is_stored_on_the_other_option(pool: PgPool) {
    let seeded = seed_survey(&pool).await;
    let app = common::build_test_app(pool.clone());

    let response = Submission::new(&seeded)
        .color(2)
        .set(format!("other_{}", seeded.color_question), Some("  Turkuaz "))
        .send(app)
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let (text,): (Option<String>,) =
        sqlx::query_as("SELECT answer_text FROM answers WHERE option_id = $1")
            .bind(seeded.color_options[2])
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(text.as_deref(), Some("Turkuaz"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_required_field_is_rejected_without_writes(pool: PgPool) {
    let seeded = seed_survey(&pool).await;
    let app = common::build_test_app(pool.clone());

    let response = Submission::new(&seeded)
        .set(format!("pf_text_{}", seeded.email_field), None)
        .send(app)
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["ok"], false);
    assert_eq!(json["error"], "Email: this field is required");
    assert_nothing_written(&pool).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn email_with_diacritics_is_rejected(pool: PgPool) {
    let seeded = seed_survey(&pool).await;
    let app = common::build_test_app(pool.clone());

    let response = Submission::new(&seeded)
        .email("ayşe@example.com")
        .send(app)
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Email: not a valid email address");
    assert_nothing_written(&pool).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn out_of_range_rating_is_rejected(pool: PgPool) {
    let seeded = seed_survey(&pool).await;
    let app = common::build_test_app(pool.clone());

    let response = Submission::new(&seeded).rating("7").send(app).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "Overall satisfaction: the rating must be between 1 and 5"
    );
    assert_nothing_written(&pool).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn two_selections_on_single_choice_are_rejected(pool: PgPool) {
    let seeded = seed_survey(&pool).await;
    let app = common::build_test_app(pool.clone());

    let response = Submission::new(&seeded)
        .add(
            format!("question_{}", seeded.color_question),
            &seeded.color_options[1].to_string(),
        )
        .send(app)
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_nothing_written(&pool).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn option_from_another_question_is_rejected(pool: PgPool) {
    let seeded = seed_survey(&pool).await;
    let app = common::build_test_app(pool.clone());

    let response = Submission::new(&seeded)
        .set(
            format!("question_{}", seeded.color_question),
            Some(seeded.traits_options[0].to_string().as_str()),
        )
        .send(app)
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Favourite colour: the selected option is not valid");
    assert_nothing_written(&pool).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn out_of_range_duration_is_discarded(pool: PgPool) {
    let seeded = seed_survey(&pool).await;
    let app = common::build_test_app(pool.clone());

    let response = Submission::new(&seeded)
        .set("duration_seconds".to_string(), Some("99999"))
        .send(app)
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let (duration,): (Option<i32>,) = sqlx::query_as("SELECT duration_seconds FROM participants")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(duration, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_survey_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::post_form(app, "/api/v1/surveys/9999/responses", &[]).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["ok"], false);
}
