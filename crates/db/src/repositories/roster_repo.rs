//! Roster filter: participants narrowed by field-value predicates.

use sqlx::PgPool;
use survey_core::roster::RosterPredicate;
use survey_core::types::DbId;

use crate::models::participant::Participant;
use crate::repositories::participant_repo::COLUMNS;

pub struct RosterRepo;

impl RosterRepo {
    /// Participants of a survey matching every predicate (AND), most recent
    /// submission first, ties by id descending.
    pub async fn list(
        pool: &PgPool,
        survey_id: DbId,
        predicates: &[RosterPredicate],
    ) -> Result<Vec<Participant>, sqlx::Error> {
        let (where_clause, bind_values) = build_roster_filter(survey_id, predicates);
        let query = format!(
            "SELECT {COLUMNS} FROM participants p {where_clause} \
             ORDER BY p.created_at DESC, p.id DESC"
        );

        let q = sqlx::query_as::<_, Participant>(&query);
        bind_roster_values(q, &bind_values).fetch_all(pool).await
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for dynamic query building
// ---------------------------------------------------------------------------

/// Typed bind value for the dynamically-built roster query.
#[derive(Debug, PartialEq)]
enum BindValue {
    BigInt(i64),
    Text(String),
    BigIntArray(Vec<i64>),
}

/// Build a WHERE clause and bind values for a roster query.
///
/// Every predicate becomes an `EXISTS` subquery over `participant_answers`;
/// values are always bound, never interpolated.
fn build_roster_filter(
    survey_id: DbId,
    predicates: &[RosterPredicate],
) -> (String, Vec<BindValue>) {
    let mut conditions = vec!["p.survey_id = $1".to_string()];
    let mut bind_values = vec![BindValue::BigInt(survey_id)];
    let mut bind_idx = 2u32;

    for predicate in predicates {
        match predicate {
            RosterPredicate::TextContains { field_id, needle } => {
                conditions.push(format!(
                    "EXISTS (SELECT 1 FROM participant_answers pa \
                     WHERE pa.participant_id = p.id AND pa.field_id = ${} \
                     AND strpos(lower(pa.answer_text), lower(${})) > 0)",
                    bind_idx,
                    bind_idx + 1
                ));
                bind_idx += 2;
                bind_values.push(BindValue::BigInt(*field_id));
                bind_values.push(BindValue::Text(needle.clone()));
            }
            RosterPredicate::ChoiceIn { option_ids, .. } if option_ids.is_empty() => {
                conditions.push("FALSE".to_string());
            }
            RosterPredicate::ChoiceIn {
                field_id,
                option_ids,
            } => {
                conditions.push(format!(
                    "EXISTS (SELECT 1 FROM participant_answers pa \
                     WHERE pa.participant_id = p.id AND pa.field_id = ${} \
                     AND pa.option_id = ANY(${}))",
                    bind_idx,
                    bind_idx + 1
                ));
                bind_idx += 2;
                bind_values.push(BindValue::BigInt(*field_id));
                bind_values.push(BindValue::BigIntArray(option_ids.clone()));
            }
        }
    }

    (format!("WHERE {}", conditions.join(" AND ")), bind_values)
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_roster_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::BigIntArray(v) => q = q.bind(v.as_slice()),
        }
    }
    q
}
