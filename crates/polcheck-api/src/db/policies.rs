//! Policy persistence operations.

use chrono::NaiveDate;
use polcheck_core::{NewPolicy, Policy, PolicyId, Record, ValidationStatus};
use sqlx::{PgConnection, PgPool};

/// Insert a policy and return it with its database-assigned id.
pub async fn insert(conn: &mut PgConnection, draft: NewPolicy) -> Result<Policy, sqlx::Error> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO policies (title, state, department, publication_date, year,
         source_url, summary, validation_status)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING id",
    )
    .bind(&draft.title)
    .bind(&draft.state)
    .bind(&draft.department)
    .bind(draft.publication_date)
    .bind(draft.year)
    .bind(&draft.source_url)
    .bind(&draft.summary)
    .bind(draft.validation_status.as_str())
    .fetch_one(&mut *conn)
    .await?;

    Ok(Policy::assign(draft, PolicyId::new(id)))
}

/// Number of stored policies.
pub async fn count(conn: &mut PgConnection) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM policies")
        .fetch_one(&mut *conn)
        .await
}

/// Load all policies in id order.
pub async fn load_all(pool: &PgPool) -> Result<Vec<Policy>, sqlx::Error> {
    let rows = sqlx::query_as::<_, PolicyRow>(
        "SELECT id, title, state, department, publication_date, year,
         source_url, summary, validation_status
         FROM policies ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(PolicyRow::into_record).collect())
}

fn parse_status(id: i64, raw: &str) -> ValidationStatus {
    raw.parse().unwrap_or_else(|_| {
        tracing::warn!(
            policy_id = id,
            status = raw,
            "unknown validation status in database, treating as NEEDS_REVIEW"
        );
        ValidationStatus::NeedsReview
    })
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct PolicyRow {
    id: i64,
    title: String,
    state: String,
    department: String,
    publication_date: NaiveDate,
    year: i32,
    source_url: String,
    summary: String,
    validation_status: String,
}

impl PolicyRow {
    fn into_record(self) -> Policy {
        Policy {
            id: PolicyId::new(self.id),
            validation_status: parse_status(self.id, &self.validation_status),
            title: self.title,
            state: self.state,
            department: self.department,
            publication_date: self.publication_date,
            year: self.year,
            source_url: self.source_url,
            summary: self.summary,
        }
    }
}
