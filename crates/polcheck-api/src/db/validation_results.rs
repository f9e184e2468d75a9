//! Validation result persistence operations.
//!
//! The foreign keys on `validation_results` enforce that both referenced
//! records exist.

use chrono::NaiveDate;
use polcheck_core::{
    LawReferenceId, NewValidationResult, PolicyId, Record, ValidationResult, ValidationResultId,
};
use sqlx::{PgConnection, PgPool};

/// Insert a validation result and return it with its database-assigned id.
pub async fn insert(
    conn: &mut PgConnection,
    draft: NewValidationResult,
) -> Result<ValidationResult, sqlx::Error> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO validation_results (policy_id, law_reference_id, result, remarks, checked_on)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id",
    )
    .bind(draft.policy_id.get())
    .bind(draft.law_reference_id.get())
    .bind(&draft.result)
    .bind(&draft.remarks)
    .bind(draft.checked_on)
    .fetch_one(&mut *conn)
    .await?;

    Ok(ValidationResult::assign(draft, ValidationResultId::new(id)))
}

/// Load all validation results in id order.
pub async fn load_all(pool: &PgPool) -> Result<Vec<ValidationResult>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ValidationResultRow>(
        "SELECT id, policy_id, law_reference_id, result, remarks, checked_on
         FROM validation_results ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(ValidationResultRow::into_record).collect())
}

#[derive(sqlx::FromRow)]
struct ValidationResultRow {
    id: i64,
    policy_id: i64,
    law_reference_id: i64,
    result: String,
    remarks: String,
    checked_on: NaiveDate,
}

impl ValidationResultRow {
    fn into_record(self) -> ValidationResult {
        ValidationResult {
            id: ValidationResultId::new(self.id),
            policy_id: PolicyId::new(self.policy_id),
            law_reference_id: LawReferenceId::new(self.law_reference_id),
            result: self.result,
            remarks: self.remarks,
            checked_on: self.checked_on,
        }
    }
}
