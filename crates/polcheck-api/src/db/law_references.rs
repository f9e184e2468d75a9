//! Law reference persistence operations.

use chrono::NaiveDate;
use polcheck_core::{LawReference, LawReferenceId, NewLawReference, Record};
use sqlx::{PgConnection, PgPool};

/// Insert a law reference and return it with its database-assigned id.
pub async fn insert(
    conn: &mut PgConnection,
    draft: NewLawReference,
) -> Result<LawReference, sqlx::Error> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO law_references (law_name, section, jurisdiction, effective_date)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind(&draft.law_name)
    .bind(&draft.section)
    .bind(&draft.jurisdiction)
    .bind(draft.effective_date)
    .fetch_one(&mut *conn)
    .await?;

    Ok(LawReference::assign(draft, LawReferenceId::new(id)))
}

/// Load all law references in id order.
pub async fn load_all(pool: &PgPool) -> Result<Vec<LawReference>, sqlx::Error> {
    let rows = sqlx::query_as::<_, LawReferenceRow>(
        "SELECT id, law_name, section, jurisdiction, effective_date
         FROM law_references ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(LawReferenceRow::into_record).collect())
}

#[derive(sqlx::FromRow)]
struct LawReferenceRow {
    id: i64,
    law_name: String,
    section: String,
    jurisdiction: String,
    effective_date: NaiveDate,
}

impl LawReferenceRow {
    fn into_record(self) -> LawReference {
        LawReference {
            id: LawReferenceId::new(self.id),
            law_name: self.law_name,
            section: self.section,
            jurisdiction: self.jurisdiction,
            effective_date: self.effective_date,
        }
    }
}
