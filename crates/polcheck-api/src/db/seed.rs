//! Transactional seed write.
//!
//! The whole batch is written in one transaction that first takes a
//! transaction-scoped advisory lock and re-checks the policy count, so when
//! several instances start against one empty database exactly one seeds.

use chrono::NaiveDate;
use polcheck_core::NewPolicy;
use sqlx::PgPool;

use super::{law_references, policies, validation_results};
use crate::seed::{validation_drafts, SeedBatch, SeedLaws};

/// Advisory lock key shared by every instance ("polcheck" in ASCII).
const SEED_LOCK_KEY: i64 = 0x706f_6c63_6865_636b;

/// Write the seed batch unless policies already exist.
///
/// Returns `None`, having written nothing, when another writer got there
/// first.
pub async fn write_seed(
    pool: &PgPool,
    policy_drafts: Vec<NewPolicy>,
    laws: SeedLaws,
    checked_on: NaiveDate,
) -> Result<Option<SeedBatch>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SEED_LOCK_KEY)
        .execute(&mut *tx)
        .await?;

    let existing = policies::count(&mut tx).await?;
    if existing > 0 {
        tracing::info!(existing, "policies were seeded concurrently, skipping");
        tx.rollback().await?;
        return Ok(None);
    }

    let mut seeded_policies = Vec::with_capacity(policy_drafts.len());
    for draft in policy_drafts {
        seeded_policies.push(policies::insert(&mut tx, draft).await?);
    }

    let land_revenue = law_references::insert(&mut tx, laws.land_revenue).await?;
    let planning = law_references::insert(&mut tx, laws.planning).await?;

    let drafts = validation_drafts(&seeded_policies, &land_revenue, &planning, checked_on);
    let mut seeded_results = Vec::with_capacity(drafts.len());
    for draft in drafts {
        seeded_results.push(validation_results::insert(&mut tx, draft).await?);
    }

    tx.commit().await?;

    Ok(Some(SeedBatch {
        policies: seeded_policies,
        law_references: vec![land_revenue, planning],
        validation_results: seeded_results,
    }))
}
