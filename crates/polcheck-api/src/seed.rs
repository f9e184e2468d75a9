//! # Department Seeding
//!
//! Populates an empty service with one policy per discovered department,
//! the two Karnataka law references, and one validation result per policy.
//!
//! Seeding happens at most once. The run holds [`AppState::seed_guard`]
//! across the emptiness check, the scrape and the writes; with a database
//! the writes additionally go through [`crate::db::seed::write_seed`], which
//! re-checks under an advisory lock.

use chrono::{Datelike, Local, NaiveDate};
use polcheck_core::{
    is_revenue_department, LawReference, NewLawReference, NewPolicy, NewValidationResult, Policy,
    ScrapedDepartment, ValidationResult, ValidationStatus,
};
use polcheck_scraper::{DepartmentScraper, DiscoverySource, FetchHtml};

use crate::state::{AppState, StoreError};

/// Summary recorded on every seeded policy.
pub const SEED_SUMMARY: &str = "Auto-scraped from Karnataka Mahiti Kanaja department portal.";

/// Remarks recorded on every seeded validation result.
pub const VALIDATION_REMARKS: &str = "Validation generated for scraped department information.";

/// Storage failure while seeding. Scraping problems never surface here; the
/// scraper degrades to its static list instead.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("database error while seeding: {0}")]
    Database(#[from] sqlx::Error),
}

/// What a seed run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Policies already existed; nothing was written.
    Skipped { existing: usize },
    /// The batch was written.
    Seeded {
        source: DiscoverySource,
        policies: usize,
        law_references: usize,
        validation_results: usize,
    },
}

/// Records written by one seed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedBatch {
    pub policies: Vec<Policy>,
    pub law_references: Vec<LawReference>,
    pub validation_results: Vec<ValidationResult>,
}

/// The two law references every seeded policy is checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedLaws {
    pub land_revenue: NewLawReference,
    pub planning: NewLawReference,
}

impl SeedLaws {
    /// Both acts, with `region` as jurisdiction.
    pub fn for_region(region: &str) -> Self {
        Self {
            land_revenue: NewLawReference {
                law_name: "Karnataka Land Revenue Act".to_string(),
                section: "Section 1".to_string(),
                jurisdiction: region.to_string(),
                effective_date: ymd(1964, 1, 1),
            },
            planning: NewLawReference {
                law_name: "Karnataka Town and Country Planning Act".to_string(),
                section: "Section 14".to_string(),
                jurisdiction: region.to_string(),
                effective_date: ymd(1961, 1, 1),
            },
        }
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// One policy draft per department, published `today`.
pub fn policy_drafts(
    departments: &[ScrapedDepartment],
    region: &str,
    today: NaiveDate,
) -> Vec<NewPolicy> {
    departments
        .iter()
        .map(|dept| NewPolicy {
            title: format!("{} - Latest Department Listing", dept.name),
            state: region.to_string(),
            department: dept.name.clone(),
            publication_date: today,
            year: today.year(),
            source_url: dept.source_url.clone(),
            summary: SEED_SUMMARY.to_string(),
            validation_status: ValidationStatus::for_department(&dept.name),
        })
        .collect()
}

/// Link every policy to the land revenue act if it is a revenue department,
/// otherwise to the planning act.
pub fn validation_drafts(
    policies: &[Policy],
    land_revenue: &LawReference,
    planning: &LawReference,
    checked_on: NaiveDate,
) -> Vec<NewValidationResult> {
    policies
        .iter()
        .map(|policy| {
            let law = if is_revenue_department(&policy.department) {
                land_revenue
            } else {
                planning
            };
            NewValidationResult {
                policy_id: policy.id,
                law_reference_id: law.id,
                result: policy.validation_status.result_label().to_string(),
                remarks: VALIDATION_REMARKS.to_string(),
                checked_on,
            }
        })
        .collect()
}

/// Seed the service if no policy exists yet, dated with the local date.
pub async fn seed_if_empty<F: FetchHtml>(
    state: &AppState,
    scraper: &DepartmentScraper<F>,
) -> Result<SeedOutcome, SeedError> {
    seed_on(state, scraper, Local::now().date_naive()).await
}

/// Seed the service if no policy exists yet, dated `today`.
pub async fn seed_on<F: FetchHtml>(
    state: &AppState,
    scraper: &DepartmentScraper<F>,
    today: NaiveDate,
) -> Result<SeedOutcome, SeedError> {
    let _guard = state.seed_guard.lock().await;

    if !state.policies.is_empty() {
        let existing = state.policies.len();
        tracing::info!(existing, "policies already present, skipping seed");
        return Ok(SeedOutcome::Skipped { existing });
    }

    let discovery = scraper.discover().await;
    let drafts = policy_drafts(&discovery.departments, &state.config.region, today);
    let laws = SeedLaws::for_region(&state.config.region);

    let batch = match &state.db_pool {
        Some(pool) => {
            let Some(batch) = crate::db::seed::write_seed(pool, drafts, laws, today).await? else {
                state.hydrate_from_db().await?;
                return Ok(SeedOutcome::Skipped {
                    existing: state.policies.len(),
                });
            };
            for policy in &batch.policies {
                state.policies.insert(policy.clone());
            }
            for law in &batch.law_references {
                state.law_references.insert(law.clone());
            }
            state.restore_validation_results(batch.validation_results.clone())?;
            batch
        }
        None => {
            let policies = state.policies.create_all(drafts);
            let land_revenue = state.law_references.create(laws.land_revenue);
            let planning = state.law_references.create(laws.planning);
            let results = state.record_validation_results(validation_drafts(
                &policies,
                &land_revenue,
                &planning,
                today,
            ))?;
            SeedBatch {
                policies,
                law_references: vec![land_revenue, planning],
                validation_results: results,
            }
        }
    };

    metrics::counter!("polcheck_seed_runs_total", "source" => discovery.source.as_str())
        .increment(1);

    tracing::info!(
        source = %discovery.source,
        policies = batch.policies.len(),
        law_references = batch.law_references.len(),
        validation_results = batch.validation_results.len(),
        "seeded policies from department listing"
    );

    Ok(SeedOutcome::Seeded {
        source: discovery.source,
        policies: batch.policies.len(),
        law_references: batch.law_references.len(),
        validation_results: batch.validation_results.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polcheck_core::{LawReferenceId, PolicyId, Record};
    use polcheck_scraper::FetchError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use url::Url;

    struct CannedPage {
        html: &'static str,
        calls: AtomicUsize,
    }

    impl CannedPage {
        fn new(html: &'static str) -> Self {
            Self {
                html,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl FetchHtml for CannedPage {
        async fn fetch(&self, _url: &Url) -> Result<String, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.html.to_string())
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn scraper(html: &'static str) -> DepartmentScraper<CannedPage> {
        DepartmentScraper::with_fetcher(
            CannedPage::new(html),
            Url::parse("https://x.test/Department").unwrap(),
        )
    }

    #[test]
    fn policy_draft_fields() {
        let departments = vec![ScrapedDepartment {
            name: "Urban Development".into(),
            source_url: "https://x.test/u".into(),
        }];
        let drafts = policy_drafts(&departments, "Karnataka", today());
        assert_eq!(drafts.len(), 1);
        let draft = &drafts[0];
        assert_eq!(draft.title, "Urban Development - Latest Department Listing");
        assert_eq!(draft.state, "Karnataka");
        assert_eq!(draft.year, 2026);
        assert_eq!(draft.publication_date, today());
        assert_eq!(draft.summary, SEED_SUMMARY);
        assert_eq!(draft.validation_status, ValidationStatus::Valid);
    }

    #[test]
    fn laws_use_region_as_jurisdiction() {
        let laws = SeedLaws::for_region("Goa");
        assert_eq!(laws.land_revenue.jurisdiction, "Goa");
        assert_eq!(laws.land_revenue.effective_date, ymd(1964, 1, 1));
        assert_eq!(laws.planning.section, "Section 14");
        assert_eq!(laws.planning.effective_date, ymd(1961, 1, 1));
    }

    #[test]
    fn validation_links_follow_department() {
        let laws = SeedLaws::for_region("Karnataka");
        let land = LawReference::assign(laws.land_revenue, LawReferenceId::new(1));
        let planning = LawReference::assign(laws.planning, LawReferenceId::new(2));
        let policies: Vec<Policy> = policy_drafts(
            &[
                ScrapedDepartment {
                    name: "Land Revenue".into(),
                    source_url: "https://x.test/r".into(),
                },
                ScrapedDepartment {
                    name: "Urban Development".into(),
                    source_url: "https://x.test/u".into(),
                },
            ],
            "Karnataka",
            today(),
        )
        .into_iter()
        .enumerate()
        .map(|(i, d)| Policy::assign(d, PolicyId::new(i as i64 + 1)))
        .collect();

        let drafts = validation_drafts(&policies, &land, &planning, today());
        assert_eq!(drafts[0].law_reference_id, land.id);
        assert_eq!(drafts[0].result, "Needs Review");
        assert_eq!(drafts[1].law_reference_id, planning.id);
        assert_eq!(drafts[1].result, "Valid");
        assert!(drafts.iter().all(|d| d.remarks == VALIDATION_REMARKS));
    }

    #[tokio::test]
    async fn seeds_empty_store_from_anchor() {
        let state = AppState::new();
        let outcome = seed_on(&state, &scraper(r#"<a href="/r">Revenue Dept</a>"#), today())
            .await
            .unwrap();

        assert_eq!(
            outcome,
            SeedOutcome::Seeded {
                source: DiscoverySource::Anchors,
                policies: 1,
                law_references: 2,
                validation_results: 1,
            }
        );

        let policy = &state.policies.list()[0];
        assert_eq!(policy.department, "Revenue Dept");
        assert_eq!(policy.source_url, "https://x.test/r");
        assert_eq!(policy.validation_status, ValidationStatus::NeedsReview);

        let result = &state.validation_results.list()[0];
        let law = state.law_references.get(result.law_reference_id).unwrap();
        assert_eq!(law.law_name, "Karnataka Land Revenue Act");
        assert_eq!(result.result, "Needs Review");
        assert_eq!(result.checked_on, today());
    }

    #[tokio::test]
    async fn non_empty_store_is_left_alone() {
        let state = AppState::new();
        seed_on(&state, &scraper(""), today()).await.unwrap();
        let laws_before = state.law_references.len();

        let second = scraper(r#"<a href="/r">Revenue Dept</a>"#);
        let outcome = seed_on(&state, &second, today()).await.unwrap();

        assert_eq!(outcome, SeedOutcome::Skipped { existing: 2 });
        assert_eq!(state.law_references.len(), laws_before);
        assert_eq!(state.validation_results.len(), 2);
    }

    #[tokio::test]
    async fn skipped_seed_does_not_fetch() {
        let state = AppState::new();
        seed_on(&state, &scraper(""), today()).await.unwrap();

        let second = scraper("");
        seed_on(&state, &second, today()).await.unwrap();
        assert_eq!(second.fetcher().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn concurrent_runs_seed_once() {
        let state = AppState::new();
        let first = scraper(r#"<a href="/r">Revenue Dept</a>"#);
        let second = scraper(r#"<a href="/u">Urban Development Dept</a>"#);

        let (a, b) = tokio::join!(
            seed_on(&state, &first, today()),
            seed_on(&state, &second, today())
        );

        let seeded = [a.unwrap(), b.unwrap()]
            .iter()
            .filter(|o| matches!(o, SeedOutcome::Seeded { .. }))
            .count();
        assert_eq!(seeded, 1);
        assert_eq!(state.policies.len(), 1);
        assert_eq!(state.law_references.len(), 2);
    }
}
