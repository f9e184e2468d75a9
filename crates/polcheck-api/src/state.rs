//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! Reads are always served from the in-memory stores. When a database is
//! configured the stores are hydrated from it at startup and seed writes go
//! to the database first.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use parking_lot::RwLock;
use polcheck_core::{
    LawReference, LawReferenceId, NewValidationResult, Policy, PolicyId, Record, ValidationResult,
};
use sqlx::PgPool;

// -- Generic In-Memory Store --------------------------------------------------

/// Thread-safe, cloneable in-memory record store.
///
/// Ids are assigned on insert as one more than the highest id present, and
/// listing returns records in id order. All operations are synchronous
/// because the lock is never held across an `.await`.
pub struct Store<T: Record> {
    data: Arc<RwLock<BTreeMap<T::Id, T>>>,
}

impl<T: Record> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T: Record> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store").field("len", &self.len()).finish()
    }
}

impl<T: Record> Store<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Assign the next id to `draft` and store the record.
    pub fn create(&self, draft: T::Draft) -> T {
        let mut guard = self.data.write();
        let record = T::assign(draft, next_id::<T>(&guard));
        guard.insert(record.id(), record.clone());
        record
    }

    /// Create several records under one write lock, ids in input order.
    pub fn create_all(&self, drafts: impl IntoIterator<Item = T::Draft>) -> Vec<T> {
        let mut guard = self.data.write();
        drafts
            .into_iter()
            .map(|draft| {
                let record = T::assign(draft, next_id::<T>(&guard));
                guard.insert(record.id(), record.clone());
                record
            })
            .collect()
    }

    /// Store a record that already has an id, e.g. one loaded from the
    /// database. Returns the previous record with that id.
    pub fn insert(&self, record: T) -> Option<T> {
        self.data.write().insert(record.id(), record)
    }

    /// Retrieve a record by id.
    pub fn get(&self, id: T::Id) -> Option<T> {
        self.data.read().get(&id).cloned()
    }

    /// All records in id order.
    pub fn list(&self) -> Vec<T> {
        self.data.read().values().cloned().collect()
    }

    /// Check if a record exists.
    pub fn contains(&self, id: T::Id) -> bool {
        self.data.read().contains_key(&id)
    }

    /// Return the number of records.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Record> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn next_id<T: Record>(records: &BTreeMap<T::Id, T>) -> T::Id {
    let last: i64 = records.keys().next_back().map_or(0, |id| (*id).into());
    T::Id::from(last + 1)
}

/// Persistence failures outside of HTTP handling.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A validation result names a policy that is not stored.
    #[error("validation result refers to unknown policy {0}")]
    MissingPolicy(PolicyId),
    /// A validation result names a law reference that is not stored.
    #[error("validation result refers to unknown law reference {0}")]
    MissingLawReference(LawReferenceId),
    /// The database could not be read.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

// -- Configuration ------------------------------------------------------------

/// Runtime configuration for the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// State recorded on seeded policies and used as law jurisdiction.
    pub region: String,
    /// Run the one-time department seed before serving.
    pub seed_on_startup: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            region: "Karnataka".to_string(),
            seed_on_startup: true,
        }
    }
}

// -- Application State --------------------------------------------------------

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub policies: Store<Policy>,
    pub law_references: Store<LawReference>,
    pub validation_results: Store<ValidationResult>,

    /// PostgreSQL pool. `None` runs the service in-memory only.
    pub db_pool: Option<PgPool>,

    /// Renders `/metrics`. `None` when no recorder is installed.
    pub metrics: Option<PrometheusHandle>,

    /// Held across the emptiness check, the scrape and the writes of a seed
    /// run so two runs in one process cannot both seed.
    pub seed_guard: Arc<tokio::sync::Mutex<()>>,

    pub config: AppConfig,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("policies", &self.policies)
            .field("law_references", &self.law_references)
            .field("validation_results", &self.validation_results)
            .field("database", &self.db_pool.is_some())
            .field("metrics", &self.metrics.is_some())
            .field("config", &self.config)
            .finish()
    }
}

impl AppState {
    /// In-memory state with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default(), None)
    }

    /// State with the given configuration and optional database pool.
    pub fn with_config(config: AppConfig, db_pool: Option<PgPool>) -> Self {
        Self {
            policies: Store::new(),
            law_references: Store::new(),
            validation_results: Store::new(),
            db_pool,
            metrics: None,
            seed_guard: Arc::new(tokio::sync::Mutex::new(())),
            config,
        }
    }

    /// Attach the Prometheus handle that renders `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Create validation results, refusing the whole batch if any of them
    /// refers to a policy or law reference that is not stored.
    pub fn record_validation_results(
        &self,
        drafts: Vec<NewValidationResult>,
    ) -> Result<Vec<ValidationResult>, StoreError> {
        for draft in &drafts {
            self.check_references(draft.policy_id, draft.law_reference_id)?;
        }
        Ok(self.validation_results.create_all(drafts))
    }

    /// Store already persisted validation results, with the same reference
    /// check as [`record_validation_results`](Self::record_validation_results).
    pub fn restore_validation_results(
        &self,
        records: Vec<ValidationResult>,
    ) -> Result<(), StoreError> {
        for record in &records {
            self.check_references(record.policy_id, record.law_reference_id)?;
        }
        for record in records {
            self.validation_results.insert(record);
        }
        Ok(())
    }

    fn check_references(
        &self,
        policy_id: PolicyId,
        law_reference_id: LawReferenceId,
    ) -> Result<(), StoreError> {
        if !self.policies.contains(policy_id) {
            return Err(StoreError::MissingPolicy(policy_id));
        }
        if !self.law_references.contains(law_reference_id) {
            return Err(StoreError::MissingLawReference(law_reference_id));
        }
        Ok(())
    }

    /// Load all persisted records into the in-memory stores.
    ///
    /// No-op without a database.
    pub async fn hydrate_from_db(&self) -> Result<(), StoreError> {
        let Some(pool) = &self.db_pool else {
            return Ok(());
        };

        let policies = crate::db::policies::load_all(pool).await?;
        let policy_count = policies.len();
        for record in policies {
            self.policies.insert(record);
        }

        let laws = crate::db::law_references::load_all(pool).await?;
        let law_count = laws.len();
        for record in laws {
            self.law_references.insert(record);
        }

        let results = crate::db::validation_results::load_all(pool).await?;
        let result_count = results.len();
        self.restore_validation_results(results)?;

        tracing::info!(
            policies = policy_count,
            law_references = law_count,
            validation_results = result_count,
            "Hydrated in-memory stores from database"
        );

        Ok(())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use polcheck_core::{NewLawReference, NewPolicy, ValidationStatus};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn policy_draft(department: &str) -> NewPolicy {
        NewPolicy {
            title: format!("{department} - Latest Department Listing"),
            state: "Karnataka".into(),
            department: department.into(),
            publication_date: date(),
            year: 2026,
            source_url: "https://x.test/Department".into(),
            summary: String::new(),
            validation_status: ValidationStatus::for_department(department),
        }
    }

    fn law_draft() -> NewLawReference {
        NewLawReference {
            law_name: "Karnataka Land Revenue Act".into(),
            section: "Section 1".into(),
            jurisdiction: "Karnataka".into(),
            effective_date: NaiveDate::from_ymd_opt(1964, 1, 1).unwrap(),
        }
    }

    #[test]
    fn ids_start_at_one_and_increase() {
        let store: Store<Policy> = Store::new();
        let created = store.create_all([policy_draft("Revenue"), policy_draft("Urban")]);
        assert_eq!(created[0].id, PolicyId::new(1));
        assert_eq!(created[1].id, PolicyId::new(2));
        assert_eq!(store.create(policy_draft("Other")).id, PolicyId::new(3));
    }

    #[test]
    fn next_id_follows_highest_loaded_id() {
        let store: Store<Policy> = Store::new();
        store.insert(Policy::assign(policy_draft("Revenue"), PolicyId::new(41)));
        assert_eq!(store.create(policy_draft("Urban")).id, PolicyId::new(42));
    }

    #[test]
    fn list_is_in_id_order() {
        let store: Store<Policy> = Store::new();
        store.insert(Policy::assign(policy_draft("B"), PolicyId::new(7)));
        store.insert(Policy::assign(policy_draft("A"), PolicyId::new(3)));
        let ids: Vec<i64> = store.list().iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![3, 7]);
    }

    #[test]
    fn clones_share_data() {
        let store: Store<LawReference> = Store::new();
        let other = store.clone();
        store.create(law_draft());
        assert_eq!(other.len(), 1);
        assert!(!other.is_empty());
    }

    #[test]
    fn validation_result_requires_existing_policy() {
        let state = AppState::new();
        let law = state.law_references.create(law_draft());
        let err = state
            .record_validation_results(vec![NewValidationResult {
                policy_id: PolicyId::new(99),
                law_reference_id: law.id,
                result: "Valid".into(),
                remarks: String::new(),
                checked_on: date(),
            }])
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingPolicy(id) if id.get() == 99));
        assert!(state.validation_results.is_empty());
    }

    #[test]
    fn validation_result_requires_existing_law() {
        let state = AppState::new();
        let policy = state.policies.create(policy_draft("Revenue"));
        let err = state
            .record_validation_results(vec![NewValidationResult {
                policy_id: policy.id,
                law_reference_id: LawReferenceId::new(5),
                result: "Needs Review".into(),
                remarks: String::new(),
                checked_on: date(),
            }])
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingLawReference(_)));
    }

    #[tokio::test]
    async fn hydrate_without_database_is_noop() {
        let state = AppState::new();
        state.hydrate_from_db().await.unwrap();
        assert!(state.policies.is_empty());
    }
}
