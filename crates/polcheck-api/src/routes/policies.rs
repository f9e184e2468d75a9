//! # Policy API
//!
//! Read-only listing of tracked policies.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use polcheck_core::{Policy, ValidationStatus};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::AppError;
use crate::extractors::extract_query;
use crate::queries::{find_policies, yearly_counts, PolicyFilter};
use crate::state::AppState;

/// Query parameters for `GET /api/policies`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PolicyQuery {
    /// Publication year.
    pub year: Option<i32>,
    /// Department name, matched case-insensitively.
    pub department: Option<String>,
    /// `VALID`, `NEEDS_REVIEW` or `CONFLICT_SUSPECTED`.
    pub status: Option<String>,
}

impl PolicyQuery {
    fn into_filter(self) -> Result<PolicyFilter, AppError> {
        let status = self
            .status
            .as_deref()
            .map(str::parse::<ValidationStatus>)
            .transpose()?;
        Ok(PolicyFilter {
            year: self.year,
            department: self.department,
            status,
        })
    }
}

/// A policy as returned by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PolicyResponse {
    pub id: i64,
    pub title: String,
    pub state: String,
    pub department: String,
    pub publication_date: NaiveDate,
    pub year: i32,
    pub source_url: String,
    pub summary: String,
    #[schema(value_type = String, example = "NEEDS_REVIEW")]
    pub validation_status: ValidationStatus,
}

impl From<Policy> for PolicyResponse {
    fn from(policy: Policy) -> Self {
        Self {
            id: policy.id.get(),
            title: policy.title,
            state: policy.state,
            department: policy.department,
            publication_date: policy.publication_date,
            year: policy.year,
            source_url: policy.source_url,
            summary: policy.summary,
            validation_status: policy.validation_status,
        }
    }
}

/// Number of policies published in one year.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct YearlyCountResponse {
    pub year: i32,
    pub count: u64,
}

/// Build the policy router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/policies", get(list_policies))
        .route("/api/policies/yearly-count", get(yearly_count))
}

/// GET /api/policies — List policies, optionally filtered.
#[utoipa::path(
    get,
    path = "/api/policies",
    params(PolicyQuery),
    responses(
        (status = 200, description = "Matching policies in id order", body = Vec<PolicyResponse>),
        (status = 422, description = "Invalid query parameter", body = crate::error::ErrorBody),
    ),
    tag = "policies"
)]
pub(crate) async fn list_policies(
    State(state): State<AppState>,
    query: Result<Query<PolicyQuery>, QueryRejection>,
) -> Result<Json<Vec<PolicyResponse>>, AppError> {
    let filter = extract_query(query)?.into_filter()?;
    let policies = find_policies(&state.policies, &filter)
        .into_iter()
        .map(PolicyResponse::from)
        .collect();
    Ok(Json(policies))
}

/// GET /api/policies/yearly-count — Policy counts per year.
#[utoipa::path(
    get,
    path = "/api/policies/yearly-count",
    responses(
        (status = 200, description = "Counts ascending by year", body = Vec<YearlyCountResponse>),
    ),
    tag = "policies"
)]
pub(crate) async fn yearly_count(State(state): State<AppState>) -> Json<Vec<YearlyCountResponse>> {
    Json(
        yearly_counts(&state.policies)
            .into_iter()
            .map(|(year, count)| YearlyCountResponse { year, count })
            .collect(),
    )
}
