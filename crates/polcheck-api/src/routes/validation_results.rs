//! # Validation Result API
//!
//! Results are joined with their policy title and law name at read time.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use polcheck_core::{PolicyId, ValidationResult};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::AppError;
use crate::extractors::extract_query;
use crate::queries::find_validation_results;
use crate::state::AppState;

/// Query parameters for `GET /api/validation-results`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ValidationResultQuery {
    /// Only results for this policy.
    pub policy_id: Option<i64>,
}

/// A validation result with the names of what it links.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResultResponse {
    pub id: i64,
    pub policy_id: i64,
    pub policy_title: String,
    pub law_reference_id: i64,
    pub law_name: String,
    pub result: String,
    pub remarks: String,
    pub checked_on: NaiveDate,
}

impl ValidationResultResponse {
    fn joined(state: &AppState, result: ValidationResult) -> Self {
        let policy_title = state
            .policies
            .get(result.policy_id)
            .map(|p| p.title)
            .unwrap_or_default();
        let law_name = state
            .law_references
            .get(result.law_reference_id)
            .map(|l| l.law_name)
            .unwrap_or_default();
        Self {
            id: result.id.get(),
            policy_id: result.policy_id.get(),
            policy_title,
            law_reference_id: result.law_reference_id.get(),
            law_name,
            result: result.result,
            remarks: result.remarks,
            checked_on: result.checked_on,
        }
    }
}

/// Build the validation result router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/validation-results", get(list_validation_results))
}

/// GET /api/validation-results — List validation results.
#[utoipa::path(
    get,
    path = "/api/validation-results",
    params(ValidationResultQuery),
    responses(
        (status = 200, description = "Validation results in id order", body = Vec<ValidationResultResponse>),
        (status = 422, description = "Invalid query parameter", body = crate::error::ErrorBody),
    ),
    tag = "validation_results"
)]
pub(crate) async fn list_validation_results(
    State(state): State<AppState>,
    query: Result<Query<ValidationResultQuery>, QueryRejection>,
) -> Result<Json<Vec<ValidationResultResponse>>, AppError> {
    let policy_id = extract_query(query)?.policy_id.map(PolicyId::new);
    let results = find_validation_results(&state.validation_results, policy_id)
        .into_iter()
        .map(|r| ValidationResultResponse::joined(&state, r))
        .collect();
    Ok(Json(results))
}
