//! # Law Reference API

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use polcheck_core::LawReference;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

/// A law reference as returned by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LawReferenceResponse {
    pub id: i64,
    pub law_name: String,
    pub section: String,
    pub jurisdiction: String,
    pub effective_date: NaiveDate,
}

impl From<LawReference> for LawReferenceResponse {
    fn from(law: LawReference) -> Self {
        Self {
            id: law.id.get(),
            law_name: law.law_name,
            section: law.section,
            jurisdiction: law.jurisdiction,
            effective_date: law.effective_date,
        }
    }
}

/// Build the law reference router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/law-references", get(list_law_references))
}

/// GET /api/law-references — List all law references.
#[utoipa::path(
    get,
    path = "/api/law-references",
    responses(
        (status = 200, description = "All law references in id order", body = Vec<LawReferenceResponse>),
    ),
    tag = "law_references"
)]
pub(crate) async fn list_law_references(
    State(state): State<AppState>,
) -> Json<Vec<LawReferenceResponse>> {
    Json(
        state
            .law_references
            .list()
            .into_iter()
            .map(LawReferenceResponse::from)
            .collect(),
    )
}
