//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into one OpenAPI document served
//! at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI document for the read API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "polcheck API",
        version = "0.1.0",
        description = "Policy compliance tracking: government notices, the law references they are checked against, and the validation results linking the two.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        crate::routes::policies::list_policies,
        crate::routes::policies::yearly_count,
        crate::routes::law_references::list_law_references,
        crate::routes::validation_results::list_validation_results,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::policies::PolicyResponse,
        crate::routes::policies::YearlyCountResponse,
        crate::routes::law_references::LawReferenceResponse,
        crate::routes::validation_results::ValidationResultResponse,
    )),
    tags(
        (name = "policies", description = "Tracked government notices"),
        (name = "law_references", description = "Statute sections policies are validated against"),
        (name = "validation_results", description = "Policy against law verdicts"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
