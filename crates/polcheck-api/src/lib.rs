//! # polcheck-api — Policy Compliance Tracking Service
//!
//! Serves policies, law references and validation results read-only, after
//! a one-time seed from the department portal.
//!
//! ## API Surface
//!
//! | Path                          | Module                          |
//! |-------------------------------|---------------------------------|
//! | `/api/policies`               | [`routes::policies`]            |
//! | `/api/policies/yearly-count`  | [`routes::policies`]            |
//! | `/api/law-references`         | [`routes::law_references`]      |
//! | `/api/validation-results`     | [`routes::validation_results`]  |
//! | `/health/*`, `/metrics`       | this module                     |
//! | `/openapi.json`               | [`openapi`]                     |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```

pub mod db;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod queries;
pub mod routes;
pub mod seed;
pub mod state;

use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::middleware::from_fn;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

/// Whether request metrics and `/metrics` are enabled via
/// `POLCHECK_METRICS_ENABLED`. Anything other than `"false"` enables them.
pub fn metrics_enabled() -> bool {
    std::env::var("POLCHECK_METRICS_ENABLED")
        .map(|v| v.to_lowercase() != "false")
        .unwrap_or(true)
}

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let metrics_on = metrics_enabled();

    let mut api = Router::new()
        .merge(routes::policies::router())
        .merge(routes::law_references::router())
        .merge(routes::validation_results::router())
        .merge(openapi::router());

    if metrics_on {
        api = api.route_layer(from_fn(middleware::metrics::metrics_middleware));
    }

    let api = api
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    let mut probes = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    if metrics_on {
        probes = probes.route("/metrics", get(prometheus_metrics));
    }

    Router::new()
        .merge(probes.with_state(state))
        .merge(api)
        .fallback(not_found)
}

/// Liveness probe: always 200 while the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: 503 when the configured database is unreachable.
async fn readiness(State(state): State<AppState>) -> Result<&'static str, AppError> {
    if let Some(pool) = &state.db_pool {
        db::ping(pool)
            .await
            .map_err(|e| AppError::ServiceUnavailable(format!("database: {e}")))?;
    }
    Ok("ready")
}

/// GET /metrics — Prometheus text exposition.
async fn prometheus_metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => AppError::ServiceUnavailable("metrics recorder not installed".into()).into_response(),
    }
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {}", uri.path()))
}
