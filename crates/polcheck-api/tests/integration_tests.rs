//! # Integration Tests for polcheck-api
//!
//! Router tests through `tower::ServiceExt::oneshot`, plus end-to-end
//! seeding against a mock department portal.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Datelike, Local};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use polcheck_api::seed::{seed_if_empty, SeedOutcome};
use polcheck_api::state::AppState;
use polcheck_scraper::{ConfiguredFetcher, DepartmentScraper, DiscoverySource, ScraperConfig};

async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_str(&body).unwrap())
}

/// Serve `body` with `status` at `/Department` and seed a fresh state from it.
async fn seeded_state(status: u16, body: &str) -> (AppState, MockServer) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Department"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;

    let config = ScraperConfig::parse(&format!("{}/Department", server.uri())).unwrap();
    let scraper = DepartmentScraper::from_config(&config);
    let state = AppState::new();
    seed_if_empty(&state, &scraper).await.unwrap();
    (state, server)
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn test_liveness_probe() {
    let (status, body) = get(polcheck_api::app(AppState::new()), "/health/liveness").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_readiness_without_database() {
    let (status, body) = get(polcheck_api::app(AppState::new()), "/health/readiness").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ready");
}

#[tokio::test]
async fn test_metrics_without_recorder_is_unavailable() {
    let (status, body) = get_json(polcheck_api::app(AppState::new()), "/metrics").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], "SERVICE_UNAVAILABLE");
}

#[tokio::test]
async fn test_unknown_route_is_structured_404() {
    let (status, body) = get_json(polcheck_api::app(AppState::new()), "/api/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_openapi_lists_read_endpoints() {
    let (status, body) = get_json(polcheck_api::app(AppState::new()), "/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    let paths = body["paths"].as_object().unwrap();
    for p in [
        "/api/policies",
        "/api/policies/yearly-count",
        "/api/law-references",
        "/api/validation-results",
    ] {
        assert!(paths.contains_key(p), "missing {p}");
    }
}

// -- Empty Service ------------------------------------------------------------

#[tokio::test]
async fn test_empty_service_returns_empty_lists() {
    for uri in [
        "/api/policies",
        "/api/policies/yearly-count",
        "/api/law-references",
        "/api/validation-results",
    ] {
        let (status, body) = get_json(polcheck_api::app(AppState::new()), uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body, serde_json::json!([]), "{uri}");
    }
}

#[tokio::test]
async fn test_invalid_status_is_422() {
    let (status, body) =
        get_json(polcheck_api::app(AppState::new()), "/api/policies?status=bogus").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["details"]["reason"]
        .as_str()
        .unwrap()
        .contains("bogus"));
}

#[tokio::test]
async fn test_invalid_year_is_422() {
    let (status, body) =
        get_json(polcheck_api::app(AppState::new()), "/api/policies?year=abc").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["details"]["reason"]
        .as_str()
        .unwrap()
        .contains("invalid digit"));
}

#[tokio::test]
async fn test_invalid_policy_id_is_422() {
    let (status, _) =
        get_json(polcheck_api::app(AppState::new()), "/api/validation-results?policyId=x").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

// -- Seeded Service -----------------------------------------------------------

#[tokio::test]
async fn test_seeded_revenue_anchor_end_to_end() {
    let (state, server) = seeded_state(200, r#"<a href="/r">Revenue Dept</a>"#).await;
    let year = Local::now().year();

    let (status, policies) = get_json(
        polcheck_api::app(state.clone()),
        &format!("/api/policies?year={year}&status=NEEDS_REVIEW"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let policies = policies.as_array().unwrap();
    assert_eq!(policies.len(), 1);
    let policy = &policies[0];
    assert_eq!(policy["department"], "Revenue Dept");
    assert_eq!(policy["title"], "Revenue Dept - Latest Department Listing");
    assert_eq!(policy["state"], "Karnataka");
    assert_eq!(policy["sourceUrl"], format!("{}/r", server.uri()));
    assert_eq!(policy["validationStatus"], "NEEDS_REVIEW");
    assert_eq!(
        policy["summary"],
        "Auto-scraped from Karnataka Mahiti Kanaja department portal."
    );

    let policy_id = policy["id"].as_i64().unwrap();
    let (_, results) = get_json(
        polcheck_api::app(state.clone()),
        &format!("/api/validation-results?policyId={policy_id}"),
    )
    .await;
    let results = results.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["policyTitle"], "Revenue Dept - Latest Department Listing");
    assert_eq!(results[0]["lawName"], "Karnataka Land Revenue Act");
    assert_eq!(results[0]["result"], "Needs Review");
    assert_eq!(
        results[0]["remarks"],
        "Validation generated for scraped department information."
    );

    let (_, counts) = get_json(polcheck_api::app(state), "/api/policies/yearly-count").await;
    assert_eq!(counts, serde_json::json!([{ "year": year, "count": 1 }]));
}

#[tokio::test]
async fn test_fetch_failure_seeds_static_departments() {
    let (state, _server) = seeded_state(500, "").await;

    let (_, policies) = get_json(polcheck_api::app(state.clone()), "/api/policies").await;
    let policies = policies.as_array().unwrap();
    assert_eq!(policies.len(), 2);
    assert_eq!(policies[0]["department"], "Department of Revenue");
    assert_eq!(policies[0]["validationStatus"], "NEEDS_REVIEW");
    assert_eq!(policies[1]["department"], "Department of Urban Development");
    assert_eq!(policies[1]["validationStatus"], "VALID");

    let (_, laws) = get_json(polcheck_api::app(state.clone()), "/api/law-references").await;
    let laws = laws.as_array().unwrap();
    assert_eq!(laws.len(), 2);
    assert_eq!(laws[0]["lawName"], "Karnataka Land Revenue Act");
    assert_eq!(laws[0]["effectiveDate"], "1964-01-01");
    assert_eq!(laws[1]["lawName"], "Karnataka Town and Country Planning Act");
    assert_eq!(laws[1]["section"], "Section 14");

    let (_, results) = get_json(polcheck_api::app(state), "/api/validation-results").await;
    let results = results.as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[1]["lawName"], "Karnataka Town and Country Planning Act");
    assert_eq!(results[1]["result"], "Valid");
}

#[tokio::test]
async fn test_department_filter_ignores_case() {
    let (state, _server) = seeded_state(500, "").await;
    let (_, policies) = get_json(
        polcheck_api::app(state),
        "/api/policies?department=DEPARTMENT%20OF%20URBAN%20DEVELOPMENT",
    )
    .await;
    let policies = policies.as_array().unwrap();
    assert_eq!(policies.len(), 1);
    assert_eq!(policies[0]["department"], "Department of Urban Development");
}

#[tokio::test]
async fn test_second_seed_writes_nothing() {
    let (state, server) = seeded_state(200, r#"<a href="/r">Revenue Dept</a>"#).await;
    let config = ScraperConfig::parse(&format!("{}/Department", server.uri())).unwrap();
    let scraper = DepartmentScraper::new(&config).unwrap();

    let outcome = seed_if_empty(&state, &scraper).await.unwrap();

    assert_eq!(outcome, SeedOutcome::Skipped { existing: 1 });
    assert_eq!(state.law_references.len(), 2);
    assert_eq!(state.validation_results.len(), 1);
}

#[tokio::test]
async fn test_page_without_matches_uses_static_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>Education</p>"))
        .mount(&server)
        .await;
    let config = ScraperConfig::parse(&format!("{}/Department", server.uri())).unwrap();
    let scraper = DepartmentScraper::new(&config).unwrap();
    let state = AppState::new();

    let outcome = seed_if_empty(&state, &scraper).await.unwrap();

    assert!(matches!(
        outcome,
        SeedOutcome::Seeded {
            source: DiscoverySource::StaticFallback,
            policies: 2,
            ..
        }
    ));
}

#[tokio::test]
async fn test_missing_http_client_still_seeds_static_departments() {
    let config = ScraperConfig::parse("https://portal.test/Department").unwrap();
    let scraper = DepartmentScraper::with_fetcher(
        ConfiguredFetcher::Unavailable {
            reason: "failed to build HTTP client".into(),
        },
        config.department_page_url.clone(),
    );
    let state = AppState::new();

    let outcome = seed_if_empty(&state, &scraper).await.unwrap();

    assert!(matches!(
        outcome,
        SeedOutcome::Seeded {
            source: DiscoverySource::StaticFallback,
            policies: 2,
            ..
        }
    ));
    let (_, policies) = get_json(polcheck_api::app(state), "/api/policies").await;
    assert_eq!(policies[0]["sourceUrl"], "https://portal.test/Department");
}
