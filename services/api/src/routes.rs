use crate::infra::AppState;
use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use job_board::error::AppError;
use job_board::listings::{
    cards, control_options, visible_refs, ControlOptions, CriterionUpdate, FilterCriteria,
    JobCard,
};
use serde::Serialize;
use serde_json::json;

/// Criteria as the controls send them: every query pair is a criterion name
/// and a raw value, and an empty value means "no filter". Unknown names are
/// rejected rather than ignored.
pub(crate) fn query_criteria(pairs: &[(String, String)]) -> Result<FilterCriteria, AppError> {
    let mut criteria = FilterCriteria::default();
    for (name, raw) in pairs {
        criteria.apply(CriterionUpdate::parse(name, raw)?);
    }
    Ok(criteria)
}

#[derive(Debug, Serialize)]
pub(crate) struct JobsResponse {
    pub(crate) total: usize,
    pub(crate) visible: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) loaded_at: Option<DateTime<Utc>>,
    pub(crate) criteria: FilterCriteria,
    pub(crate) jobs: Vec<JobCard>,
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/jobs", get(jobs_endpoint))
        .route("/api/v1/jobs/options", get(options_endpoint))
        .layer(Extension(state))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn jobs_endpoint(
    Extension(state): Extension<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<JobsResponse>, AppError> {
    let criteria = query_criteria(&pairs)?;

    let store = state.listings.read().expect("listing lock poisoned");
    let visible = visible_refs(store.current(), &criteria);

    Ok(Json(JobsResponse {
        total: store.len(),
        visible: visible.len(),
        loaded_at: store.loaded_at(),
        jobs: cards(visible),
        criteria,
    }))
}

pub(crate) async fn options_endpoint() -> Json<ControlOptions> {
    Json(control_options())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::testing::state_with;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use job_board::listings::{JobRecord, ListingSink, ListingStore};
    use serde_json::Value;
    use tower::ServiceExt;

    fn posting(id: &str, company: &str, role: &str, location: &str, years: u32) -> JobRecord {
        JobRecord {
            company_name: Some(company.to_string()),
            job_role: Some(role.to_string()),
            location: Some(location.to_string()),
            min_experience_years: Some(years),
            min_base_salary: Some(50000.0),
            max_base_salary: Some(90000.0),
            salary_currency_code: Some("USD".to_string()),
            ..JobRecord::new(id)
        }
    }

    fn app() -> Router {
        let mut store = ListingStore::new();
        store.load(vec![
            posting("acme", "Acme", "backend", "remote", 2),
            posting("zenith", "Zenith", "frontend", "onsite", 5),
        ]);
        router(state_with(store))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let body = serde_json::from_slice(&bytes).expect("json body");
        (status, body)
    }

    #[tokio::test]
    async fn lists_everything_without_filters() {
        let (status, body) = get_json(app(), "/api/v1/jobs").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 2);
        assert_eq!(body["visible"], 2);
        assert_eq!(body["jobs"][0]["id"], "acme");
        assert_eq!(body["jobs"][0]["salary"], "USD 50000 - 90000");
        assert!(body["loaded_at"].is_string());
    }

    #[tokio::test]
    async fn applies_query_criteria() {
        let (status, body) = get_json(app(), "/api/v1/jobs?minExperience=3&searchText=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["visible"], 1);
        assert_eq!(body["jobs"][0]["company_name"], "Zenith");
        assert_eq!(body["criteria"]["min_experience"], 3);

        let (_, body) = get_json(app(), "/api/v1/jobs?remoteOption=remote&role=frontend").await;
        assert_eq!(body["visible"], 0);
    }

    #[tokio::test]
    async fn rejects_invalid_criteria() {
        let (status, body) = get_json(app(), "/api/v1/jobs?remoteOption=hybrid").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .expect("error message")
            .contains("remoteOption"));
    }

    #[tokio::test]
    async fn accepts_snake_case_query_keys() {
        let (status, body) = get_json(app(), "/api/v1/jobs?min_experience=3").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["visible"], 1);
        assert_eq!(body["criteria"]["min_experience"], 3);
    }

    #[tokio::test]
    async fn rejects_unknown_query_keys() {
        let (status, body) = get_json(app(), "/api/v1/jobs?minExp=5").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .expect("error message")
            .contains("minExp"));
    }

    #[test]
    fn later_query_pairs_override_earlier_ones() {
        let pairs = vec![
            ("role".to_string(), "backend".to_string()),
            ("role".to_string(), String::new()),
        ];
        let criteria = query_criteria(&pairs).expect("pairs parse");
        assert!(criteria.is_unconstrained());
    }

    #[tokio::test]
    async fn empty_store_serves_empty_board() {
        let (status, body) = get_json(router(state_with(ListingStore::new())), "/api/v1/jobs").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 0);
        assert!(body["jobs"].as_array().expect("jobs array").is_empty());
        assert!(body.get("loaded_at").is_none());
    }

    #[tokio::test]
    async fn exposes_control_options() {
        let (status, body) = get_json(app(), "/api/v1/jobs/options").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["min_experience"].as_array().map(Vec::len), Some(11));
        assert_eq!(body["remote_option"][0]["value"], "remote");
    }

    #[tokio::test]
    async fn health_and_readiness_report_ok() {
        let (status, body) = get_json(app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (status, body) = get_json(app(), "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
    }
}
