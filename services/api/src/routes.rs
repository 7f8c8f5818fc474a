use crate::infra::{deserialize_optional_date, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDate};
use scholar_match::matching::lifecycle;
use scholar_match::matching::{
    is_eligible, match_reasons, match_router, rank_by_relevance, MatchService, MatchSink, Profile,
    ProfileSource, Scholarship, ScholarshipMatch, ScholarshipSource,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Profile and candidate listings supplied by the caller; nothing is persisted.
#[derive(Debug, Deserialize)]
pub(crate) struct EligibilityCheckRequest {
    pub(crate) profile: Profile,
    #[serde(default)]
    pub(crate) scholarships: Vec<Scholarship>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EligibilityCheckResponse {
    pub(crate) today: NaiveDate,
    pub(crate) total_eligible: usize,
    pub(crate) matches: Vec<ScholarshipMatch>,
}

pub(crate) fn with_match_routes<P, S, M>(service: Arc<MatchService<P, S, M>>) -> axum::Router
where
    P: ProfileSource + 'static,
    S: ScholarshipSource + 'static,
    M: MatchSink + 'static,
{
    match_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/eligibility/check",
            axum::routing::post(eligibility_check_endpoint),
        )
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

/// Rank the open listings in the request that the profile qualifies for.
pub(crate) async fn eligibility_check_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<EligibilityCheckRequest>,
) -> Json<EligibilityCheckResponse> {
    let EligibilityCheckRequest {
        profile,
        scholarships,
        today,
        limit,
    } = payload;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let limit = limit.unwrap_or(state.matching.response_limit);

    let eligible: Vec<&Scholarship> = scholarships
        .iter()
        .filter(|scholarship| lifecycle::is_open(scholarship, today))
        .filter(|scholarship| is_eligible(scholarship, &profile))
        .collect();

    let matches = rank_by_relevance(&profile, eligible.iter().copied())
        .into_iter()
        .take(limit)
        .map(|entry| ScholarshipMatch {
            scholarship: entry.scholarship.clone(),
            match_score: entry.score,
            match_reasons: match_reasons(entry.scholarship, &profile),
        })
        .collect();

    Json(EligibilityCheckResponse {
        today,
        total_eligible: eligible.len(),
        matches,
    })
}
