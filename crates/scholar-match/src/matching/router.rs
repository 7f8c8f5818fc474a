use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;

use super::domain::{ScholarshipId, UserId};
use super::repository::{MatchSink, ProfileSource, ScholarshipSource};
use super::service::{DeadlineEntry, EligibilityReport, MatchService, MatchSummary, SimilarListing};
use crate::error::AppError;

/// Optional evaluation date; defaults to the server's local date.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct AsOfQuery {
    #[serde(default)]
    pub(crate) today: Option<NaiveDate>,
}

impl AsOfQuery {
    fn resolve(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Router builder exposing the matching endpoints.
pub fn match_router<P, S, M>(service: Arc<MatchService<P, S, M>>) -> Router
where
    P: ProfileSource + 'static,
    S: ScholarshipSource + 'static,
    M: MatchSink + 'static,
{
    Router::new()
        .route(
            "/api/v1/users/:user_id/matches",
            post(refresh_handler::<P, S, M>),
        )
        .route(
            "/api/v1/users/:user_id/deadlines",
            get(deadlines_handler::<P, S, M>),
        )
        .route(
            "/api/v1/scholarships/:scholarship_id/similar",
            get(similar_handler::<P, S, M>),
        )
        .route(
            "/api/v1/scholarships/:scholarship_id/eligibility/:user_id",
            get(eligibility_handler::<P, S, M>),
        )
        .with_state(service)
}

pub(crate) async fn refresh_handler<P, S, M>(
    State(service): State<Arc<MatchService<P, S, M>>>,
    Path(user_id): Path<String>,
    Query(as_of): Query<AsOfQuery>,
) -> Result<Json<MatchSummary>, AppError>
where
    P: ProfileSource + 'static,
    S: ScholarshipSource + 'static,
    M: MatchSink + 'static,
{
    let summary = service.refresh_matches(&UserId(user_id), as_of.resolve())?;
    Ok(Json(summary))
}

pub(crate) async fn deadlines_handler<P, S, M>(
    State(service): State<Arc<MatchService<P, S, M>>>,
    Path(user_id): Path<String>,
    Query(as_of): Query<AsOfQuery>,
) -> Result<Json<Vec<DeadlineEntry>>, AppError>
where
    P: ProfileSource + 'static,
    S: ScholarshipSource + 'static,
    M: MatchSink + 'static,
{
    let entries = service.closing_soon(&UserId(user_id), as_of.resolve())?;
    Ok(Json(entries))
}

pub(crate) async fn similar_handler<P, S, M>(
    State(service): State<Arc<MatchService<P, S, M>>>,
    Path(scholarship_id): Path<String>,
) -> Result<Json<Vec<SimilarListing>>, AppError>
where
    P: ProfileSource + 'static,
    S: ScholarshipSource + 'static,
    M: MatchSink + 'static,
{
    let similar = service.similar(&ScholarshipId(scholarship_id))?;
    Ok(Json(similar))
}

pub(crate) async fn eligibility_handler<P, S, M>(
    State(service): State<Arc<MatchService<P, S, M>>>,
    Path((scholarship_id, user_id)): Path<(String, String)>,
) -> Result<Json<EligibilityReport>, AppError>
where
    P: ProfileSource + 'static,
    S: ScholarshipSource + 'static,
    M: MatchSink + 'static,
{
    let report = service.eligibility(&ScholarshipId(scholarship_id), &UserId(user_id))?;
    Ok(Json(report))
}
