use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use vc_brain::workflows::matching::{self, AffinityReport, InvestorCriteria, StartupProfile};
use vc_brain::workflows::readiness::{self, ReadinessReport};
use vc_brain::workflows::scheduling::{
    scheduling_router, AvailabilityResolver, CalendarGateway, Clock, SchedulingRepository,
};

#[derive(Debug, Deserialize)]
pub(crate) struct MatchScoreRequest {
    pub(crate) startup: StartupProfile,
    pub(crate) investor: InvestorCriteria,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GapAnalysisRequest {
    pub(crate) responses: BTreeMap<String, String>,
}

pub(crate) fn with_core_routes<R, C, K>(
    resolver: Arc<AvailabilityResolver<R, C, K>>,
) -> axum::Router
where
    R: SchedulingRepository + 'static,
    C: CalendarGateway + 'static,
    K: Clock + 'static,
{
    scheduling_router(resolver)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/matching/score",
            axum::routing::post(match_score_endpoint),
        )
        .route(
            "/api/v1/readiness/gaps",
            axum::routing::post(gap_analysis_endpoint),
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

pub(crate) async fn match_score_endpoint(
    Json(payload): Json<MatchScoreRequest>,
) -> Json<AffinityReport> {
    let MatchScoreRequest { startup, investor } = payload;
    Json(matching::score(&startup, &investor))
}

pub(crate) async fn gap_analysis_endpoint(
    Json(payload): Json<GapAnalysisRequest>,
) -> Json<ReadinessReport> {
    Json(readiness::analyze(&payload.responses))
}
