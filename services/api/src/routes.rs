use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use recrutement::batch::{BatchEvaluator, BatchOutcome};
use recrutement::error::AppError;
use recrutement::evaluation::{
    evaluation_router, CandidateEvaluationService, CandidateRepository, FinalDecision, Metier,
    PhaseDecision,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct BatchRequest {
    pub(crate) csv: String,
}

/// One decided score sheet line.
#[derive(Debug, Serialize)]
pub(crate) struct BatchDecisionView {
    pub(crate) line: usize,
    pub(crate) candidate: String,
    pub(crate) metier: Metier,
    pub(crate) phase1_decision: Option<PhaseDecision>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) phase2_decision: Option<PhaseDecision>,
    pub(crate) technical_decision: Option<PhaseDecision>,
    pub(crate) final_decision: Option<FinalDecision>,
    pub(crate) summary: String,
}

impl From<BatchOutcome> for BatchDecisionView {
    fn from(outcome: BatchOutcome) -> Self {
        Self {
            line: outcome.line,
            candidate: outcome.candidate,
            metier: outcome.input.metier,
            phase1_decision: outcome.result.phase1_decision,
            phase2_decision: outcome.result.phase2_decision,
            technical_decision: outcome.result.technical_decision,
            final_decision: outcome.result.final_decision,
            summary: outcome.result.summary(),
        }
    }
}

pub(crate) fn with_evaluation_routes<R>(
    service: Arc<CandidateEvaluationService<R>>,
) -> axum::Router
where
    R: CandidateRepository + 'static,
{
    evaluation_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/decisions/batch",
            axum::routing::post(batch_endpoint),
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

pub(crate) async fn batch_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<BatchRequest>,
) -> Result<Json<Vec<BatchDecisionView>>, AppError> {
    let reader = Cursor::new(payload.csv.into_bytes());
    let outcomes = BatchEvaluator::new(&state.engine).from_reader(reader)?;
    Ok(Json(
        outcomes.into_iter().map(BatchDecisionView::from).collect(),
    ))
}
