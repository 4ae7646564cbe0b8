use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{
    Availability, CandidateId, CandidateIntake, Criterion, EvaluationInput, FaceToFaceSubmission,
    Metier, PresenceStatus, SimulationSubmission, TechnicalScores,
};
use super::engine::{MetierConfig, RequiredTests, Thresholds};
use super::intake::IntakeGuard;
use super::repository::{CandidateRecord, CandidateRepository, RepositoryError};
use super::service::{CandidateEvaluationService, CandidateServiceError};

type SharedService<R> = Arc<CandidateEvaluationService<R>>;

/// Router builder exposing HTTP endpoints for candidate scoring and decisions.
pub fn evaluation_router<R>(service: SharedService<R>) -> Router
where
    R: CandidateRepository + 'static,
{
    Router::new()
        .route("/api/v1/decisions/evaluate", post(evaluate_input_handler::<R>))
        .route("/api/v1/metiers", get(metiers_handler::<R>))
        .route(
            "/api/v1/metiers/:metier/candidates",
            get(candidates_by_metier_handler::<R>),
        )
        .route("/api/v1/candidates", post(register_handler::<R>))
        .route("/api/v1/candidates/:candidate_id", get(status_handler::<R>))
        .route(
            "/api/v1/candidates/:candidate_id/presence",
            post(presence_handler::<R>),
        )
        .route(
            "/api/v1/candidates/:candidate_id/availability",
            post(availability_handler::<R>),
        )
        .route(
            "/api/v1/candidates/:candidate_id/face-to-face",
            post(face_to_face_handler::<R>),
        )
        .route(
            "/api/v1/candidates/:candidate_id/simulation",
            post(simulation_handler::<R>),
        )
        .route(
            "/api/v1/candidates/:candidate_id/technical",
            post(technical_handler::<R>),
        )
        .route(
            "/api/v1/candidates/:candidate_id/evaluate",
            post(evaluate_candidate_handler::<R>),
        )
        .route(
            "/api/v1/candidates/:candidate_id/reevaluate",
            post(reevaluate_candidate_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct PresenceUpdate {
    pub(crate) presence: PresenceStatus,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AvailabilityUpdate {
    pub(crate) availability: Availability,
}

/// Catalog entry as listed by the API.
#[derive(Debug, Serialize)]
pub(crate) struct MetierView {
    metier: Metier,
    label: &'static str,
    required: RequiredTests,
    thresholds: Thresholds,
    face_to_face_criteria: Vec<Criterion>,
    technical_criteria: Vec<Criterion>,
}

impl From<&MetierConfig> for MetierView {
    fn from(config: &MetierConfig) -> Self {
        Self {
            metier: config.metier,
            label: config.metier.label(),
            required: config.required,
            thresholds: config.thresholds,
            face_to_face_criteria: config.face_to_face_criteria(),
            technical_criteria: config.technical_criteria(),
        }
    }
}

pub(crate) async fn evaluate_input_handler<R>(
    State(service): State<SharedService<R>>,
    axum::Json(input): axum::Json<EvaluationInput>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    if let Err(violation) = IntakeGuard::check_snapshot(&input) {
        return error_response(violation.into());
    }
    let result = service.engine().evaluate(&input);
    (StatusCode::OK, axum::Json(result)).into_response()
}

pub(crate) async fn metiers_handler<R>(State(service): State<SharedService<R>>) -> Response
where
    R: CandidateRepository + 'static,
{
    let views: Vec<MetierView> = service
        .engine()
        .catalog()
        .iter()
        .map(MetierView::from)
        .collect();
    (StatusCode::OK, axum::Json(views)).into_response()
}

pub(crate) async fn candidates_by_metier_handler<R>(
    State(service): State<SharedService<R>>,
    Path(metier): Path<String>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    let metier = match metier.parse::<Metier>() {
        Ok(metier) => metier,
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::NOT_FOUND, axum::Json(payload)).into_response();
        }
    };

    match service.list(Some(metier)) {
        Ok(records) => {
            let views: Vec<_> = records.iter().map(CandidateRecord::status_view).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn register_handler<R>(
    State(service): State<SharedService<R>>,
    axum::Json(intake): axum::Json<CandidateIntake>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    match service.register(intake) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<SharedService<R>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    record_response(service.get(&CandidateId(candidate_id)))
}

pub(crate) async fn presence_handler<R>(
    State(service): State<SharedService<R>>,
    Path(candidate_id): Path<String>,
    axum::Json(update): axum::Json<PresenceUpdate>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    record_response(service.record_presence(&CandidateId(candidate_id), update.presence))
}

pub(crate) async fn availability_handler<R>(
    State(service): State<SharedService<R>>,
    Path(candidate_id): Path<String>,
    axum::Json(update): axum::Json<AvailabilityUpdate>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    record_response(service.record_availability(&CandidateId(candidate_id), update.availability))
}

pub(crate) async fn face_to_face_handler<R>(
    State(service): State<SharedService<R>>,
    Path(candidate_id): Path<String>,
    axum::Json(submission): axum::Json<FaceToFaceSubmission>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    record_response(service.submit_face_to_face(&CandidateId(candidate_id), submission))
}

pub(crate) async fn simulation_handler<R>(
    State(service): State<SharedService<R>>,
    Path(candidate_id): Path<String>,
    axum::Json(submission): axum::Json<SimulationSubmission>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    record_response(service.submit_simulation(&CandidateId(candidate_id), submission))
}

pub(crate) async fn technical_handler<R>(
    State(service): State<SharedService<R>>,
    Path(candidate_id): Path<String>,
    axum::Json(scores): axum::Json<TechnicalScores>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    record_response(service.record_technical(&CandidateId(candidate_id), scores))
}

pub(crate) async fn evaluate_candidate_handler<R>(
    State(service): State<SharedService<R>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    match service.evaluate(&CandidateId(candidate_id)) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reevaluate_candidate_handler<R>(
    State(service): State<SharedService<R>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    match service.reevaluate(&CandidateId(candidate_id)) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

fn record_response(result: Result<CandidateRecord, CandidateServiceError>) -> Response {
    match result {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: CandidateServiceError) -> Response {
    let status = match &error {
        CandidateServiceError::Intake(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CandidateServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        CandidateServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        CandidateServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
