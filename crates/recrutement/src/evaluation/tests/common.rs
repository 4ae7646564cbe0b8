use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::evaluation::domain::{
    CandidateId, CandidateIntake, EvaluationInput, FaceToFaceScores, FaceToFaceSubmission,
    JuryMemberId, Metier, SimulationScores, SimulationSubmission, TechnicalScores,
};
use crate::evaluation::engine::DecisionEngine;
use crate::evaluation::repository::{CandidateRecord, CandidateRepository, RepositoryError};
use crate::evaluation::{evaluation_router, CandidateEvaluationService};

pub(super) fn engine() -> DecisionEngine {
    DecisionEngine::standard()
}

pub(super) fn face_to_face(voice: f64, verbal: f64) -> FaceToFaceScores {
    FaceToFaceScores {
        voice_quality: Some(voice),
        verbal_communication: Some(verbal),
        ..FaceToFaceScores::default()
    }
}

pub(super) fn simulation(negociation: f64, persuasion: f64, combativite: f64) -> SimulationScores {
    SimulationScores {
        sens_negociation: Some(negociation),
        capacite_persuasion: Some(persuasion),
        sens_combativite: Some(combativite),
    }
}

pub(super) fn call_center_technical() -> TechnicalScores {
    TechnicalScores {
        typing_speed: Some(20.0),
        typing_accuracy: Some(90.0),
        excel_test: Some(4.0),
        dictation: Some(16.0),
        ..TechnicalScores::default()
    }
}

pub(super) fn call_center_input() -> EvaluationInput {
    EvaluationInput {
        face_to_face: Some(face_to_face(4.0, 4.0)),
        technical: Some(call_center_technical()),
        ..EvaluationInput::new(Metier::CallCenter)
    }
}

pub(super) fn jury_grid(jury: &str, voice: f64, verbal: f64) -> FaceToFaceSubmission {
    FaceToFaceSubmission {
        jury_member: JuryMemberId(jury.to_string()),
        voice_quality: voice,
        verbal_communication: verbal,
        presentation_visuelle: None,
        appetence_digitale: None,
        evaluated_at: Utc
            .with_ymd_and_hms(2025, 3, 12, 9, 30, 0)
            .single()
            .expect("valid timestamp"),
    }
}

pub(super) fn simulation_grid(jury: &str, score: f64) -> SimulationSubmission {
    SimulationSubmission {
        jury_member: JuryMemberId(jury.to_string()),
        sens_negociation: score,
        capacite_persuasion: score,
        sens_combativite: score,
        evaluated_at: Utc
            .with_ymd_and_hms(2025, 3, 12, 11, 0, 0)
            .single()
            .expect("valid timestamp"),
    }
}

pub(super) fn intake(metier: Metier) -> CandidateIntake {
    CandidateIntake {
        full_name: "Amina El Idrissi".to_string(),
        metier,
        availability: Default::default(),
        presence: Default::default(),
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<HashMap<CandidateId, CandidateRecord>>>,
}

impl CandidateRepository for MemoryRepository {
    fn insert(&self, record: CandidateRecord) -> Result<CandidateRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("lock");
        if guard.contains_key(&record.candidate_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.candidate_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: CandidateRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("lock");
        guard.insert(record.candidate_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &CandidateId) -> Result<Option<CandidateRecord>, RepositoryError> {
        let guard = self.records.lock().expect("lock");
        Ok(guard.get(id).cloned())
    }

    fn list(&self, metier: Option<Metier>) -> Result<Vec<CandidateRecord>, RepositoryError> {
        let guard = self.records.lock().expect("lock");
        Ok(guard
            .values()
            .filter(|record| metier.map_or(true, |metier| record.metier == metier))
            .cloned()
            .collect())
    }
}

/// Memory repository whose reads stall, widening the gap between fetch and update.
#[derive(Default, Clone)]
pub(super) struct SlowRepository {
    inner: MemoryRepository,
}

impl CandidateRepository for SlowRepository {
    fn insert(&self, record: CandidateRecord) -> Result<CandidateRecord, RepositoryError> {
        self.inner.insert(record)
    }

    fn update(&self, record: CandidateRecord) -> Result<(), RepositoryError> {
        self.inner.update(record)
    }

    fn fetch(&self, id: &CandidateId) -> Result<Option<CandidateRecord>, RepositoryError> {
        thread::sleep(Duration::from_millis(50));
        self.inner.fetch(id)
    }

    fn list(&self, metier: Option<Metier>) -> Result<Vec<CandidateRecord>, RepositoryError> {
        self.inner.list(metier)
    }
}

pub(super) struct ConflictRepository;

impl CandidateRepository for ConflictRepository {
    fn insert(&self, _record: CandidateRecord) -> Result<CandidateRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: CandidateRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: &CandidateId) -> Result<Option<CandidateRecord>, RepositoryError> {
        Ok(None)
    }

    fn list(&self, _metier: Option<Metier>) -> Result<Vec<CandidateRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl CandidateRepository for UnavailableRepository {
    fn insert(&self, _record: CandidateRecord) -> Result<CandidateRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: CandidateRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &CandidateId) -> Result<Option<CandidateRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self, _metier: Option<Metier>) -> Result<Vec<CandidateRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    CandidateEvaluationService<MemoryRepository>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let service = CandidateEvaluationService::new(repository.clone(), Arc::new(engine()));
    (service, repository)
}

pub(super) fn router_with_service(
    service: CandidateEvaluationService<MemoryRepository>,
) -> axum::Router {
    evaluation_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
