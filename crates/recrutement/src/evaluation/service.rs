use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, warn};

use super::domain::{
    Availability, CandidateId, CandidateIntake, CandidateStatus, FaceToFaceScores,
    FaceToFaceSubmission, Metier, PresenceStatus, SimulationScores, SimulationSubmission,
    TechnicalScores,
};
use super::engine::{DecisionEngine, DecisionResult, PhaseDecision};
use super::intake::{IntakeGuard, IntakeViolation};
use super::repository::{CandidateRecord, CandidateRepository, JuryEvaluation, RepositoryError};

/// Service composing the intake guard, repository, and decision engine.
pub struct CandidateEvaluationService<R> {
    repository: Arc<R>,
    engine: Arc<DecisionEngine>,
    // One lock per candidate so fetch, change and update run as a single step.
    candidate_locks: Mutex<HashMap<CandidateId, Arc<Mutex<()>>>>,
}

static CANDIDATE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_candidate_id() -> CandidateId {
    let id = CANDIDATE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    CandidateId(format!("cand-{id:06}"))
}

impl<R> CandidateEvaluationService<R>
where
    R: CandidateRepository + 'static,
{
    pub fn new(repository: Arc<R>, engine: Arc<DecisionEngine>) -> Self {
        Self {
            repository,
            engine,
            candidate_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    /// Register a candidate for a campaign, returning the stored record.
    pub fn register(
        &self,
        intake: CandidateIntake,
    ) -> Result<CandidateRecord, CandidateServiceError> {
        IntakeGuard::check_candidate(&intake)?;

        let record = CandidateRecord {
            candidate_id: next_candidate_id(),
            full_name: intake.full_name.trim().to_string(),
            metier: intake.metier,
            availability: intake.availability,
            presence: intake.presence,
            face_to_face: Vec::new(),
            simulation: Vec::new(),
            technical: None,
            status: CandidateStatus::Registered,
            decision: None,
            decision_stale: false,
        };

        let stored = self.repository.insert(record)?;
        info!(candidate = %stored.candidate_id.0, metier = %stored.metier, "candidate registered");
        Ok(stored)
    }

    pub fn record_presence(
        &self,
        candidate_id: &CandidateId,
        presence: PresenceStatus,
    ) -> Result<CandidateRecord, CandidateServiceError> {
        self.modify(candidate_id, |record| {
            record.presence = presence;
            Ok(())
        })
    }

    pub fn record_availability(
        &self,
        candidate_id: &CandidateId,
        availability: Availability,
    ) -> Result<CandidateRecord, CandidateServiceError> {
        self.modify(candidate_id, |record| {
            record.availability = availability;
            Ok(())
        })
    }

    /// Store a jury member's face-to-face grid. A second grid from the same jury
    /// member replaces the first.
    pub fn submit_face_to_face(
        &self,
        candidate_id: &CandidateId,
        submission: FaceToFaceSubmission,
    ) -> Result<CandidateRecord, CandidateServiceError> {
        self.modify(candidate_id, |record| {
            let config = self.engine.config(record.metier);
            IntakeGuard::for_metier(config).check_face_to_face(&submission)?;

            let report = self
                .engine
                .validate_face_to_face(record.metier, &FaceToFaceScores::from(&submission));
            let decision = PhaseDecision::from_valid(report.is_valid());
            debug!(
                candidate = %record.candidate_id.0,
                jury_member = %submission.jury_member.0,
                decision = decision.label(),
                "face-to-face grid received"
            );
            record.upsert_face_to_face(JuryEvaluation {
                submission,
                decision,
            });
            Ok(())
        })
    }

    pub fn submit_simulation(
        &self,
        candidate_id: &CandidateId,
        submission: SimulationSubmission,
    ) -> Result<CandidateRecord, CandidateServiceError> {
        self.modify(candidate_id, |record| {
            let config = self.engine.config(record.metier);
            IntakeGuard::for_metier(config).check_simulation(&submission)?;

            let report = self
                .engine
                .validate_simulation(record.metier, &SimulationScores::from(&submission));
            let decision = PhaseDecision::from_valid(report.is_valid());
            debug!(
                candidate = %record.candidate_id.0,
                jury_member = %submission.jury_member.0,
                decision = decision.label(),
                "simulation grid received"
            );
            record.upsert_simulation(JuryEvaluation {
                submission,
                decision,
            });
            Ok(())
        })
    }

    /// Merge newly entered technical results over those already stored.
    pub fn record_technical(
        &self,
        candidate_id: &CandidateId,
        scores: TechnicalScores,
    ) -> Result<CandidateRecord, CandidateServiceError> {
        self.modify(candidate_id, |record| {
            let config = self.engine.config(record.metier);
            IntakeGuard::for_metier(config).check_technical(&scores)?;

            record
                .technical
                .get_or_insert_with(TechnicalScores::default)
                .merge(&scores);
            Ok(())
        })
    }

    /// Evaluate the candidate and persist the outcome. A decision that was already
    /// final is kept when the fresh evaluation comes back pending.
    pub fn evaluate(
        &self,
        candidate_id: &CandidateId,
    ) -> Result<DecisionResult, CandidateServiceError> {
        self.run_evaluation(candidate_id, false)
    }

    /// Evaluate from scratch, overwriting whatever decision was stored before.
    pub fn reevaluate(
        &self,
        candidate_id: &CandidateId,
    ) -> Result<DecisionResult, CandidateServiceError> {
        self.run_evaluation(candidate_id, true)
    }

    /// Fetch a candidate and current status for API responses.
    pub fn get(
        &self,
        candidate_id: &CandidateId,
    ) -> Result<CandidateRecord, CandidateServiceError> {
        let record = self
            .repository
            .fetch(candidate_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn list(
        &self,
        metier: Option<Metier>,
    ) -> Result<Vec<CandidateRecord>, CandidateServiceError> {
        Ok(self.repository.list(metier)?)
    }

    fn run_evaluation(
        &self,
        candidate_id: &CandidateId,
        from_scratch: bool,
    ) -> Result<DecisionResult, CandidateServiceError> {
        let lock = self.candidate_lock(candidate_id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut record = self.get(candidate_id)?;
        let fresh = self.engine.evaluate(&record.evaluation_input());

        let outcome = match record.decision.take() {
            Some(previous) if !from_scratch && previous.is_terminal() && fresh.is_pending() => {
                warn!(
                    candidate = %record.candidate_id.0,
                    stored = %previous.summary(),
                    "fresh evaluation is pending; keeping stored final decision"
                );
                previous
            }
            _ => fresh,
        };

        record.status = CandidateStatus::from(outcome.final_decision);
        record.decision = Some(outcome.clone());
        record.decision_stale = false;
        self.repository.update(record)?;

        info!(
            candidate = %candidate_id.0,
            outcome = %outcome.summary(),
            "candidate evaluated"
        );
        Ok(outcome)
    }

    fn modify<F>(
        &self,
        candidate_id: &CandidateId,
        change: F,
    ) -> Result<CandidateRecord, CandidateServiceError>
    where
        F: FnOnce(&mut CandidateRecord) -> Result<(), IntakeViolation>,
    {
        let lock = self.candidate_lock(candidate_id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut record = self.get(candidate_id)?;
        change(&mut record)?;
        if record.status == CandidateStatus::Registered {
            record.status = CandidateStatus::InEvaluation;
        }
        record.decision_stale = record.decision.is_some();
        self.repository.update(record.clone())?;
        Ok(record)
    }

    fn candidate_lock(&self, candidate_id: &CandidateId) -> Arc<Mutex<()>> {
        let mut locks = self
            .candidate_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        locks.entry(candidate_id.clone()).or_default().clone()
    }
}

/// Error raised by the candidate evaluation service.
#[derive(Debug, thiserror::Error)]
pub enum CandidateServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
