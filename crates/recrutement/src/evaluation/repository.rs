use serde::{Deserialize, Serialize};

use super::domain::{
    Availability, CandidateId, CandidateStatus, EvaluationInput, FaceToFaceSubmission,
    JuryMemberId, Metier, PresenceStatus, SimulationSubmission, TechnicalScores,
};
use super::engine::{
    aggregate_face_to_face, aggregate_simulation, DecisionResult, FinalDecision, PhaseDecision,
};

/// A jury grid together with the verdict it implies on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JuryEvaluation<S> {
    pub submission: S,
    pub decision: PhaseDecision,
}

/// Repository record containing the candidate, collected scores, and latest decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub candidate_id: CandidateId,
    pub full_name: String,
    pub metier: Metier,
    pub availability: Availability,
    pub presence: PresenceStatus,
    #[serde(default)]
    pub face_to_face: Vec<JuryEvaluation<FaceToFaceSubmission>>,
    #[serde(default)]
    pub simulation: Vec<JuryEvaluation<SimulationSubmission>>,
    #[serde(default)]
    pub technical: Option<TechnicalScores>,
    pub status: CandidateStatus,
    #[serde(default)]
    pub decision: Option<DecisionResult>,
    /// Set when statuses or scores changed after `decision` was stored. The stored
    /// decision and status stay as they were until the next evaluation.
    #[serde(default)]
    pub decision_stale: bool,
}

impl CandidateRecord {
    /// Aggregate the stored jury grids into the snapshot the engine consumes.
    pub fn evaluation_input(&self) -> EvaluationInput {
        let face_to_face: Vec<FaceToFaceSubmission> = self
            .face_to_face
            .iter()
            .map(|evaluation| evaluation.submission.clone())
            .collect();
        let simulation: Vec<SimulationSubmission> = self
            .simulation
            .iter()
            .map(|evaluation| evaluation.submission.clone())
            .collect();

        EvaluationInput {
            metier: self.metier,
            availability: self.availability,
            presence: self.presence,
            face_to_face: aggregate_face_to_face(&face_to_face),
            simulation: aggregate_simulation(&simulation),
            technical: self.technical.clone(),
        }
    }

    /// Replace the grid from the same jury member, or append a new one.
    pub(crate) fn upsert_face_to_face(
        &mut self,
        evaluation: JuryEvaluation<FaceToFaceSubmission>,
    ) {
        let jury_member = evaluation.submission.jury_member.clone();
        upsert(&mut self.face_to_face, evaluation, |existing| {
            existing.submission.jury_member == jury_member
        });
    }

    pub(crate) fn upsert_simulation(&mut self, evaluation: JuryEvaluation<SimulationSubmission>) {
        let jury_member = evaluation.submission.jury_member.clone();
        upsert(&mut self.simulation, evaluation, |existing| {
            existing.submission.jury_member == jury_member
        });
    }

    pub fn jury_members(&self) -> Vec<JuryMemberId> {
        let mut members: Vec<JuryMemberId> = self
            .face_to_face
            .iter()
            .map(|evaluation| evaluation.submission.jury_member.clone())
            .chain(
                self.simulation
                    .iter()
                    .map(|evaluation| evaluation.submission.jury_member.clone()),
            )
            .collect();
        members.sort_by(|a, b| a.0.cmp(&b.0));
        members.dedup();
        members
    }

    pub fn decision_rationale(&self) -> String {
        match &self.decision {
            Some(decision) => decision.summary(),
            None => "pending evaluation".to_string(),
        }
    }

    pub fn status_view(&self) -> CandidateStatusView {
        let decision = self.decision.as_ref();
        CandidateStatusView {
            candidate_id: self.candidate_id.clone(),
            full_name: self.full_name.clone(),
            metier: self.metier,
            status: self.status,
            phase1_decision: decision.and_then(|d| d.phase1_decision),
            phase2_decision: decision.and_then(|d| d.phase2_decision),
            technical_decision: decision.and_then(|d| d.technical_decision),
            final_decision: decision.and_then(|d| d.final_decision),
            decision_rationale: self.decision_rationale(),
            decision_stale: self.decision_stale,
            jury_submissions: self.face_to_face.len() + self.simulation.len(),
        }
    }
}

fn upsert<T>(items: &mut Vec<T>, item: T, same: impl Fn(&T) -> bool) {
    match items.iter().position(same) {
        Some(index) => items[index] = item,
        None => items.push(item),
    }
}

impl From<Option<FinalDecision>> for CandidateStatus {
    fn from(decision: Option<FinalDecision>) -> Self {
        match decision {
            Some(FinalDecision::Recrute) => CandidateStatus::Recrute,
            Some(FinalDecision::NonRecrute) => CandidateStatus::NonRecrute,
            Some(FinalDecision::Absent) => CandidateStatus::Absent,
            None => CandidateStatus::InEvaluation,
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait CandidateRepository: Send + Sync {
    fn insert(&self, record: CandidateRecord) -> Result<CandidateRecord, RepositoryError>;
    fn update(&self, record: CandidateRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &CandidateId) -> Result<Option<CandidateRecord>, RepositoryError>;
    fn list(&self, metier: Option<Metier>) -> Result<Vec<CandidateRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Sanitized representation of a candidate's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateStatusView {
    pub candidate_id: CandidateId,
    pub full_name: String,
    pub metier: Metier,
    pub status: CandidateStatus,
    pub phase1_decision: Option<PhaseDecision>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase2_decision: Option<PhaseDecision>,
    pub technical_decision: Option<PhaseDecision>,
    pub final_decision: Option<FinalDecision>,
    pub decision_rationale: String,
    pub decision_stale: bool,
    pub jury_submissions: usize,
}
