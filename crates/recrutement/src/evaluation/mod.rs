//! Candidate scoring and hiring decisions.
//!
//! The decision engine under [`engine`] is pure: it turns a score snapshot and the métier
//! catalog into phase and final decisions. Intake checks, the repository seam, the service,
//! and the HTTP router are the layers that collect jury grids and feed that snapshot.

pub mod domain;
pub mod engine;
pub mod intake;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Availability, CandidateId, CandidateIntake, CandidateStatus, Criterion, EvaluationInput,
    FaceToFaceScores, FaceToFaceSubmission, InvalidStatus, JuryMemberId, Metier, PresenceStatus,
    SimulationScores, SimulationSubmission, TechnicalScores, UnknownMetier,
};
pub use engine::{
    evaluate, CatalogError, CriterionFailure, DecisionEngine, DecisionResult, EvaluationStage,
    FinalDecision, MetierCatalog, MetierConfig, PhaseDecision, ThresholdOverrides,
    ValidationReport,
};
pub use intake::{IntakeGuard, IntakeViolation};
pub use repository::{
    CandidateRecord, CandidateRepository, CandidateStatusView, JuryEvaluation, RepositoryError,
};
pub use router::evaluation_router;
pub use service::{CandidateEvaluationService, CandidateServiceError};
