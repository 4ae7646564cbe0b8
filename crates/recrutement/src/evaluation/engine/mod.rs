mod aggregation;
mod catalog;
mod policy;
mod rules;

use std::sync::OnceLock;

pub use aggregation::{aggregate_face_to_face, aggregate_simulation, average};
pub use catalog::{
    CatalogError, MetierCatalog, MetierConfig, RequiredTests, ThresholdOverrides, Thresholds,
};
pub use policy::{DecisionResult, EvaluationStage, FinalDecision, PhaseDecision};
pub use rules::{
    validate_face_to_face, validate_simulation, validate_technical, CriterionFailure,
    ValidationReport,
};

use super::domain::{
    Availability, EvaluationInput, FaceToFaceScores, Metier, PresenceStatus, SimulationScores,
    TechnicalScores,
};
use policy::decide;

/// Stateless evaluator applying a métier catalog to candidate score snapshots.
#[derive(Debug, Clone, Default)]
pub struct DecisionEngine {
    catalog: MetierCatalog,
}

impl DecisionEngine {
    pub fn new(catalog: MetierCatalog) -> Self {
        Self { catalog }
    }

    pub fn standard() -> Self {
        Self::new(MetierCatalog::standard())
    }

    pub fn catalog(&self) -> &MetierCatalog {
        &self.catalog
    }

    pub fn config(&self, metier: Metier) -> &MetierConfig {
        self.catalog.config(metier)
    }

    pub fn evaluate(&self, input: &EvaluationInput) -> DecisionResult {
        decide(self.catalog.config(input.metier), input)
    }

    pub fn validate_face_to_face(
        &self,
        metier: Metier,
        scores: &FaceToFaceScores,
    ) -> ValidationReport {
        validate_face_to_face(self.catalog.config(metier), scores)
    }

    pub fn validate_simulation(
        &self,
        metier: Metier,
        scores: &SimulationScores,
    ) -> ValidationReport {
        validate_simulation(self.catalog.config(metier), scores)
    }

    pub fn validate_technical(&self, metier: Metier, scores: &TechnicalScores) -> ValidationReport {
        validate_technical(self.catalog.config(metier), scores)
    }
}

/// Evaluate one candidate against the standard métier catalog.
pub fn evaluate(
    metier: Metier,
    availability: Availability,
    presence: PresenceStatus,
    face_to_face: Option<FaceToFaceScores>,
    simulation: Option<SimulationScores>,
    technical: Option<TechnicalScores>,
) -> DecisionResult {
    static STANDARD: OnceLock<DecisionEngine> = OnceLock::new();

    let input = EvaluationInput {
        metier,
        availability,
        presence,
        face_to_face,
        simulation,
        technical,
    };
    STANDARD.get_or_init(DecisionEngine::standard).evaluate(&input)
}
