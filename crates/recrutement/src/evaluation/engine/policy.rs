use serde::{Deserialize, Serialize};

use super::super::domain::{Availability, EvaluationInput, PresenceStatus};
use super::catalog::MetierConfig;
use super::rules::{
    validate_face_to_face, validate_simulation, validate_technical, CriterionFailure,
};

/// Verdict for a single evaluation phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhaseDecision {
    Favorable,
    Defavorable,
}

impl PhaseDecision {
    pub const fn label(self) -> &'static str {
        match self {
            PhaseDecision::Favorable => "FAVORABLE",
            PhaseDecision::Defavorable => "DEFAVORABLE",
        }
    }

    /// Label used for the technical phase on score sheets.
    pub const fn technical_label(self) -> &'static str {
        match self {
            PhaseDecision::Favorable => "ADMIS",
            PhaseDecision::Defavorable => "ELIMINE",
        }
    }

    pub fn from_valid(valid: bool) -> Self {
        if valid {
            PhaseDecision::Favorable
        } else {
            PhaseDecision::Defavorable
        }
    }
}

/// Hiring outcome once every required phase has been decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinalDecision {
    Recrute,
    NonRecrute,
    Absent,
}

impl FinalDecision {
    pub const fn label(self) -> &'static str {
        match self {
            FinalDecision::Recrute => "RECRUTE",
            FinalDecision::NonRecrute => "NON_RECRUTE",
            FinalDecision::Absent => "ABSENT",
        }
    }
}

/// Step of the evaluation sequence where the composer stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvaluationStage {
    Presence,
    Availability,
    FaceToFace,
    Simulation,
    Technical,
}

impl EvaluationStage {
    pub const fn label(self) -> &'static str {
        match self {
            EvaluationStage::Presence => "presence",
            EvaluationStage::Availability => "availability",
            EvaluationStage::FaceToFace => "face-to-face",
            EvaluationStage::Simulation => "simulation",
            EvaluationStage::Technical => "technical tests",
        }
    }
}

/// Phase and final decisions for one candidate. `None` means the data needed to
/// decide has not been supplied yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionResult {
    pub phase1_decision: Option<PhaseDecision>,
    pub phase2_decision: Option<PhaseDecision>,
    pub technical_decision: Option<PhaseDecision>,
    pub final_decision: Option<FinalDecision>,
    pub stage: EvaluationStage,
    #[serde(default)]
    pub failed_criteria: Vec<CriterionFailure>,
}

impl DecisionResult {
    fn at(stage: EvaluationStage) -> Self {
        Self {
            phase1_decision: None,
            phase2_decision: None,
            technical_decision: None,
            final_decision: None,
            stage,
            failed_criteria: Vec::new(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.final_decision.is_none()
    }

    pub fn is_terminal(&self) -> bool {
        self.final_decision.is_some()
    }

    pub fn summary(&self) -> String {
        match self.final_decision {
            Some(FinalDecision::Recrute) => "recruited".to_string(),
            Some(FinalDecision::Absent) => "absent on evaluation day".to_string(),
            Some(FinalDecision::NonRecrute) if self.stage == EvaluationStage::Availability => {
                "not recruited: candidate unavailable".to_string()
            }
            Some(FinalDecision::NonRecrute) => {
                let reasons: Vec<String> = self
                    .failed_criteria
                    .iter()
                    .map(CriterionFailure::describe)
                    .collect();
                format!(
                    "not recruited at {} stage: {}",
                    self.stage.label(),
                    reasons.join("; ")
                )
            }
            None => format!("pending {} scores", self.stage.label()),
        }
    }
}

/// Run the evaluation sequence: presence, availability, face-to-face, simulation when
/// the métier requires it, then technical tests. The first phase that fails or lacks
/// data ends the sequence; decisions already taken are kept.
pub(crate) fn decide(config: &MetierConfig, input: &EvaluationInput) -> DecisionResult {
    if input.presence == PresenceStatus::Absent {
        let mut result = DecisionResult::at(EvaluationStage::Presence);
        result.final_decision = Some(FinalDecision::Absent);
        return result;
    }

    if input.availability == Availability::Non {
        let mut result = DecisionResult::at(EvaluationStage::Availability);
        result.phase1_decision = Some(PhaseDecision::Defavorable);
        if config.requires_simulation() {
            result.phase2_decision = Some(PhaseDecision::Defavorable);
        }
        result.technical_decision = Some(PhaseDecision::Defavorable);
        result.final_decision = Some(FinalDecision::NonRecrute);
        return result;
    }

    let mut result = DecisionResult::at(EvaluationStage::FaceToFace);
    let Some(face_to_face) = &input.face_to_face else {
        return result;
    };
    let report = validate_face_to_face(config, face_to_face);
    result.phase1_decision = Some(PhaseDecision::from_valid(report.is_valid()));
    if !report.is_valid() {
        result.failed_criteria = report.failed_criteria;
        result.final_decision = Some(FinalDecision::NonRecrute);
        return result;
    }

    if config.requires_simulation() {
        result.stage = EvaluationStage::Simulation;
        let Some(simulation) = &input.simulation else {
            return result;
        };
        let report = validate_simulation(config, simulation);
        result.phase2_decision = Some(PhaseDecision::from_valid(report.is_valid()));
        if !report.is_valid() {
            result.failed_criteria = report.failed_criteria;
            result.final_decision = Some(FinalDecision::NonRecrute);
            return result;
        }
    }

    result.stage = EvaluationStage::Technical;
    let technical = match &input.technical {
        Some(scores) if !scores.is_empty() => scores,
        _ => return result,
    };
    let report = validate_technical(config, technical);
    let passed = report.is_valid();
    result.technical_decision = Some(PhaseDecision::from_valid(passed));
    result.failed_criteria = report.failed_criteria;
    result.final_decision = Some(if passed {
        FinalDecision::Recrute
    } else {
        FinalDecision::NonRecrute
    });
    result
}
