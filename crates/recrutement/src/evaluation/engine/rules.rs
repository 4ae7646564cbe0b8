use serde::{Deserialize, Serialize};

use super::super::domain::{Criterion, FaceToFaceScores, SimulationScores, TechnicalScores};
use super::catalog::MetierConfig;

/// A criterion that did not reach its minimum, kept for adverse decision notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionFailure {
    pub criterion: Criterion,
    pub actual: Option<f64>,
    pub required: f64,
}

impl CriterionFailure {
    pub fn describe(&self) -> String {
        match self.actual {
            Some(actual) => format!(
                "{} {:.2} below required {:.2}",
                self.criterion, actual, self.required
            ),
            None => format!(
                "{} missing (required {:.2})",
                self.criterion, self.required
            ),
        }
    }
}

/// Outcome of validating one phase against a métier's thresholds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub failed_criteria: Vec<CriterionFailure>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.failed_criteria.is_empty()
    }

    pub fn failed_criterion_names(&self) -> Vec<&'static str> {
        self.failed_criteria
            .iter()
            .map(|failure| failure.criterion.name())
            .collect()
    }

    fn check(&mut self, criterion: Criterion, actual: Option<f64>, required: f64) {
        // NaN never compares >= so it lands in the failure list.
        let passed = actual.map(|value| value >= required).unwrap_or(false);
        if !passed {
            self.failed_criteria.push(CriterionFailure {
                criterion,
                actual,
                required,
            });
        }
    }
}

/// Check every face-to-face criterion the métier rates. Criteria the métier does not
/// rate are ignored even when supplied.
pub fn validate_face_to_face(config: &MetierConfig, scores: &FaceToFaceScores) -> ValidationReport {
    let mut report = ValidationReport::default();
    for criterion in config.face_to_face_criteria() {
        let actual = match criterion {
            Criterion::VoiceQuality => scores.voice_quality,
            Criterion::VerbalCommunication => scores.verbal_communication,
            Criterion::PresentationVisuelle => scores.presentation_visuelle,
            Criterion::AppetenceDigitale => scores.appetence_digitale,
            _ => continue,
        };
        report.check(criterion, actual, config.thresholds.minimum_for(criterion));
    }
    report
}

pub fn validate_simulation(config: &MetierConfig, scores: &SimulationScores) -> ValidationReport {
    let minimum = config.thresholds.simulation;
    let mut report = ValidationReport::default();
    report.check(Criterion::SensNegociation, scores.sens_negociation, minimum);
    report.check(
        Criterion::CapacitePersuasion,
        scores.capacite_persuasion,
        minimum,
    );
    report.check(Criterion::SensCombativite, scores.sens_combativite, minimum);
    report
}

/// Compare each required technical test with its minimum. A required score that was
/// never entered counts as a failure.
pub fn validate_technical(config: &MetierConfig, scores: &TechnicalScores) -> ValidationReport {
    let mut report = ValidationReport::default();
    let entries = scores.entries();
    for criterion in config.technical_criteria() {
        let actual = entries
            .iter()
            .find(|(candidate, _)| *candidate == criterion)
            .and_then(|(_, value)| *value);
        report.check(criterion, actual, config.thresholds.minimum_for(criterion));
    }
    report
}
