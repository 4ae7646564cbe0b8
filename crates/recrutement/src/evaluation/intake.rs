use super::domain::{
    CandidateIntake, Criterion, EvaluationInput, FaceToFaceSubmission, Metier,
    SimulationSubmission, TechnicalScores,
};
use super::engine::MetierConfig;

/// Validation errors raised before scores reach aggregation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("{criterion} score {value} outside its 0-{max} scale")]
    OutOfRange {
        criterion: Criterion,
        value: f64,
        max: f64,
    },
    #[error("{criterion} is not scored for {metier}")]
    NotScoredForMetier { criterion: Criterion, metier: Metier },
    #[error("{metier} candidates do not take the sales simulation")]
    PhaseNotRequired { metier: Metier },
    #[error("jury member identifier is required")]
    MissingJuryMember,
    #[error("candidate name is required")]
    MissingCandidateName,
}

/// Guard checking raw submissions against the scales and criteria of one métier.
#[derive(Debug, Clone, Copy)]
pub struct IntakeGuard<'a> {
    config: &'a MetierConfig,
}

impl<'a> IntakeGuard<'a> {
    pub fn for_metier(config: &'a MetierConfig) -> Self {
        Self { config }
    }

    pub fn check_candidate(intake: &CandidateIntake) -> Result<(), IntakeViolation> {
        if intake.full_name.trim().is_empty() {
            return Err(IntakeViolation::MissingCandidateName);
        }
        Ok(())
    }

    /// Range-check every score present in an already aggregated snapshot. Criteria the
    /// métier does not grade are left to the engine, which ignores them.
    pub fn check_snapshot(input: &EvaluationInput) -> Result<(), IntakeViolation> {
        let mut scores = Vec::new();
        if let Some(face_to_face) = &input.face_to_face {
            scores.extend([
                (Criterion::VoiceQuality, face_to_face.voice_quality),
                (Criterion::VerbalCommunication, face_to_face.verbal_communication),
                (Criterion::PresentationVisuelle, face_to_face.presentation_visuelle),
                (Criterion::AppetenceDigitale, face_to_face.appetence_digitale),
            ]);
        }
        if let Some(simulation) = &input.simulation {
            scores.extend([
                (Criterion::SensNegociation, simulation.sens_negociation),
                (Criterion::CapacitePersuasion, simulation.capacite_persuasion),
                (Criterion::SensCombativite, simulation.sens_combativite),
            ]);
        }
        if let Some(technical) = &input.technical {
            scores.extend(technical.entries());
        }

        scores
            .into_iter()
            .filter_map(|(criterion, value)| value.map(|value| (criterion, value)))
            .try_for_each(|(criterion, value)| check_range(criterion, value))
    }

    pub fn check_face_to_face(
        &self,
        submission: &FaceToFaceSubmission,
    ) -> Result<(), IntakeViolation> {
        if submission.jury_member.0.trim().is_empty() {
            return Err(IntakeViolation::MissingJuryMember);
        }

        check_range(Criterion::VoiceQuality, submission.voice_quality)?;
        check_range(
            Criterion::VerbalCommunication,
            submission.verbal_communication,
        )?;

        let optional = [
            (
                Criterion::PresentationVisuelle,
                submission.presentation_visuelle,
                self.config.required.presentation_visuelle,
            ),
            (
                Criterion::AppetenceDigitale,
                submission.appetence_digitale,
                self.config.required.appetence_digitale,
            ),
        ];
        for (criterion, value, scored) in optional {
            let Some(value) = value else { continue };
            if !scored {
                return Err(IntakeViolation::NotScoredForMetier {
                    criterion,
                    metier: self.config.metier,
                });
            }
            check_range(criterion, value)?;
        }

        Ok(())
    }

    pub fn check_simulation(
        &self,
        submission: &SimulationSubmission,
    ) -> Result<(), IntakeViolation> {
        if !self.config.requires_simulation() {
            return Err(IntakeViolation::PhaseNotRequired {
                metier: self.config.metier,
            });
        }
        if submission.jury_member.0.trim().is_empty() {
            return Err(IntakeViolation::MissingJuryMember);
        }

        check_range(Criterion::SensNegociation, submission.sens_negociation)?;
        check_range(Criterion::CapacitePersuasion, submission.capacite_persuasion)?;
        check_range(Criterion::SensCombativite, submission.sens_combativite)
    }

    pub fn check_technical(&self, scores: &TechnicalScores) -> Result<(), IntakeViolation> {
        let required = self.config.technical_criteria();
        for (criterion, value) in scores.entries() {
            let Some(value) = value else { continue };
            if !required.contains(&criterion) {
                return Err(IntakeViolation::NotScoredForMetier {
                    criterion,
                    metier: self.config.metier,
                });
            }
            check_range(criterion, value)?;
        }
        Ok(())
    }
}

fn check_range(criterion: Criterion, value: f64) -> Result<(), IntakeViolation> {
    let max = criterion.max_score();
    if value.is_finite() && (0.0..=max).contains(&value) {
        Ok(())
    } else {
        Err(IntakeViolation::OutOfRange {
            criterion,
            value,
            max,
        })
    }
}
