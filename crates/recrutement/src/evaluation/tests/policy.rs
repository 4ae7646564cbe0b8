use super::common::*;
use crate::evaluation::domain::{
    Availability, EvaluationInput, FaceToFaceScores, Metier, PresenceStatus, TechnicalScores,
};
use crate::evaluation::engine::{evaluate, EvaluationStage, FinalDecision, PhaseDecision};

#[test]
fn call_center_candidate_meeting_every_minimum_is_recruited() {
    let result = engine().evaluate(&call_center_input());

    assert_eq!(result.phase1_decision, Some(PhaseDecision::Favorable));
    assert_eq!(result.phase2_decision, None);
    assert_eq!(result.technical_decision, Some(PhaseDecision::Favorable));
    assert_eq!(result.final_decision, Some(FinalDecision::Recrute));
    assert!(result.failed_criteria.is_empty());
    assert_eq!(result.summary(), "recruited");
}

#[test]
fn low_dictation_eliminates_at_technical_stage() {
    let mut input = call_center_input();
    if let Some(technical) = input.technical.as_mut() {
        technical.dictation = Some(10.0);
    }

    let result = engine().evaluate(&input);
    assert_eq!(result.phase1_decision, Some(PhaseDecision::Favorable));
    assert_eq!(result.technical_decision, Some(PhaseDecision::Defavorable));
    assert_eq!(
        result.technical_decision.map(PhaseDecision::technical_label),
        Some("ELIMINE")
    );
    assert_eq!(result.final_decision, Some(FinalDecision::NonRecrute));
    assert_eq!(result.stage, EvaluationStage::Technical);
    assert_eq!(
        result.summary(),
        "not recruited at technical tests stage: dictation 10.00 below required 16.00"
    );
}

#[test]
fn agences_without_simulation_scores_is_pending() {
    let input = EvaluationInput {
        face_to_face: Some(FaceToFaceScores {
            presentation_visuelle: Some(4.0),
            ..face_to_face(4.0, 4.0)
        }),
        ..EvaluationInput::new(Metier::Agences)
    };

    let result = engine().evaluate(&input);
    assert_eq!(result.phase1_decision, Some(PhaseDecision::Favorable));
    assert_eq!(result.phase2_decision, None);
    assert_eq!(result.technical_decision, None);
    assert_eq!(result.final_decision, None);
    assert_eq!(result.stage, EvaluationStage::Simulation);
    assert_eq!(result.summary(), "pending simulation scores");
}

#[test]
fn agences_with_every_phase_passed_is_recruited() {
    let input = EvaluationInput {
        face_to_face: Some(FaceToFaceScores {
            presentation_visuelle: Some(3.0),
            ..face_to_face(4.0, 3.0)
        }),
        simulation: Some(simulation(3.0, 3.5, 4.0)),
        technical: Some(TechnicalScores {
            dictation: Some(17.0),
            ..TechnicalScores::default()
        }),
        ..EvaluationInput::new(Metier::Agences)
    };

    let result = engine().evaluate(&input);
    assert_eq!(result.phase2_decision, Some(PhaseDecision::Favorable));
    assert_eq!(result.final_decision, Some(FinalDecision::Recrute));
}

#[test]
fn failed_simulation_stops_before_technical_tests() {
    let input = EvaluationInput {
        face_to_face: Some(face_to_face(4.0, 4.0)),
        simulation: Some(simulation(2.0, 4.0, 4.0)),
        technical: Some(TechnicalScores {
            typing_speed: Some(40.0),
            typing_accuracy: Some(95.0),
            dictation: Some(19.0),
            ..TechnicalScores::default()
        }),
        ..EvaluationInput::new(Metier::Televente)
    };

    let result = engine().evaluate(&input);
    assert_eq!(result.phase1_decision, Some(PhaseDecision::Favorable));
    assert_eq!(result.phase2_decision, Some(PhaseDecision::Defavorable));
    assert_eq!(result.technical_decision, None);
    assert_eq!(result.final_decision, Some(FinalDecision::NonRecrute));
    assert_eq!(result.stage, EvaluationStage::Simulation);
}

#[test]
fn low_digital_appetence_is_not_recruited() {
    let input = EvaluationInput {
        face_to_face: Some(FaceToFaceScores {
            appetence_digitale: Some(2.0),
            ..face_to_face(4.0, 4.0)
        }),
        technical: Some(TechnicalScores {
            typing_speed: Some(30.0),
            typing_accuracy: Some(92.0),
            dictation: Some(18.0),
            ..TechnicalScores::default()
        }),
        ..EvaluationInput::new(Metier::ReseauxSociaux)
    };

    let result = engine().evaluate(&input);
    assert_eq!(result.phase1_decision, Some(PhaseDecision::Defavorable));
    assert_eq!(result.technical_decision, None);
    assert_eq!(result.final_decision, Some(FinalDecision::NonRecrute));
    assert_eq!(result.failed_criteria.len(), 1);
    assert_eq!(result.failed_criteria[0].actual, Some(2.0));
}

#[test]
fn absence_wins_over_every_score() {
    let input = EvaluationInput {
        presence: PresenceStatus::Absent,
        availability: Availability::Non,
        ..call_center_input()
    };

    let result = engine().evaluate(&input);
    assert_eq!(result.final_decision, Some(FinalDecision::Absent));
    assert_eq!(result.phase1_decision, None);
    assert_eq!(result.technical_decision, None);
    assert_eq!(result.stage, EvaluationStage::Presence);
}

#[test]
fn unavailable_candidate_is_rejected_without_scores() {
    let result = engine().evaluate(&EvaluationInput {
        availability: Availability::Non,
        ..EvaluationInput::new(Metier::CallCenter)
    });
    assert_eq!(result.phase1_decision, Some(PhaseDecision::Defavorable));
    assert_eq!(result.phase2_decision, None);
    assert_eq!(result.technical_decision, Some(PhaseDecision::Defavorable));
    assert_eq!(result.final_decision, Some(FinalDecision::NonRecrute));
    assert_eq!(result.summary(), "not recruited: candidate unavailable");

    let agences = engine().evaluate(&EvaluationInput {
        availability: Availability::Non,
        ..EvaluationInput::new(Metier::Agences)
    });
    assert_eq!(agences.phase2_decision, Some(PhaseDecision::Defavorable));
}

#[test]
fn missing_face_to_face_leaves_everything_pending() {
    let input = EvaluationInput {
        technical: Some(call_center_technical()),
        ..EvaluationInput::new(Metier::CallCenter)
    };

    let result = engine().evaluate(&input);
    assert!(result.is_pending());
    assert_eq!(result.phase1_decision, None);
    assert_eq!(result.technical_decision, None);
    assert_eq!(result.stage, EvaluationStage::FaceToFace);
}

#[test]
fn empty_technical_scores_count_as_not_entered() {
    let input = EvaluationInput {
        face_to_face: Some(face_to_face(4.0, 4.0)),
        technical: Some(TechnicalScores::default()),
        ..EvaluationInput::new(Metier::CallCenter)
    };

    let result = engine().evaluate(&input);
    assert_eq!(result.phase1_decision, Some(PhaseDecision::Favorable));
    assert_eq!(result.technical_decision, None);
    assert!(result.is_pending());
    assert_eq!(result.stage, EvaluationStage::Technical);
}

#[test]
fn partially_entered_technical_scores_fail_on_the_missing_test() {
    let input = EvaluationInput {
        face_to_face: Some(face_to_face(4.0, 4.0)),
        technical: Some(TechnicalScores {
            dictation: Some(19.0),
            ..TechnicalScores::default()
        }),
        ..EvaluationInput::new(Metier::CallCenter)
    };

    let result = engine().evaluate(&input);
    assert_eq!(result.final_decision, Some(FinalDecision::NonRecrute));
    assert_eq!(result.failed_criteria.len(), 3);
}

#[test]
fn free_function_matches_engine() {
    let input = call_center_input();
    let result = evaluate(
        input.metier,
        input.availability,
        input.presence,
        input.face_to_face.clone(),
        input.simulation.clone(),
        input.technical.clone(),
    );
    assert_eq!(result, engine().evaluate(&input));
}

#[test]
fn decisions_serialize_with_campaign_labels() {
    let result = engine().evaluate(&call_center_input());
    let value = serde_json::to_value(&result).expect("serialize");
    assert_eq!(value["phase1_decision"], "FAVORABLE");
    assert_eq!(value["final_decision"], "RECRUTE");
    assert_eq!(value["phase2_decision"], serde_json::Value::Null);
    assert_eq!(value["stage"], "TECHNICAL");
}
