use super::common::*;
use crate::evaluation::domain::{Criterion, Metier, TechnicalScores};
use crate::evaluation::intake::{IntakeGuard, IntakeViolation};

#[test]
fn rejects_scores_outside_their_scale() {
    let engine = engine();
    let guard = IntakeGuard::for_metier(engine.config(Metier::CallCenter));

    let error = guard
        .check_face_to_face(&jury_grid("jury-a", 6.0, 4.0))
        .expect_err("voice above 5");
    assert_eq!(
        error,
        IntakeViolation::OutOfRange {
            criterion: Criterion::VoiceQuality,
            value: 6.0,
            max: 5.0,
        }
    );

    let dictation = TechnicalScores {
        dictation: Some(21.0),
        ..TechnicalScores::default()
    };
    assert!(matches!(
        guard.check_technical(&dictation),
        Err(IntakeViolation::OutOfRange { max, .. }) if max == 20.0
    ));

    assert!(matches!(
        guard.check_face_to_face(&jury_grid("jury-a", -1.0, 4.0)),
        Err(IntakeViolation::OutOfRange { .. })
    ));
}

#[test]
fn typing_speed_uses_its_own_scale() {
    let engine = engine();
    let guard = IntakeGuard::for_metier(engine.config(Metier::CallCenter));
    let scores = TechnicalScores {
        typing_speed: Some(62.0),
        typing_accuracy: Some(97.5),
        ..TechnicalScores::default()
    };
    assert!(guard.check_technical(&scores).is_ok());
}

#[test]
fn rejects_criteria_the_metier_does_not_rate() {
    let engine = engine();
    let guard = IntakeGuard::for_metier(engine.config(Metier::CallCenter));

    let mut grid = jury_grid("jury-a", 4.0, 4.0);
    grid.appetence_digitale = Some(4.0);
    assert_eq!(
        guard.check_face_to_face(&grid),
        Err(IntakeViolation::NotScoredForMetier {
            criterion: Criterion::AppetenceDigitale,
            metier: Metier::CallCenter,
        })
    );

    let analysis = TechnicalScores {
        analysis_exercise: Some(7.0),
        ..TechnicalScores::default()
    };
    assert!(matches!(
        guard.check_technical(&analysis),
        Err(IntakeViolation::NotScoredForMetier { .. })
    ));
}

#[test]
fn simulation_only_accepted_for_sales_metiers() {
    let engine = engine();
    let call_center = IntakeGuard::for_metier(engine.config(Metier::CallCenter));
    assert_eq!(
        call_center.check_simulation(&simulation_grid("jury-a", 4.0)),
        Err(IntakeViolation::PhaseNotRequired {
            metier: Metier::CallCenter
        })
    );

    let televente = IntakeGuard::for_metier(engine.config(Metier::Televente));
    assert!(televente
        .check_simulation(&simulation_grid("jury-a", 4.0))
        .is_ok());
    assert_eq!(
        televente.check_simulation(&simulation_grid(" ", 4.0)),
        Err(IntakeViolation::MissingJuryMember)
    );
}

#[test]
fn candidate_name_is_required() {
    let mut candidate = intake(Metier::Agences);
    assert!(IntakeGuard::check_candidate(&candidate).is_ok());
    candidate.full_name = "   ".to_string();
    assert_eq!(
        IntakeGuard::check_candidate(&candidate),
        Err(IntakeViolation::MissingCandidateName)
    );
}

#[test]
fn aggregated_snapshots_are_range_checked() {
    assert_eq!(IntakeGuard::check_snapshot(&call_center_input()), Ok(()));

    let mut input = call_center_input();
    if let Some(technical) = input.technical.as_mut() {
        technical.dictation = Some(160.0);
    }
    assert_eq!(
        IntakeGuard::check_snapshot(&input),
        Err(IntakeViolation::OutOfRange {
            criterion: Criterion::Dictation,
            value: 160.0,
            max: 20.0,
        })
    );

    let mut input = call_center_input();
    input.face_to_face = Some(face_to_face(4.0, f64::NAN));
    assert!(matches!(
        IntakeGuard::check_snapshot(&input),
        Err(IntakeViolation::OutOfRange {
            criterion: Criterion::VerbalCommunication,
            ..
        })
    ));

    let mut input = call_center_input();
    input.simulation = Some(simulation(4.0, -1.0, 4.0));
    assert!(matches!(
        IntakeGuard::check_snapshot(&input),
        Err(IntakeViolation::OutOfRange {
            criterion: Criterion::CapacitePersuasion,
            ..
        })
    ));
}
