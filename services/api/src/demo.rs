use crate::decisions::render_decision;
use crate::infra::{decision_engine, parse_metier, InMemoryCandidateRepository};
use chrono::Utc;
use clap::Args;
use recrutement::config::AppConfig;
use recrutement::error::AppError;
use recrutement::evaluation::{
    CandidateEvaluationService, CandidateId, CandidateIntake, Criterion, FaceToFaceSubmission,
    JuryMemberId, Metier, MetierConfig, SimulationSubmission, TechnicalScores,
};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Métier the sample candidate applies for
    #[arg(long, value_parser = parse_metier, default_value = "TELEVENTE")]
    pub(crate) metier: Metier,
    /// Candidate name shown in the walkthrough
    #[arg(long, default_value = "Amina El Idrissi")]
    pub(crate) name: String,
    /// Give the candidate a dictation below the minimum
    #[arg(long)]
    pub(crate) weak_dictation: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        metier,
        name,
        weak_dictation,
    } = args;

    let config = AppConfig::load()?;
    let engine = Arc::new(decision_engine(&config)?);
    let repository = Arc::new(InMemoryCandidateRepository::default());
    let service = CandidateEvaluationService::new(repository, engine.clone());

    println!("Recruitment decision demo ({})", metier.label());
    let record = match service.register(CandidateIntake {
        full_name: name,
        metier,
        availability: Default::default(),
        presence: Default::default(),
    }) {
        Ok(record) => record,
        Err(err) => {
            println!("  Registration rejected: {}", err);
            return Ok(());
        }
    };
    let candidate_id = record.candidate_id.clone();
    println!(
        "- Registered {} as {} -> status {}",
        record.full_name,
        candidate_id.0,
        record.status.label()
    );

    let metier_config = engine.config(metier).clone();
    for (jury, voice, verbal) in [("jury-rh-01", 4.0, 3.5), ("jury-ops-02", 3.5, 4.0)] {
        let submission = face_to_face_grid(&metier_config, jury, voice, verbal);
        report_step(
            &format!("Face-to-face grid from {jury}"),
            service.submit_face_to_face(&candidate_id, submission),
        );
    }

    if metier_config.requires_simulation() {
        for (jury, score) in [("jury-sales-01", 3.5), ("jury-sales-02", 4.0)] {
            let submission = SimulationSubmission {
                jury_member: JuryMemberId(jury.to_string()),
                sens_negociation: score,
                capacite_persuasion: score,
                sens_combativite: score,
                evaluated_at: Utc::now(),
            };
            report_step(
                &format!("Simulation grid from {jury}"),
                service.submit_simulation(&candidate_id, submission),
            );
        }
    }

    match service.evaluate(&candidate_id) {
        Ok(result) => println!("- Interim evaluation: {}", result.summary()),
        Err(err) => println!("  Evaluation unavailable: {}", err),
    }

    let dictation = if weak_dictation { 12.0 } else { 17.0 };
    report_step(
        "Technical results",
        service.record_technical(&candidate_id, technical_scores(&metier_config, dictation)),
    );

    let result = match service.evaluate(&candidate_id) {
        Ok(result) => result,
        Err(err) => {
            println!("  Evaluation unavailable: {}", err);
            return Ok(());
        }
    };
    println!("\nFinal evaluation");
    render_decision(&engine, metier, &result);

    print_status(&service, &candidate_id);
    Ok(())
}

fn face_to_face_grid(
    config: &MetierConfig,
    jury: &str,
    voice: f64,
    verbal: f64,
) -> FaceToFaceSubmission {
    let criteria = config.face_to_face_criteria();
    let rated = |criterion| criteria.contains(&criterion).then_some(4.0);
    FaceToFaceSubmission {
        jury_member: JuryMemberId(jury.to_string()),
        voice_quality: voice,
        verbal_communication: verbal,
        presentation_visuelle: rated(Criterion::PresentationVisuelle),
        appetence_digitale: rated(Criterion::AppetenceDigitale),
        evaluated_at: Utc::now(),
    }
}

/// Scores comfortably above each minimum except the dictation, which is given as is.
fn technical_scores(config: &MetierConfig, dictation: f64) -> TechnicalScores {
    let mut scores = TechnicalScores::default();
    for criterion in config.technical_criteria() {
        let value = Some(match criterion {
            Criterion::Dictation => dictation,
            Criterion::TypingSpeed => 32.0,
            Criterion::TypingAccuracy => 94.0,
            Criterion::AnalysisExercise => 7.0,
            _ => 4.0,
        });
        match criterion {
            Criterion::TypingSpeed => scores.typing_speed = value,
            Criterion::TypingAccuracy => scores.typing_accuracy = value,
            Criterion::ExcelTest => scores.excel_test = value,
            Criterion::Dictation => scores.dictation = value,
            Criterion::PsychoRaisonnementLogique => scores.psycho_raisonnement_logique = value,
            Criterion::PsychoAttentionConcentration => {
                scores.psycho_attention_concentration = value
            }
            Criterion::AnalysisExercise => scores.analysis_exercise = value,
            _ => {}
        }
    }
    scores
}

fn report_step<T, E: std::fmt::Display>(step: &str, outcome: Result<T, E>) {
    match outcome {
        Ok(_) => println!("- {} recorded", step),
        Err(err) => println!("  {} rejected: {}", step, err),
    }
}

fn print_status(
    service: &CandidateEvaluationService<InMemoryCandidateRepository>,
    candidate_id: &CandidateId,
) {
    let record = match service.get(candidate_id) {
        Ok(record) => record,
        Err(err) => {
            println!("  Repository unavailable: {}", err);
            return;
        }
    };

    let jury: Vec<String> = record
        .jury_members()
        .into_iter()
        .map(|member| member.0)
        .collect();
    println!("  Jury members: {}", jury.join(", "));
    match serde_json::to_string_pretty(&record.status_view()) {
        Ok(json) => println!("  Public status payload:\n{}", json),
        Err(err) => println!("  Public status payload unavailable: {}", err),
    }
}
