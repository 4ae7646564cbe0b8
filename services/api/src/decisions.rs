use crate::infra::{decision_engine, parse_availability, parse_metier, parse_presence};
use clap::Args;
use recrutement::batch::{BatchEvaluator, BatchOutcome};
use recrutement::config::AppConfig;
use recrutement::error::AppError;
use recrutement::evaluation::{
    Availability, DecisionEngine, DecisionResult, EvaluationInput, FaceToFaceScores,
    FinalDecision, IntakeGuard, Metier, PhaseDecision, PresenceStatus, SimulationScores,
    TechnicalScores,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Métier code, e.g. CALL_CENTER or reseaux-sociaux
    #[arg(long, value_parser = parse_metier)]
    pub(crate) metier: Metier,
    /// Declared availability (OUI/NON)
    #[arg(long, value_parser = parse_availability, default_value = "OUI")]
    pub(crate) availability: Availability,
    /// Attendance on the evaluation day (PRESENT/ABSENT)
    #[arg(long, value_parser = parse_presence, default_value = "PRESENT")]
    pub(crate) presence: PresenceStatus,
    #[arg(long)]
    pub(crate) voice_quality: Option<f64>,
    #[arg(long)]
    pub(crate) verbal_communication: Option<f64>,
    #[arg(long)]
    pub(crate) presentation_visuelle: Option<f64>,
    #[arg(long)]
    pub(crate) appetence_digitale: Option<f64>,
    #[arg(long)]
    pub(crate) sens_negociation: Option<f64>,
    #[arg(long)]
    pub(crate) capacite_persuasion: Option<f64>,
    #[arg(long)]
    pub(crate) sens_combativite: Option<f64>,
    /// Words per minute
    #[arg(long)]
    pub(crate) typing_speed: Option<f64>,
    /// Percentage of correctly typed characters
    #[arg(long)]
    pub(crate) typing_accuracy: Option<f64>,
    #[arg(long)]
    pub(crate) excel_test: Option<f64>,
    /// Dictation score out of 20
    #[arg(long)]
    pub(crate) dictation: Option<f64>,
    #[arg(long)]
    pub(crate) psycho_raisonnement_logique: Option<f64>,
    #[arg(long)]
    pub(crate) psycho_attention_concentration: Option<f64>,
    /// Analysis exercise score out of 10
    #[arg(long)]
    pub(crate) analysis_exercise: Option<f64>,
    /// Print the decision as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl EvaluateArgs {
    fn evaluation_input(&self) -> EvaluationInput {
        let face_to_face = FaceToFaceScores {
            voice_quality: self.voice_quality,
            verbal_communication: self.verbal_communication,
            presentation_visuelle: self.presentation_visuelle,
            appetence_digitale: self.appetence_digitale,
        };
        let simulation = SimulationScores {
            sens_negociation: self.sens_negociation,
            capacite_persuasion: self.capacite_persuasion,
            sens_combativite: self.sens_combativite,
        };
        let technical = TechnicalScores {
            typing_speed: self.typing_speed,
            typing_accuracy: self.typing_accuracy,
            excel_test: self.excel_test,
            dictation: self.dictation,
            psycho_raisonnement_logique: self.psycho_raisonnement_logique,
            psycho_attention_concentration: self.psycho_attention_concentration,
            analysis_exercise: self.analysis_exercise,
        };

        EvaluationInput {
            metier: self.metier,
            availability: self.availability,
            presence: self.presence,
            face_to_face: Some(face_to_face)
                .filter(|scores| *scores != FaceToFaceScores::default()),
            simulation: Some(simulation)
                .filter(|scores| *scores != SimulationScores::default()),
            technical: Some(technical).filter(|scores| !scores.is_empty()),
        }
    }

    fn checked_input(&self) -> Result<EvaluationInput, AppError> {
        let input = self.evaluation_input();
        IntakeGuard::check_snapshot(&input)?;
        Ok(input)
    }
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV score sheet, one candidate per row
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Print the decisions as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

fn configured_engine() -> Result<DecisionEngine, AppError> {
    let config = AppConfig::load()?;
    decision_engine(&config)
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let engine = configured_engine()?;
    let input = args.checked_input()?;
    let result = engine.evaluate(&input);

    if args.json {
        print_json(&result);
        return Ok(());
    }

    println!("Candidate decision ({})", input.metier.label());
    render_decision(&engine, input.metier, &result);
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let engine = configured_engine()?;
    let outcomes = BatchEvaluator::new(&engine).from_path(&args.input)?;

    if args.json {
        let results: Vec<&DecisionResult> =
            outcomes.iter().map(|outcome| &outcome.result).collect();
        print_json(&results);
        return Ok(());
    }

    println!("Score sheet {}", args.input.display());
    for outcome in &outcomes {
        println!("{}", batch_line(outcome));
    }

    let tally = Tally::from_outcomes(&outcomes);
    println!(
        "\n{} candidates | {} recruited | {} not recruited | {} absent | {} pending",
        outcomes.len(),
        tally.recruited,
        tally.not_recruited,
        tally.absent,
        tally.pending
    );
    Ok(())
}

pub(crate) fn run_metiers() -> Result<(), AppError> {
    let engine = configured_engine()?;
    println!("Métier catalog");
    for config in engine.catalog().iter() {
        let technical: Vec<&str> = config
            .technical_criteria()
            .into_iter()
            .map(|criterion| criterion.name())
            .collect();
        let face_to_face: Vec<&str> = config
            .face_to_face_criteria()
            .into_iter()
            .map(|criterion| criterion.name())
            .collect();
        println!("- {} ({})", config.metier, config.metier.label());
        println!("    face-to-face: {}", face_to_face.join(", "));
        println!(
            "    simulation: {}",
            if config.requires_simulation() {
                "required"
            } else {
                "not taken"
            }
        );
        println!("    technical tests: {}", technical.join(", "));
        println!(
            "    minimums: face-to-face {} | typing {} wpm / {}% | dictation {}/20",
            config.thresholds.face_to_face,
            config.thresholds.typing_speed,
            config.thresholds.typing_accuracy,
            config.thresholds.dictation
        );
    }
    Ok(())
}

pub(crate) fn render_decision(engine: &DecisionEngine, metier: Metier, result: &DecisionResult) {
    println!("- Face-to-face: {}", phase_label(result.phase1_decision));
    if engine.config(metier).requires_simulation() {
        println!("- Simulation: {}", phase_label(result.phase2_decision));
    }
    println!(
        "- Technical tests: {}",
        result
            .technical_decision
            .map(PhaseDecision::technical_label)
            .unwrap_or("pending")
    );
    println!("- Final decision: {}", final_label(result.final_decision));
    println!("  Rationale: {}", result.summary());
    for failure in &result.failed_criteria {
        println!("    - {}", failure.describe());
    }
}

fn batch_line(outcome: &BatchOutcome) -> String {
    format!(
        "line {:>3} | {:<24} | {:<21} | {}",
        outcome.line,
        outcome.candidate,
        outcome.input.metier.code(),
        outcome.result.summary()
    )
}

fn phase_label(decision: Option<PhaseDecision>) -> &'static str {
    decision.map(PhaseDecision::label).unwrap_or("pending")
}

fn final_label(decision: Option<FinalDecision>) -> &'static str {
    decision.map(FinalDecision::label).unwrap_or("pending")
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(err) => println!("decision payload unavailable: {}", err),
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Tally {
    recruited: usize,
    not_recruited: usize,
    absent: usize,
    pending: usize,
}

impl Tally {
    fn from_outcomes(outcomes: &[BatchOutcome]) -> Self {
        outcomes
            .iter()
            .fold(Tally::default(), |mut tally, outcome| {
                match outcome.result.final_decision {
                    Some(FinalDecision::Recrute) => tally.recruited += 1,
                    Some(FinalDecision::NonRecrute) => tally.not_recruited += 1,
                    Some(FinalDecision::Absent) => tally.absent += 1,
                    None => tally.pending += 1,
                }
                tally
            })
    }
}
