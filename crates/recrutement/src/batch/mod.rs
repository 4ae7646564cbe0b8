//! Batch evaluation of aggregated score sheets exported as CSV.
//!
//! Each row carries one candidate's métier, statuses, and already-averaged scores. Empty
//! cells mean "not entered"; a phase whose cells are all empty is treated as not yet scored.

mod parser;

use crate::evaluation::{DecisionEngine, DecisionResult, EvaluationInput};
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum BatchError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow { line: usize, reason: String },
}

impl std::fmt::Display for BatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchError::Io(err) => write!(f, "failed to read score sheet: {}", err),
            BatchError::Csv(err) => write!(f, "invalid score sheet CSV data: {}", err),
            BatchError::InvalidRow { line, reason } => {
                write!(f, "score sheet line {}: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for BatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchError::Io(err) => Some(err),
            BatchError::Csv(err) => Some(err),
            BatchError::InvalidRow { .. } => None,
        }
    }
}

impl From<std::io::Error> for BatchError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for BatchError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Decision computed for one score sheet line.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub line: usize,
    pub candidate: String,
    pub input: EvaluationInput,
    pub result: DecisionResult,
}

pub struct BatchEvaluator<'a> {
    engine: &'a DecisionEngine,
}

impl<'a> BatchEvaluator<'a> {
    pub fn new(engine: &'a DecisionEngine) -> Self {
        Self { engine }
    }

    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<BatchOutcome>, BatchError> {
        let file = std::fs::File::open(path)?;
        self.from_reader(file)
    }

    pub fn from_reader<R: Read>(&self, reader: R) -> Result<Vec<BatchOutcome>, BatchError> {
        let outcomes = parser::parse_records(reader)?
            .into_iter()
            .map(|record| {
                let result = self.engine.evaluate(&record.input);
                BatchOutcome {
                    line: record.line,
                    candidate: record.candidate,
                    input: record.input,
                    result,
                }
            })
            .collect();
        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::{FinalDecision, Metier, PhaseDecision};
    use std::io::Cursor;

    const HEADER: &str = "candidate,metier,availability,presence,\
voice_quality,verbal_communication,presentation_visuelle,appetence_digitale,\
sens_negociation,capacite_persuasion,sens_combativite,\
typing_speed,typing_accuracy,excel_test,dictation\n";

    fn evaluate(rows: &str) -> Result<Vec<BatchOutcome>, BatchError> {
        let engine = DecisionEngine::standard();
        let csv = format!("{HEADER}{rows}");
        BatchEvaluator::new(&engine).from_reader(Cursor::new(csv.into_bytes()))
    }

    #[test]
    fn evaluates_each_row_with_line_numbers() {
        let outcomes = evaluate(
            "Amina,CALL_CENTER,OUI,PRESENT,4,4,,,,,,20,90,4,16\n\
             Karim,call-center,oui,present,4,4,,,,,,20,90,4,10\n",
        )
        .expect("sheet parses");

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].line, 2);
        assert_eq!(outcomes[0].candidate, "Amina");
        assert_eq!(outcomes[0].input.metier, Metier::CallCenter);
        assert_eq!(
            outcomes[0].result.final_decision,
            Some(FinalDecision::Recrute)
        );
        assert_eq!(outcomes[1].line, 3);
        assert_eq!(
            outcomes[1].result.final_decision,
            Some(FinalDecision::NonRecrute)
        );
    }

    #[test]
    fn empty_phase_cells_leave_the_phase_pending() {
        let outcomes = evaluate("Salma,AGENCES,,,4,4,4,,,,,,,,\n").expect("sheet parses");

        let outcome = &outcomes[0];
        assert!(outcome.input.simulation.is_none());
        assert!(outcome.input.technical.is_none());
        assert_eq!(
            outcome.result.phase1_decision,
            Some(PhaseDecision::Favorable)
        );
        assert!(outcome.result.is_pending());
    }

    #[test]
    fn absent_rows_skip_scoring() {
        let outcomes = evaluate("Youssef,TELEVENTE,OUI,ABSENT,1,1,,,,,,,,,\n").expect("parses");
        assert_eq!(
            outcomes[0].result.final_decision,
            Some(FinalDecision::Absent)
        );
    }

    #[test]
    fn unknown_metier_is_reported_with_its_line() {
        match evaluate("Nadia,CALL_CENTER,,,4,4,,,,,,,,,\nOmar,PILOTE,,,4,4,,,,,,,,,\n") {
            Err(BatchError::InvalidRow { line, reason }) => {
                assert_eq!(line, 3);
                assert!(reason.contains("PILOTE"));
            }
            other => panic!("expected invalid row, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_scores_surface_as_csv_errors() {
        assert!(matches!(
            evaluate("Hind,CALL_CENTER,,,four,4,,,,,,,,,\n"),
            Err(BatchError::Csv(_))
        ));
    }

    #[test]
    fn quoted_cells_spanning_lines_keep_later_rows_on_their_own_line() {
        let outcomes = evaluate(
            "\"Amina\nBenali\",CALL_CENTER,OUI,PRESENT,4,4,,,,,,20,90,4,16\n\
             Karim,CALL_CENTER,OUI,PRESENT,4,4,,,,,,20,90,4,10\n",
        )
        .expect("sheet parses");

        assert_eq!(outcomes[0].line, 2);
        assert_eq!(outcomes[0].candidate, "Amina\nBenali");
        assert_eq!(outcomes[1].line, 4);
    }

    #[test]
    fn aggregated_scores_outside_their_scale_are_rejected() {
        match evaluate(
            "Nadia,CALL_CENTER,,,4,4,,,,,,20,90,4,16\n\
             Omar,CALL_CENTER,,,40,40,,,,,,20,90,4,160\n",
        ) {
            Err(BatchError::InvalidRow { line, reason }) => {
                assert_eq!(line, 3);
                assert!(reason.contains("outside its 0-5 scale"), "{reason}");
            }
            other => panic!("expected invalid row, got {other:?}"),
        }
    }
}
