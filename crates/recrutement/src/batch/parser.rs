use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::BatchError;

use crate::evaluation::{
    Availability, EvaluationInput, FaceToFaceScores, IntakeGuard, Metier, PresenceStatus,
    SimulationScores, TechnicalScores,
};

/// One CSV line converted into an engine snapshot.
#[derive(Debug)]
pub(crate) struct BatchRecord {
    pub(crate) line: usize,
    pub(crate) candidate: String,
    pub(crate) input: EvaluationInput,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<BatchRecord>, BatchError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut records = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        // Quoted cells may span lines, so the reader's position is the only reliable line.
        let line = record
            .position()
            .map_or(0, |position| position.line() as usize);
        let row: BatchRow = record.deserialize(Some(&headers))?;
        let input = row
            .evaluation_input()
            .and_then(|input| {
                IntakeGuard::check_snapshot(&input)
                    .map(|()| input)
                    .map_err(|violation| violation.to_string())
            })
            .map_err(|reason| BatchError::InvalidRow { line, reason })?;

        records.push(BatchRecord {
            line,
            candidate: row.candidate,
            input,
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct BatchRow {
    candidate: String,
    metier: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    availability: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    presence: Option<String>,
    #[serde(default)]
    voice_quality: Option<f64>,
    #[serde(default)]
    verbal_communication: Option<f64>,
    #[serde(default)]
    presentation_visuelle: Option<f64>,
    #[serde(default)]
    appetence_digitale: Option<f64>,
    #[serde(default)]
    sens_negociation: Option<f64>,
    #[serde(default)]
    capacite_persuasion: Option<f64>,
    #[serde(default)]
    sens_combativite: Option<f64>,
    #[serde(default)]
    typing_speed: Option<f64>,
    #[serde(default)]
    typing_accuracy: Option<f64>,
    #[serde(default)]
    excel_test: Option<f64>,
    #[serde(default)]
    dictation: Option<f64>,
    #[serde(default)]
    psycho_raisonnement_logique: Option<f64>,
    #[serde(default)]
    psycho_attention_concentration: Option<f64>,
    #[serde(default)]
    analysis_exercise: Option<f64>,
}

impl BatchRow {
    fn evaluation_input(&self) -> Result<EvaluationInput, String> {
        let metier: Metier = self.metier.parse().map_err(|err| format!("{err}"))?;
        let availability = match self.availability.as_deref() {
            Some(raw) => raw.parse::<Availability>().map_err(|err| format!("{err}"))?,
            None => Availability::Oui,
        };
        let presence = match self.presence.as_deref() {
            Some(raw) => raw.parse::<PresenceStatus>().map_err(|err| format!("{err}"))?,
            None => PresenceStatus::Present,
        };

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

        Ok(EvaluationInput {
            metier,
            availability,
            presence,
            face_to_face: Some(face_to_face)
                .filter(|scores| *scores != FaceToFaceScores::default()),
            simulation: Some(simulation)
                .filter(|scores| *scores != SimulationScores::default()),
            technical: Some(technical).filter(|scores| !scores.is_empty()),
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
