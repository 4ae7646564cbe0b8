use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for registered candidates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub String);

/// Identifier of the jury member who produced a submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JuryMemberId(pub String);

/// Job roles ("métiers") a campaign recruits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Metier {
    CallCenter,
    Agences,
    BoReclam,
    Televente,
    ReseauxSociaux,
    Supervision,
    BotCognitiveTrainer,
    SmcFixe,
    SmcMobile,
}

impl Metier {
    pub const COUNT: usize = 9;

    pub const ALL: [Metier; Metier::COUNT] = [
        Metier::CallCenter,
        Metier::Agences,
        Metier::BoReclam,
        Metier::Televente,
        Metier::ReseauxSociaux,
        Metier::Supervision,
        Metier::BotCognitiveTrainer,
        Metier::SmcFixe,
        Metier::SmcMobile,
    ];

    /// Position of the métier in [`Metier::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Metier::CallCenter => 0,
            Metier::Agences => 1,
            Metier::BoReclam => 2,
            Metier::Televente => 3,
            Metier::ReseauxSociaux => 4,
            Metier::Supervision => 5,
            Metier::BotCognitiveTrainer => 6,
            Metier::SmcFixe => 7,
            Metier::SmcMobile => 8,
        }
    }

    /// Wire code, identical to the serde representation.
    pub const fn code(self) -> &'static str {
        match self {
            Metier::CallCenter => "CALL_CENTER",
            Metier::Agences => "AGENCES",
            Metier::BoReclam => "BO_RECLAM",
            Metier::Televente => "TELEVENTE",
            Metier::ReseauxSociaux => "RESEAUX_SOCIAUX",
            Metier::Supervision => "SUPERVISION",
            Metier::BotCognitiveTrainer => "BOT_COGNITIVE_TRAINER",
            Metier::SmcFixe => "SMC_FIXE",
            Metier::SmcMobile => "SMC_MOBILE",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Metier::CallCenter => "Call center",
            Metier::Agences => "Agences",
            Metier::BoReclam => "Back-office réclamations",
            Metier::Televente => "Télévente",
            Metier::ReseauxSociaux => "Réseaux sociaux",
            Metier::Supervision => "Supervision",
            Metier::BotCognitiveTrainer => "Bot cognitive trainer",
            Metier::SmcFixe => "SMC fixe",
            Metier::SmcMobile => "SMC mobile",
        }
    }
}

impl fmt::Display for Metier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown métier: {0}")]
pub struct UnknownMetier(pub String);

impl FromStr for Metier {
    type Err = UnknownMetier;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_uppercase().replace(&['-', ' '][..], "_");
        Metier::ALL
            .into_iter()
            .find(|metier| metier.code() == normalized)
            .ok_or_else(|| UnknownMetier(value.to_string()))
    }
}

/// Raised when a status flag cannot be parsed from text input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field} value: {value}")]
pub struct InvalidStatus {
    pub field: &'static str,
    pub value: String,
}

/// Whether the candidate declared themselves available for the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Availability {
    Oui,
    Non,
}

impl Default for Availability {
    fn default() -> Self {
        Self::Oui
    }
}

impl FromStr for Availability {
    type Err = InvalidStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "oui" | "yes" | "true" => Ok(Self::Oui),
            "non" | "no" | "false" => Ok(Self::Non),
            _ => Err(InvalidStatus {
                field: "availability",
                value: value.to_string(),
            }),
        }
    }
}

/// Attendance on the evaluation day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PresenceStatus {
    Present,
    Absent,
}

impl Default for PresenceStatus {
    fn default() -> Self {
        Self::Present
    }
}

impl FromStr for PresenceStatus {
    type Err = InvalidStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "present" | "présent" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            _ => Err(InvalidStatus {
                field: "presence",
                value: value.to_string(),
            }),
        }
    }
}

/// Every individually thresholded score the engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    VoiceQuality,
    VerbalCommunication,
    PresentationVisuelle,
    AppetenceDigitale,
    SensNegociation,
    CapacitePersuasion,
    SensCombativite,
    TypingSpeed,
    TypingAccuracy,
    ExcelTest,
    Dictation,
    PsychoRaisonnementLogique,
    PsychoAttentionConcentration,
    AnalysisExercise,
}

impl Criterion {
    pub const fn name(self) -> &'static str {
        match self {
            Criterion::VoiceQuality => "voice_quality",
            Criterion::VerbalCommunication => "verbal_communication",
            Criterion::PresentationVisuelle => "presentation_visuelle",
            Criterion::AppetenceDigitale => "appetence_digitale",
            Criterion::SensNegociation => "sens_negociation",
            Criterion::CapacitePersuasion => "capacite_persuasion",
            Criterion::SensCombativite => "sens_combativite",
            Criterion::TypingSpeed => "typing_speed",
            Criterion::TypingAccuracy => "typing_accuracy",
            Criterion::ExcelTest => "excel_test",
            Criterion::Dictation => "dictation",
            Criterion::PsychoRaisonnementLogique => "psycho_raisonnement_logique",
            Criterion::PsychoAttentionConcentration => "psycho_attention_concentration",
            Criterion::AnalysisExercise => "analysis_exercise",
        }
    }

    /// Upper bound of the scale the criterion is scored on.
    pub const fn max_score(self) -> f64 {
        match self {
            Criterion::TypingSpeed => 200.0,
            Criterion::TypingAccuracy => 100.0,
            Criterion::Dictation => 20.0,
            Criterion::AnalysisExercise => 10.0,
            _ => 5.0,
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One jury member's face-to-face (phase 1) grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceToFaceSubmission {
    pub jury_member: JuryMemberId,
    pub voice_quality: f64,
    pub verbal_communication: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presentation_visuelle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appetence_digitale: Option<f64>,
    pub evaluated_at: DateTime<Utc>,
}

/// One jury member's sales simulation (phase 2) grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSubmission {
    pub jury_member: JuryMemberId,
    pub sens_negociation: f64,
    pub capacite_persuasion: f64,
    pub sens_combativite: f64,
    pub evaluated_at: DateTime<Utc>,
}

/// Face-to-face criteria averaged across jury members.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceToFaceScores {
    #[serde(default)]
    pub voice_quality: Option<f64>,
    #[serde(default)]
    pub verbal_communication: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presentation_visuelle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appetence_digitale: Option<f64>,
}

impl From<&FaceToFaceSubmission> for FaceToFaceScores {
    fn from(submission: &FaceToFaceSubmission) -> Self {
        Self {
            voice_quality: Some(submission.voice_quality),
            verbal_communication: Some(submission.verbal_communication),
            presentation_visuelle: submission.presentation_visuelle,
            appetence_digitale: submission.appetence_digitale,
        }
    }
}

/// Simulation criteria averaged across jury members.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationScores {
    #[serde(default)]
    pub sens_negociation: Option<f64>,
    #[serde(default)]
    pub capacite_persuasion: Option<f64>,
    #[serde(default)]
    pub sens_combativite: Option<f64>,
}

impl From<&SimulationSubmission> for SimulationScores {
    fn from(submission: &SimulationSubmission) -> Self {
        Self {
            sens_negociation: Some(submission.sens_negociation),
            capacite_persuasion: Some(submission.capacite_persuasion),
            sens_combativite: Some(submission.sens_combativite),
        }
    }
}

/// Technical test results entered by workforce management, one value per test.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechnicalScores {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typing_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typing_accuracy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excel_test: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub psycho_raisonnement_logique: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub psycho_attention_concentration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_exercise: Option<f64>,
}

impl TechnicalScores {
    pub fn is_empty(&self) -> bool {
        self.entries().iter().all(|(_, value)| value.is_none())
    }

    /// Every score paired with the criterion it measures.
    pub fn entries(&self) -> [(Criterion, Option<f64>); 7] {
        [
            (Criterion::TypingSpeed, self.typing_speed),
            (Criterion::TypingAccuracy, self.typing_accuracy),
            (Criterion::ExcelTest, self.excel_test),
            (Criterion::Dictation, self.dictation),
            (
                Criterion::PsychoRaisonnementLogique,
                self.psycho_raisonnement_logique,
            ),
            (
                Criterion::PsychoAttentionConcentration,
                self.psycho_attention_concentration,
            ),
            (Criterion::AnalysisExercise, self.analysis_exercise),
        ]
    }

    /// Overlay the values present in `update`, keeping stored values elsewhere.
    pub fn merge(&mut self, update: &TechnicalScores) {
        fn overlay(slot: &mut Option<f64>, value: Option<f64>) {
            if value.is_some() {
                *slot = value;
            }
        }

        overlay(&mut self.typing_speed, update.typing_speed);
        overlay(&mut self.typing_accuracy, update.typing_accuracy);
        overlay(&mut self.excel_test, update.excel_test);
        overlay(&mut self.dictation, update.dictation);
        overlay(
            &mut self.psycho_raisonnement_logique,
            update.psycho_raisonnement_logique,
        );
        overlay(
            &mut self.psycho_attention_concentration,
            update.psycho_attention_concentration,
        );
        overlay(&mut self.analysis_exercise, update.analysis_exercise);
    }
}

/// Consistent snapshot of everything the engine needs for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationInput {
    pub metier: Metier,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default)]
    pub presence: PresenceStatus,
    #[serde(default)]
    pub face_to_face: Option<FaceToFaceScores>,
    #[serde(default)]
    pub simulation: Option<SimulationScores>,
    #[serde(default)]
    pub technical: Option<TechnicalScores>,
}

impl EvaluationInput {
    pub fn new(metier: Metier) -> Self {
        Self {
            metier,
            availability: Availability::Oui,
            presence: PresenceStatus::Present,
            face_to_face: None,
            simulation: None,
            technical: None,
        }
    }
}

/// Lifecycle of a candidate as tracked by the evaluation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CandidateStatus {
    Registered,
    InEvaluation,
    Recrute,
    NonRecrute,
    Absent,
}

impl CandidateStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CandidateStatus::Registered => "registered",
            CandidateStatus::InEvaluation => "in_evaluation",
            CandidateStatus::Recrute => "recrute",
            CandidateStatus::NonRecrute => "non_recrute",
            CandidateStatus::Absent => "absent",
        }
    }
}

/// Payload accepted when a candidate is registered for a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateIntake {
    pub full_name: String,
    pub metier: Metier,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default)]
    pub presence: PresenceStatus,
}
