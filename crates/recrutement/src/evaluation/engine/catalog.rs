use serde::Serialize;

use super::super::domain::{Criterion, Metier};

/// Tests and optional face-to-face criteria a métier is evaluated on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RequiredTests {
    pub typing: bool,
    pub excel: bool,
    pub dictation: bool,
    pub simulation: bool,
    pub psychotechnical: bool,
    pub analysis_exercise: bool,
    pub presentation_visuelle: bool,
    pub appetence_digitale: bool,
}

/// Minimum passing score per test, each expressed on the scale of its criterion.
///
/// Every test carries a minimum whether or not a métier requires it, so a
/// required flag can never point at a missing threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    pub face_to_face: f64,
    pub simulation: f64,
    pub typing_speed: f64,
    pub typing_accuracy: f64,
    pub excel: f64,
    pub dictation: f64,
    pub psychotechnical: f64,
    pub analysis_exercise: f64,
}

impl Thresholds {
    pub const STANDARD: Thresholds = Thresholds {
        face_to_face: 3.0,
        simulation: 3.0,
        typing_speed: 17.0,
        typing_accuracy: 85.0,
        excel: 3.0,
        dictation: 16.0,
        psychotechnical: 3.0,
        analysis_exercise: 5.0,
    };

    pub fn minimum_for(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::VoiceQuality
            | Criterion::VerbalCommunication
            | Criterion::PresentationVisuelle
            | Criterion::AppetenceDigitale => self.face_to_face,
            Criterion::SensNegociation
            | Criterion::CapacitePersuasion
            | Criterion::SensCombativite => self.simulation,
            Criterion::TypingSpeed => self.typing_speed,
            Criterion::TypingAccuracy => self.typing_accuracy,
            Criterion::ExcelTest => self.excel,
            Criterion::Dictation => self.dictation,
            Criterion::PsychoRaisonnementLogique | Criterion::PsychoAttentionConcentration => {
                self.psychotechnical
            }
            Criterion::AnalysisExercise => self.analysis_exercise,
        }
    }

    fn entries(&self) -> [(Criterion, f64); 8] {
        [
            (Criterion::VoiceQuality, self.face_to_face),
            (Criterion::SensNegociation, self.simulation),
            (Criterion::TypingSpeed, self.typing_speed),
            (Criterion::TypingAccuracy, self.typing_accuracy),
            (Criterion::ExcelTest, self.excel),
            (Criterion::Dictation, self.dictation),
            (Criterion::PsychoRaisonnementLogique, self.psychotechnical),
            (Criterion::AnalysisExercise, self.analysis_exercise),
        ]
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Scoring rules applied to every candidate of one métier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetierConfig {
    pub metier: Metier,
    pub required: RequiredTests,
    pub thresholds: Thresholds,
}

impl MetierConfig {
    /// Canonical configuration for a métier.
    pub fn standard(metier: Metier) -> Self {
        let typing_excel_dictation = RequiredTests {
            typing: true,
            excel: true,
            dictation: true,
            ..RequiredTests::default()
        };

        let required = match metier {
            Metier::CallCenter => typing_excel_dictation,
            Metier::Agences => RequiredTests {
                dictation: true,
                simulation: true,
                presentation_visuelle: true,
                ..RequiredTests::default()
            },
            Metier::BoReclam | Metier::SmcFixe | Metier::SmcMobile => RequiredTests {
                psychotechnical: true,
                ..typing_excel_dictation
            },
            Metier::Televente => RequiredTests {
                typing: true,
                dictation: true,
                simulation: true,
                ..RequiredTests::default()
            },
            Metier::ReseauxSociaux => RequiredTests {
                typing: true,
                dictation: true,
                appetence_digitale: true,
                ..RequiredTests::default()
            },
            Metier::Supervision | Metier::BotCognitiveTrainer => RequiredTests {
                excel: true,
                dictation: true,
                analysis_exercise: true,
                ..RequiredTests::default()
            },
        };

        Self {
            metier,
            required,
            thresholds: Thresholds::STANDARD,
        }
    }

    pub fn requires_simulation(&self) -> bool {
        self.required.simulation
    }

    /// Face-to-face criteria the jury rates for this métier.
    pub fn face_to_face_criteria(&self) -> Vec<Criterion> {
        let mut criteria = vec![Criterion::VoiceQuality, Criterion::VerbalCommunication];
        if self.required.presentation_visuelle {
            criteria.push(Criterion::PresentationVisuelle);
        }
        if self.required.appetence_digitale {
            criteria.push(Criterion::AppetenceDigitale);
        }
        criteria
    }

    /// Technical scores that must be entered for this métier.
    pub fn technical_criteria(&self) -> Vec<Criterion> {
        let required = &self.required;
        let mut criteria = Vec::new();
        if required.typing {
            criteria.extend([Criterion::TypingSpeed, Criterion::TypingAccuracy]);
        }
        if required.excel {
            criteria.push(Criterion::ExcelTest);
        }
        if required.dictation {
            criteria.push(Criterion::Dictation);
        }
        if required.psychotechnical {
            criteria.extend([
                Criterion::PsychoRaisonnementLogique,
                Criterion::PsychoAttentionConcentration,
            ]);
        }
        if required.analysis_exercise {
            criteria.push(Criterion::AnalysisExercise);
        }
        criteria
    }

    fn verify(&self) -> Result<(), CatalogError> {
        for (criterion, value) in self.thresholds.entries() {
            let max = criterion.max_score();
            if !(0.0..=max).contains(&value) {
                return Err(CatalogError::ThresholdOutOfScale {
                    metier: self.metier,
                    criterion,
                    value,
                    max,
                });
            }
        }
        Ok(())
    }
}

/// Process-level adjustments applied once when the catalog is built.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThresholdOverrides {
    pub dictation: Option<f64>,
}

/// Raised when a catalog carries a threshold that cannot be met or is meaningless.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("{metier} threshold for {criterion} is {value}, outside its 0-{max} scale")]
    ThresholdOutOfScale {
        metier: Metier,
        criterion: Criterion,
        value: f64,
        max: f64,
    },
}

/// Immutable lookup table holding exactly one configuration per métier.
#[derive(Debug, Clone, PartialEq)]
pub struct MetierCatalog {
    configs: [MetierConfig; Metier::COUNT],
}

impl MetierCatalog {
    pub fn standard() -> Self {
        Self {
            configs: Metier::ALL.map(MetierConfig::standard),
        }
    }

    /// Standard table with the overrides applied, rejected if any threshold leaves its scale.
    pub fn with_overrides(overrides: ThresholdOverrides) -> Result<Self, CatalogError> {
        let mut catalog = Self::standard();
        if let Some(dictation) = overrides.dictation {
            for config in catalog.configs.iter_mut() {
                config.thresholds.dictation = dictation;
            }
        }
        catalog.verify()?;
        Ok(catalog)
    }

    pub fn config(&self, metier: Metier) -> &MetierConfig {
        &self.configs[metier.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetierConfig> {
        self.configs.iter()
    }

    pub fn verify(&self) -> Result<(), CatalogError> {
        self.configs.iter().try_for_each(MetierConfig::verify)
    }
}

impl Default for MetierCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
