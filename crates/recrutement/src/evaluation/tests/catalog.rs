use crate::evaluation::domain::{Criterion, Metier};
use crate::evaluation::engine::{CatalogError, MetierCatalog, ThresholdOverrides, Thresholds};

#[test]
fn catalog_holds_one_config_per_metier() {
    let catalog = MetierCatalog::standard();
    let metiers: Vec<Metier> = catalog.iter().map(|config| config.metier).collect();
    assert_eq!(metiers, Metier::ALL.to_vec());
    for metier in Metier::ALL {
        assert_eq!(catalog.config(metier).metier, metier);
    }
}

#[test]
fn standard_table_matches_campaign_rules() {
    let catalog = MetierCatalog::standard();

    let call_center = catalog.config(Metier::CallCenter);
    assert_eq!(
        call_center.technical_criteria(),
        vec![
            Criterion::TypingSpeed,
            Criterion::TypingAccuracy,
            Criterion::ExcelTest,
            Criterion::Dictation,
        ]
    );
    assert!(!call_center.requires_simulation());

    let agences = catalog.config(Metier::Agences);
    assert!(agences.requires_simulation());
    assert_eq!(agences.technical_criteria(), vec![Criterion::Dictation]);
    assert!(agences
        .face_to_face_criteria()
        .contains(&Criterion::PresentationVisuelle));

    for metier in [Metier::BoReclam, Metier::SmcFixe, Metier::SmcMobile] {
        let criteria = catalog.config(metier).technical_criteria();
        assert!(criteria.contains(&Criterion::PsychoRaisonnementLogique));
        assert!(criteria.contains(&Criterion::PsychoAttentionConcentration));
        assert!(criteria.contains(&Criterion::ExcelTest));
    }

    let televente = catalog.config(Metier::Televente);
    assert!(televente.requires_simulation());
    assert!(!televente.technical_criteria().contains(&Criterion::ExcelTest));

    let reseaux = catalog.config(Metier::ReseauxSociaux);
    assert!(reseaux
        .face_to_face_criteria()
        .contains(&Criterion::AppetenceDigitale));
    assert!(!reseaux.requires_simulation());

    for metier in [Metier::Supervision, Metier::BotCognitiveTrainer] {
        let config = catalog.config(metier);
        assert_eq!(
            config.technical_criteria(),
            vec![
                Criterion::ExcelTest,
                Criterion::Dictation,
                Criterion::AnalysisExercise,
            ]
        );
        assert_eq!(config.face_to_face_criteria().len(), 2);
    }
}

#[test]
fn every_metier_uses_standard_thresholds() {
    let catalog = MetierCatalog::standard();
    for config in catalog.iter() {
        assert_eq!(config.thresholds, Thresholds::STANDARD);
        assert_eq!(config.thresholds.minimum_for(Criterion::Dictation), 16.0);
        assert_eq!(config.thresholds.minimum_for(Criterion::TypingSpeed), 17.0);
        assert_eq!(config.thresholds.minimum_for(Criterion::TypingAccuracy), 85.0);
    }
    assert!(catalog.verify().is_ok());
}

#[test]
fn dictation_override_applies_to_every_metier() {
    let catalog = MetierCatalog::with_overrides(ThresholdOverrides {
        dictation: Some(14.0),
    })
    .expect("override within scale");

    for config in catalog.iter() {
        assert_eq!(config.thresholds.dictation, 14.0);
        assert_eq!(config.thresholds.excel, 3.0);
    }
}

#[test]
fn override_outside_scale_is_rejected() {
    let error = MetierCatalog::with_overrides(ThresholdOverrides {
        dictation: Some(25.0),
    })
    .expect_err("25 exceeds the dictation scale");

    match error {
        CatalogError::ThresholdOutOfScale {
            criterion, max, ..
        } => {
            assert_eq!(criterion, Criterion::Dictation);
            assert_eq!(max, 20.0);
        }
    }
}

#[test]
fn metier_codes_parse_leniently() {
    assert_eq!("call-center".parse::<Metier>(), Ok(Metier::CallCenter));
    assert_eq!(
        " bot cognitive trainer ".parse::<Metier>(),
        Ok(Metier::BotCognitiveTrainer)
    );
    assert_eq!("SMC_MOBILE".parse::<Metier>(), Ok(Metier::SmcMobile));
    let error = "PILOTE".parse::<Metier>().expect_err("unknown role");
    assert_eq!(error.to_string(), "unknown métier: PILOTE");
}
