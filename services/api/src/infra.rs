use metrics_exporter_prometheus::PrometheusHandle;
use recrutement::config::AppConfig;
use recrutement::error::AppError;
use recrutement::evaluation::{
    Availability, CandidateId, CandidateRecord, CandidateRepository, DecisionEngine, Metier,
    MetierCatalog, PresenceStatus, RepositoryError,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) engine: Arc<DecisionEngine>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCandidateRepository {
    records: Arc<Mutex<HashMap<CandidateId, CandidateRecord>>>,
}

impl CandidateRepository for InMemoryCandidateRepository {
    fn insert(&self, record: CandidateRecord) -> Result<CandidateRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.candidate_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.candidate_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: CandidateRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.candidate_id) {
            guard.insert(record.candidate_id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &CandidateId) -> Result<Option<CandidateRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self, metier: Option<Metier>) -> Result<Vec<CandidateRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<CandidateRecord> = guard
            .values()
            .filter(|record| metier.map_or(true, |metier| record.metier == metier))
            .cloned()
            .collect();
        records.sort_by(|a, b| a.candidate_id.0.cmp(&b.candidate_id.0));
        Ok(records)
    }
}

/// Engine over the standard catalog with the configured threshold overrides applied.
pub(crate) fn decision_engine(config: &AppConfig) -> Result<DecisionEngine, AppError> {
    let catalog = MetierCatalog::with_overrides(config.policy.overrides())?;
    Ok(DecisionEngine::new(catalog))
}

pub(crate) fn parse_metier(raw: &str) -> Result<Metier, String> {
    raw.parse::<Metier>().map_err(|err| err.to_string())
}

pub(crate) fn parse_availability(raw: &str) -> Result<Availability, String> {
    raw.parse::<Availability>().map_err(|err| err.to_string())
}

pub(crate) fn parse_presence(raw: &str) -> Result<PresenceStatus, String> {
    raw.parse::<PresenceStatus>().map_err(|err| err.to_string())
}
