use crate::cli::ServeArgs;
use crate::infra::{decision_engine, AppState, InMemoryCandidateRepository};
use crate::routes::with_evaluation_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use recrutement::config::AppConfig;
use recrutement::error::AppError;
use recrutement::evaluation::CandidateEvaluationService;
use recrutement::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let engine = Arc::new(decision_engine(&config)?);
    if let Some(dictation) = config.policy.dictation_threshold {
        info!(dictation, "dictation threshold overridden");
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        engine: engine.clone(),
    };

    let repository = Arc::new(InMemoryCandidateRepository::default());
    let service = Arc::new(CandidateEvaluationService::new(repository, engine));

    let app = with_evaluation_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "recruitment decision service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
