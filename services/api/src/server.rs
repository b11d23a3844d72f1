use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState, InMemorySnapshotRepository};
use crate::routes::with_diagnosis_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use bizdive::config::AppConfig;
use bizdive::diagnosis::DiagnosisService;
use bizdive::error::AppError;
use bizdive::telemetry;
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
    if let Some(catalog_path) = args.catalog.take() {
        config.catalog.seed_path = Some(catalog_path);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = load_catalog(&config.catalog)?;
    let repository = Arc::new(InMemorySnapshotRepository::default());
    let diagnosis_service = Arc::new(DiagnosisService::new(catalog, repository.clone()));

    let app = with_diagnosis_routes(diagnosis_service, repository)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "diagnosis service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
