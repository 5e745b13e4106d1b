use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_incident_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use incident_ai::config::AppConfig;
use incident_ai::error::AppError;
use incident_ai::telemetry;
use incident_ai::workflows::incident::HeuristicAnalyzer;
use std::sync::atomic::{AtomicBool, Ordering};
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

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let analyzer = Arc::new(HeuristicAnalyzer::with_seed(
        config.assessment.question_seed,
    ));

    let app = with_incident_routes(analyzer)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        seeded = config.assessment.question_seed.is_some(),
        "incident assessment engine ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
