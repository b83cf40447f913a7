use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySchedulingRepository};
use crate::routes::with_core_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use vc_brain::config::AppConfig;
use vc_brain::error::AppError;
use vc_brain::telemetry;
use vc_brain::workflows::scheduling::{AvailabilityResolver, HttpCalendarClient};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemorySchedulingRepository::default());
    let calendar = Arc::new(HttpCalendarClient::new(config.calendar.clone())?);
    let resolver = Arc::new(AvailabilityResolver::new(repository, calendar));

    let app = with_core_routes(resolver)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "vc brain core service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
