use crate::cli::ServeArgs;
use crate::infra::{build_mcc_directory, build_optimizer, AppState};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use card_optimizer::config::AppConfig;
use card_optimizer::error::AppError;
use card_optimizer::telemetry;
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

    let optimizer = Arc::new(build_optimizer(&config)?);
    let mcc = Arc::new(build_mcc_directory(&config)?);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        model_loaded: optimizer.model_loaded(),
    };

    let app = with_service_routes(optimizer, mcc)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        cards = %config.data.cards_path.display(),
        "card optimizer ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
