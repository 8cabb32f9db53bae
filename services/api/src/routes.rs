use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use card_optimizer::merchant::MccDirectory;
use card_optimizer::rewards::{optimizer_router, CardCatalog, MerchantResolver, RewardOptimizer};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub(crate) struct ApiInfo {
    pub(crate) message: &'static str,
    pub(crate) version: &'static str,
    pub(crate) model_loaded: bool,
    pub(crate) endpoints: &'static [&'static str],
}

const ENDPOINTS: &[&str] = &[
    "/cards",
    "/recommend",
    "/merchant-info/:merchant_name",
    "/api/optimizer/cards",
    "/api/optimizer/recommend",
    "/api/credit/estimate",
    "/health",
    "/ready",
    "/metrics",
];

pub(crate) fn with_service_routes<C, M, D>(
    optimizer: Arc<RewardOptimizer<C, M>>,
    mcc: Arc<D>,
) -> axum::Router
where
    C: CardCatalog + 'static,
    M: MerchantResolver + 'static,
    D: MccDirectory + 'static,
{
    optimizer_router(optimizer, mcc)
        .route("/", axum::routing::get(api_info))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/favicon.ico", axum::routing::get(favicon))
}

pub(crate) async fn api_info(Extension(state): Extension<AppState>) -> Json<ApiInfo> {
    Json(ApiInfo {
        message: "Card Optimizer API",
        version: env!("CARGO_PKG_VERSION"),
        model_loaded: state.model_loaded,
        endpoints: ENDPOINTS,
    })
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}
