use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::error;

use super::domain::SpendVector;
use super::ports::{CardCatalog, MerchantResolver};
use super::service::{OptimizerServiceError, RewardOptimizer};
use crate::credit::{estimate_score, CreditEstimate, CreditProfile};
use crate::error::AppError;
use crate::merchant::MccDirectory;

/// Shared handler state: the optimizer plus the MCC metadata lookup.
pub struct OptimizerRouterState<C, M, D> {
    optimizer: Arc<RewardOptimizer<C, M>>,
    mcc: Arc<D>,
}

impl<C, M, D> Clone for OptimizerRouterState<C, M, D> {
    fn clone(&self) -> Self {
        Self {
            optimizer: Arc::clone(&self.optimizer),
            mcc: Arc::clone(&self.mcc),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TransactionRequest {
    pub merchant: String,
    pub amount: f64,
}

#[derive(Debug, Serialize)]
pub struct MerchantInfoResponse {
    pub merchant: String,
    pub category: String,
    pub mcc_code: Option<String>,
    pub source: &'static str,
    pub mcc_details: Option<Value>,
}

/// Router builder exposing the recommendation endpoints.
pub fn optimizer_router<C, M, D>(optimizer: Arc<RewardOptimizer<C, M>>, mcc: Arc<D>) -> Router
where
    C: CardCatalog + 'static,
    M: MerchantResolver + 'static,
    D: MccDirectory + 'static,
{
    Router::new()
        .route("/cards", get(cards_handler::<C, M, D>))
        .route("/api/optimizer/cards", get(cards_handler::<C, M, D>))
        .route(
            "/api/optimizer/recommend",
            post(spend_recommendation_handler::<C, M, D>),
        )
        .route("/recommend", post(transaction_handler::<C, M, D>))
        .route(
            "/merchant-info/:merchant_name",
            get(merchant_info_handler::<C, M, D>),
        )
        .route("/api/credit/estimate", post(credit_estimate_handler))
        .with_state(OptimizerRouterState { optimizer, mcc })
}

pub(crate) async fn cards_handler<C, M, D>(
    State(state): State<OptimizerRouterState<C, M, D>>,
) -> Response
where
    C: CardCatalog + 'static,
    M: MerchantResolver + 'static,
    D: MccDirectory + 'static,
{
    match state.optimizer.cards() {
        Ok(cards) => {
            let count = cards.len();
            (
                StatusCode::OK,
                Json(json!({ "cards": cards, "count": count })),
            )
                .into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn spend_recommendation_handler<C, M, D>(
    State(state): State<OptimizerRouterState<C, M, D>>,
    Json(spend): Json<SpendVector>,
) -> Response
where
    C: CardCatalog + 'static,
    M: MerchantResolver + 'static,
    D: MccDirectory + 'static,
{
    match state.optimizer.recommend_for_spend(&spend) {
        Ok(recommendation) => (StatusCode::OK, Json(recommendation.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn transaction_handler<C, M, D>(
    State(state): State<OptimizerRouterState<C, M, D>>,
    Json(request): Json<TransactionRequest>,
) -> Response
where
    C: CardCatalog + 'static,
    M: MerchantResolver + 'static,
    D: MccDirectory + 'static,
{
    match state.optimizer.recommend(&request.merchant, request.amount) {
        Ok(recommendation) => (StatusCode::OK, Json(recommendation)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn merchant_info_handler<C, M, D>(
    State(state): State<OptimizerRouterState<C, M, D>>,
    Path(merchant_name): Path<String>,
) -> Json<MerchantInfoResponse>
where
    C: CardCatalog + 'static,
    M: MerchantResolver + 'static,
    D: MccDirectory + 'static,
{
    let resolution = state.optimizer.resolve(&merchant_name);
    let mcc_details = match resolution.mcc_code.as_deref() {
        Some(code) => state.mcc.describe(code).await,
        None => None,
    };

    Json(MerchantInfoResponse {
        merchant: merchant_name,
        category: resolution.category,
        mcc_code: resolution.mcc_code,
        source: resolution.source.label(),
        mcc_details,
    })
}

pub(crate) async fn credit_estimate_handler(
    Json(profile): Json<CreditProfile>,
) -> Json<CreditEstimate> {
    Json(estimate_score(&profile))
}

fn error_response(err: OptimizerServiceError) -> Response {
    if let OptimizerServiceError::Catalog(_) = &err {
        error!(%err, "card catalog failed to load");
    }
    AppError::from(err).into_response()
}
