use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use super::domain::{
    Card, CardEvaluation, CardRecommendationView, RankedCard, Recommendation, RewardError,
    SpendVector,
};
use super::explanation::explain;
use super::ports::{AdvisoryPredictor, CardCatalog, MerchantResolution, MerchantResolver};
use super::ranking::rank;
use super::transaction::{evaluate_all, optimize, DEFAULT_BASE_CONFIDENCE};
use crate::catalog::CatalogError;

/// Service composing the card catalog, merchant resolver, and reward core.
///
/// The catalog is re-read on every call so each computation sees one snapshot.
pub struct RewardOptimizer<C, M> {
    catalog: Arc<C>,
    resolver: Arc<M>,
    predictor: Option<Arc<dyn AdvisoryPredictor>>,
    base_confidence: f64,
}

impl<C, M> RewardOptimizer<C, M>
where
    C: CardCatalog + 'static,
    M: MerchantResolver + 'static,
{
    pub fn new(catalog: Arc<C>, resolver: Arc<M>) -> Self {
        Self {
            catalog,
            resolver,
            predictor: None,
            base_confidence: DEFAULT_BASE_CONFIDENCE,
        }
    }

    pub fn with_predictor(mut self, predictor: Arc<dyn AdvisoryPredictor>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn with_base_confidence(mut self, confidence: f64) -> Self {
        self.base_confidence = confidence;
        self
    }

    pub fn model_loaded(&self) -> bool {
        self.predictor
            .as_ref()
            .map(|predictor| predictor.is_loaded())
            .unwrap_or(false)
    }

    pub fn cards(&self) -> Result<Vec<Card>, OptimizerServiceError> {
        Ok(self.catalog.cards()?)
    }

    pub fn resolve(&self, merchant: &str) -> MerchantResolution {
        self.resolver.resolve(merchant)
    }

    /// Rank the catalog for a monthly spend vector and explain the winner.
    pub fn recommend_for_spend(
        &self,
        spend: &SpendVector,
    ) -> Result<SpendRecommendation, OptimizerServiceError> {
        let cards = self.catalog.cards()?;
        let ranked = rank(&cards, spend)?;
        let explanation = explain(&ranked[0], spend);

        Ok(SpendRecommendation {
            total_monthly_spend: spend.total(),
            ranked,
            explanation,
        })
    }

    /// Straight-rate comparison of every card for one purchase in `category`.
    pub fn compare(
        &self,
        category: &str,
        amount: f64,
    ) -> Result<Vec<CardEvaluation>, OptimizerServiceError> {
        let cards = self.catalog.cards()?;
        if cards.is_empty() {
            return Err(RewardError::Unavailable.into());
        }
        if !amount.is_finite() || amount < 0.0 {
            return Err(RewardError::InvalidInput(format!(
                "purchase amount must be a non-negative number, got {amount}"
            ))
            .into());
        }
        Ok(evaluate_all(&cards, category, amount))
    }

    /// Recommend a card for one purchase given an explicit advisory prediction.
    pub fn optimize(
        &self,
        merchant: &str,
        amount: f64,
        advisory_prediction: Option<&str>,
        base_confidence: Option<f64>,
    ) -> Result<Recommendation, OptimizerServiceError> {
        let resolution = self.resolver.resolve(merchant);
        self.optimize_resolved(
            &resolution,
            amount,
            advisory_prediction,
            base_confidence.unwrap_or(self.base_confidence),
        )
    }

    /// Recommend a card for one purchase, consulting the configured predictor.
    pub fn recommend(
        &self,
        merchant: &str,
        amount: f64,
    ) -> Result<Recommendation, OptimizerServiceError> {
        let resolution = self.resolver.resolve(merchant);
        let prediction = self
            .predictor
            .as_ref()
            .filter(|predictor| predictor.is_loaded())
            .and_then(|predictor| predictor.predict(&resolution.category, amount));

        if let Some(predicted) = prediction.as_deref() {
            debug!(predicted, category = %resolution.category, "advisory prediction received");
        }

        self.optimize_resolved(
            &resolution,
            amount,
            prediction.as_deref(),
            self.base_confidence,
        )
    }

    fn optimize_resolved(
        &self,
        resolution: &MerchantResolution,
        amount: f64,
        advisory_prediction: Option<&str>,
        base_confidence: f64,
    ) -> Result<Recommendation, OptimizerServiceError> {
        let cards = self.catalog.cards()?;
        if cards.is_empty() {
            warn!(merchant = %resolution.merchant, "no cards available for recommendation");
        }
        Ok(optimize(
            &cards,
            resolution,
            amount,
            advisory_prediction,
            base_confidence,
        )?)
    }
}

/// Ranked catalog plus the explanation for its top card. Never empty.
#[derive(Debug, Clone)]
pub struct SpendRecommendation {
    ranked: Vec<RankedCard>,
    total_monthly_spend: f64,
    explanation: String,
}

impl SpendRecommendation {
    pub fn best(&self) -> &RankedCard {
        &self.ranked[0]
    }

    pub fn ranked(&self) -> &[RankedCard] {
        &self.ranked
    }

    pub fn total_monthly_spend(&self) -> f64 {
        self.total_monthly_spend
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn view(&self) -> SpendRecommendationView {
        let recommendations: Vec<CardRecommendationView> =
            self.ranked.iter().map(RankedCard::view).collect();
        SpendRecommendationView {
            best_card: recommendations[0].clone(),
            recommendations,
            total_monthly_spend: self.total_monthly_spend,
            explanation: self.explanation.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SpendRecommendationView {
    pub recommendations: Vec<CardRecommendationView>,
    pub total_monthly_spend: f64,
    pub best_card: CardRecommendationView,
    pub explanation: String,
}

/// Error raised by the reward optimizer service.
#[derive(Debug, thiserror::Error)]
pub enum OptimizerServiceError {
    #[error(transparent)]
    Reward(#[from] RewardError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
