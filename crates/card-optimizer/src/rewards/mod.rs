//! Reward computation and card ranking.
//!
//! Everything below `service` is a pure function of a catalog snapshot and the
//! caller's spend data. The service and router wire in the collaborators
//! (catalog, merchant resolver, advisory predictor) at the edges.

pub mod calculator;
pub mod category;
pub mod domain;
pub mod explanation;
pub mod ports;
pub mod ranking;
pub mod router;
pub mod service;
pub mod transaction;

#[cfg(test)]
mod tests;

pub use calculator::{aggregate_rewards, evaluate_signup_bonus, reward_for_category};
pub use category::CategoryMap;
pub use domain::{
    Card, CardEvaluation, CardRecommendationView, CategoryReward, RankedCard, Recommendation,
    RewardBreakdown, RewardError, SignupBonusResult, SpendVector, DEFAULT_BASE_REWARD,
    DEFAULT_ISSUER, SIGNUP_WINDOW_MONTHS,
};
pub use explanation::explain;
pub use ports::{
    AdvisoryPredictor, CardCatalog, MerchantResolution, MerchantResolver, ResolutionSource,
};
pub use ranking::{category_strengths, rank};
pub use router::{optimizer_router, MerchantInfoResponse, TransactionRequest};
pub use service::{
    OptimizerServiceError, RewardOptimizer, SpendRecommendation, SpendRecommendationView,
};
pub use transaction::{
    evaluate_all, optimize, AGREEMENT_CONFIDENCE, DEFAULT_BASE_CONFIDENCE, OVERRIDE_CONFIDENCE,
};
