use std::collections::HashMap;
use std::sync::Arc;

use axum::body::to_bytes;
use axum::response::Response;
use serde_json::Value;

use crate::catalog::InMemoryCardCatalog;
use crate::merchant::{MccDirectory, TableMerchantResolver};
use crate::rewards::{optimizer_router, AdvisoryPredictor, Card, RewardOptimizer, SpendVector};

pub(super) type TestOptimizer = RewardOptimizer<InMemoryCardCatalog, TableMerchantResolver>;

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

pub(super) fn dining_card() -> Card {
    Card::new("Dining Rewards")
        .issued_by("Acme Bank")
        .with_base_reward(0.01)
        .with_category_reward("Dining", 0.03)
}

pub(super) fn capped_dining_card() -> Card {
    dining_card().with_category_cap("Dining", 200.0)
}

pub(super) fn grocery_card() -> Card {
    Card::new("Grocery Cash")
        .issued_by("Harbor Credit Union")
        .with_base_reward(0.01)
        .with_category_reward("Groceries", 0.06)
        .with_category_cap("Groceries", 500.0)
        .with_category_reward("Gas", 0.03)
        .with_annual_fee(95.0)
        .with_signup_bonus(250.0, 3000.0)
}

pub(super) fn flat_card() -> Card {
    Card::new("Flat Two Percent")
        .issued_by("Summit Bank")
        .with_base_reward(0.02)
}

pub(super) fn travel_card() -> Card {
    Card::new("Travel Elite")
        .issued_by("Meridian")
        .with_base_reward(0.01)
        .with_category_reward("Travel", 0.05)
        .with_category_reward("Dining", 0.03)
        .with_annual_fee(250.0)
        .with_signup_bonus(750.0, 4000.0)
}

pub(super) fn sample_catalog() -> Vec<Card> {
    vec![dining_card(), grocery_card(), flat_card(), travel_card()]
}

pub(super) fn household_spend() -> SpendVector {
    SpendVector::new()
        .with("groceries", 600.0)
        .with("dining", 250.0)
        .with("gas", 150.0)
        .with("travel", 0.0)
}

pub(super) struct FixedPredictor(pub(super) Option<&'static str>);

impl AdvisoryPredictor for FixedPredictor {
    fn predict(&self, _category: &str, _amount: f64) -> Option<String> {
        self.0.map(str::to_string)
    }
}

#[derive(Default)]
pub(super) struct StaticMccDirectory {
    pub(super) entries: HashMap<String, Value>,
}

impl MccDirectory for StaticMccDirectory {
    async fn describe(&self, mcc_code: &str) -> Option<Value> {
        self.entries.get(mcc_code).cloned()
    }
}

pub(super) fn build_optimizer(cards: Vec<Card>) -> TestOptimizer {
    RewardOptimizer::new(
        Arc::new(InMemoryCardCatalog::new(cards)),
        Arc::new(TableMerchantResolver::default()),
    )
}

pub(super) fn build_router(optimizer: TestOptimizer) -> axum::Router {
    let mut entries = HashMap::new();
    entries.insert(
        "5812".to_string(),
        serde_json::json!({ "mcc": "5812", "edited_description": "Restaurants" }),
    );
    optimizer_router(Arc::new(optimizer), Arc::new(StaticMccDirectory { entries }))
}

pub(super) async fn read_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("valid json")
}
