use std::sync::Arc;

use card_optimizer::catalog::{parse_cards, InMemoryCardCatalog};
use card_optimizer::merchant::TableMerchantResolver;
use card_optimizer::rewards::{
    RewardError, RewardOptimizer, ResolutionSource, SpendVector, DEFAULT_BASE_CONFIDENCE,
};

fn bundled_optimizer() -> RewardOptimizer<InMemoryCardCatalog, TableMerchantResolver> {
    let cards = parse_cards(&include_bytes!("../../../data/credit_cards.csv")[..])
        .expect("bundled catalog parses");
    let merchant_table = include_bytes!("../../../data/merchant_categories.csv");
    let merchants = TableMerchantResolver::from_reader(&merchant_table[..])
        .expect("bundled merchant table parses");
    RewardOptimizer::new(
        Arc::new(InMemoryCardCatalog::new(cards)),
        Arc::new(merchants),
    )
}

fn commuter_spend() -> SpendVector {
    SpendVector::new()
        .with("groceries", 400.0)
        .with("dining", 200.0)
        .with("gas", 100.0)
        .with("online_shopping", 100.0)
}

#[test]
fn monthly_profile_ranks_bundled_catalog() {
    let optimizer = bundled_optimizer();

    let recommendation = optimizer
        .recommend_for_spend(&commuter_spend())
        .expect("recommendation produced");

    let ranking: Vec<(&str, f64)> = recommendation
        .ranked()
        .iter()
        .map(|card| (card.card_name.as_str(), card.first_year_value))
        .collect();
    assert_eq!(
        ranking,
        vec![
            ("Everyday Cash", 392.0),
            ("Rotating Quarterly", 392.0),
            ("Dining Rewards", 330.0),
            ("Grocery Plus", 265.0),
            ("Student Starter", 120.0),
            ("Travel Elite", -106.0),
        ]
    );
    assert_eq!(recommendation.total_monthly_spend(), 800.0);
    assert!(recommendation
        .explanation()
        .starts_with("Everyday Cash is optimal for your $800.00/month spending profile because:"));
    assert!(recommendation.explanation().contains("- No annual fee"));
    assert!(recommendation
        .explanation()
        .contains("- Eligible for $200.00 signup bonus (first year value: $392.00)"));
}

#[test]
fn local_merchant_table_drives_single_purchase() {
    let optimizer = bundled_optimizer();

    let recommendation = optimizer
        .recommend("Shell", 60.0)
        .expect("recommendation produced");

    assert_eq!(recommendation.merchant_category, "Gas");
    assert_eq!(recommendation.mcc_code.as_deref(), Some("5541"));
    assert_eq!(recommendation.best_card, "Rotating Quarterly");
    assert_eq!(recommendation.reward_value, 3.0);
    assert_eq!(recommendation.confidence, DEFAULT_BASE_CONFIDENCE);
    assert_eq!(recommendation.alternatives_ranked.len(), 5);
    assert_eq!(recommendation.alternatives_ranked[0].card_name, "Grocery Plus");
}

#[test]
fn apostrophes_in_merchant_names_still_match_locally() {
    let optimizer = bundled_optimizer();

    let resolution = optimizer.resolve("Trader Joe's");

    assert_eq!(resolution.category, "Groceries");
    assert_eq!(resolution.source, ResolutionSource::LocalCsv);
}

#[test]
fn invalid_inputs_surface_typed_errors() {
    let optimizer = bundled_optimizer();

    let negative = SpendVector::new().with("dining", -1.0).with("gas", 50.0);
    assert!(matches!(
        optimizer.recommend_for_spend(&negative),
        Err(card_optimizer::rewards::OptimizerServiceError::Reward(
            RewardError::InvalidInput(_)
        ))
    ));

    assert!(matches!(
        optimizer.recommend("Shell", -12.5),
        Err(card_optimizer::rewards::OptimizerServiceError::Reward(
            RewardError::InvalidInput(_)
        ))
    ));
}
