use super::common::*;
use crate::rewards::{
    evaluate_all, optimize, Card, MerchantResolution, ResolutionSource, RewardError,
    AGREEMENT_CONFIDENCE, DEFAULT_BASE_CONFIDENCE, OVERRIDE_CONFIDENCE,
};

fn dining_merchant() -> MerchantResolution {
    MerchantResolution {
        merchant: "Chipotle".to_string(),
        category: "Dining".to_string(),
        mcc_code: Some("5812".to_string()),
        source: ResolutionSource::FallbackMapping,
    }
}

#[test]
fn evaluate_all_uses_straight_rates_best_first() {
    let evaluations = evaluate_all(&sample_catalog(), "Groceries", 100.0);

    assert_eq!(evaluations.len(), 4);
    assert_eq!(evaluations[0].card_name, "Grocery Cash");
    assert_eq!(evaluations[0].reward_amount, 6.0);
    assert_eq!(evaluations[0].reward_rate, 0.06);
    assert!(evaluations
        .iter()
        .skip(1)
        .all(|evaluation| evaluations[0].reward_amount >= evaluation.reward_amount));
}

#[test]
fn evaluate_all_ignores_category_caps() {
    let evaluations = evaluate_all(&[grocery_card()], "Groceries", 1_000.0);

    assert_eq!(evaluations[0].reward_amount, 60.0);
}

#[test]
fn evaluate_all_keeps_catalog_order_on_ties() {
    let cards = vec![
        Card::new("Alpha").with_base_reward(0.02),
        Card::new("Bravo").with_base_reward(0.01),
        Card::new("Charlie").with_base_reward(0.02),
    ];

    let evaluations = evaluate_all(&cards, "Other", 50.0);

    let names: Vec<&str> = evaluations
        .iter()
        .map(|evaluation| evaluation.card_name.as_str())
        .collect();
    assert_eq!(names, vec!["Alpha", "Charlie", "Bravo"]);
}

#[test]
fn evaluate_all_on_empty_catalog_is_empty() {
    assert!(evaluate_all(&[], "Dining", 20.0).is_empty());
}

#[test]
fn rule_engine_recommendation_uses_base_confidence() {
    let recommendation = optimize(
        &sample_catalog(),
        &dining_merchant(),
        80.0,
        None,
        DEFAULT_BASE_CONFIDENCE,
    )
    .expect("recommendation produced");

    assert_eq!(recommendation.best_card, "Dining Rewards");
    assert_eq!(recommendation.reward_value, 2.4);
    assert_eq!(recommendation.merchant_category, "Dining");
    assert_eq!(recommendation.mcc_code.as_deref(), Some("5812"));
    assert_eq!(recommendation.confidence, DEFAULT_BASE_CONFIDENCE);
    assert_eq!(
        recommendation.explanation,
        "Rule engine recommends Dining Rewards for Dining purchases"
    );
}

#[test]
fn alternatives_exclude_winner_and_keep_evaluation_order() {
    let recommendation = optimize(&sample_catalog(), &dining_merchant(), 80.0, None, 0.85)
        .expect("recommendation produced");

    let names: Vec<&str> = recommendation
        .alternatives_ranked
        .iter()
        .map(|alternative| alternative.card_name.as_str())
        .collect();
    assert_eq!(names, vec!["Travel Elite", "Flat Two Percent", "Grocery Cash"]);
}

#[test]
fn agreeing_prediction_raises_confidence() {
    let recommendation = optimize(
        &sample_catalog(),
        &dining_merchant(),
        80.0,
        Some("Dining Rewards"),
        0.85,
    )
    .expect("recommendation produced");

    assert_eq!(recommendation.best_card, "Dining Rewards");
    assert_eq!(recommendation.confidence, AGREEMENT_CONFIDENCE);
    assert!(recommendation.explanation.contains("both recommend"));
}

#[test]
fn disagreeing_prediction_overrides_with_lower_confidence() {
    let recommendation = optimize(
        &sample_catalog(),
        &dining_merchant(),
        80.0,
        Some("Grocery Cash"),
        0.85,
    )
    .expect("recommendation produced");

    assert_eq!(recommendation.best_card, "Grocery Cash");
    assert_eq!(recommendation.reward_value, 0.8);
    assert_eq!(recommendation.confidence, OVERRIDE_CONFIDENCE);
    assert!(recommendation.explanation.contains("rule engine recommends Dining Rewards"));
    let alternatives: Vec<&str> = recommendation
        .alternatives_ranked
        .iter()
        .map(|alternative| alternative.card_name.as_str())
        .collect();
    assert_eq!(
        alternatives,
        vec!["Dining Rewards", "Travel Elite", "Flat Two Percent"]
    );
}

#[test]
fn unknown_prediction_falls_back_to_rule_engine() {
    let recommendation = optimize(
        &sample_catalog(),
        &dining_merchant(),
        80.0,
        Some("Imaginary Card"),
        0.6,
    )
    .expect("recommendation produced");

    assert_eq!(recommendation.best_card, "Dining Rewards");
    assert_eq!(recommendation.confidence, 0.6);
}

#[test]
fn empty_catalog_is_unavailable() {
    let err = optimize(&[], &dining_merchant(), 80.0, Some("Dining Rewards"), 0.85)
        .expect_err("empty catalog rejected");

    assert_eq!(err, RewardError::Unavailable);
}

#[test]
fn empty_catalog_is_reported_before_amount_checks() {
    for amount in [0.0, -10.0] {
        let err = optimize(&[], &dining_merchant(), amount, None, 0.85)
            .expect_err("empty catalog rejected");
        assert_eq!(err, RewardError::Unavailable);
    }
}

#[test]
fn zero_amount_still_recommends_a_card() {
    let recommendation = optimize(&sample_catalog(), &dining_merchant(), 0.0, None, 0.85)
        .expect("recommendation produced");

    assert_eq!(recommendation.best_card, "Dining Rewards");
    assert_eq!(recommendation.reward_value, 0.0);
    assert_eq!(recommendation.alternatives_ranked.len(), 3);
}

#[test]
fn negative_or_non_finite_amount_is_invalid_input() {
    for amount in [-10.0, f64::NAN, f64::INFINITY] {
        let err = optimize(&sample_catalog(), &dining_merchant(), amount, None, 0.85)
            .expect_err("amount rejected");
        assert!(matches!(err, RewardError::InvalidInput(_)));
    }
}

#[test]
fn unresolved_merchant_is_rated_as_other() {
    let recommendation = optimize(
        &sample_catalog(),
        &MerchantResolution::unresolved("Corner Bakery"),
        40.0,
        None,
        0.85,
    )
    .expect("recommendation produced");

    assert_eq!(recommendation.merchant_category, "Other");
    assert_eq!(recommendation.best_card, "Flat Two Percent");
    assert!(recommendation.mcc_code.is_none());
}
