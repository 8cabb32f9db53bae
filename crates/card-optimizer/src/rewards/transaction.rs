use tracing::debug;

use super::domain::{round_currency, Card, CardEvaluation, Recommendation, RewardError};
use super::ports::MerchantResolution;

/// Confidence when the advisory model and the rule engine pick the same card.
pub const AGREEMENT_CONFIDENCE: f64 = 0.95;
/// Confidence when the advisory model overrides the rule engine.
pub const OVERRIDE_CONFIDENCE: f64 = 0.75;
/// Confidence for rule-engine-only recommendations unless configured otherwise.
pub const DEFAULT_BASE_CONFIDENCE: f64 = 0.85;

/// Straight-rate reward of one purchase on every card, best first.
///
/// Caps are not applied: a lone purchase carries no month-to-date spend to
/// measure a cap against. Equal rewards keep catalog order.
pub fn evaluate_all(cards: &[Card], category: &str, amount: f64) -> Vec<CardEvaluation> {
    let mut evaluations: Vec<CardEvaluation> = cards
        .iter()
        .map(|card| {
            let reward_rate = card.rate_for(category);
            CardEvaluation {
                card_name: card.name.clone(),
                reward_amount: round_currency(amount * reward_rate),
                reward_rate,
            }
        })
        .collect();
    evaluations.sort_by(|a, b| b.reward_amount.total_cmp(&a.reward_amount));
    evaluations
}

/// Pick the card for a single purchase at a resolved merchant.
///
/// An empty catalog is `Unavailable` before the amount is checked.
/// An advisory prediction naming an evaluated card wins; otherwise the
/// rule engine's top card is used with `base_confidence`.
pub fn optimize(
    cards: &[Card],
    merchant: &MerchantResolution,
    amount: f64,
    advisory_prediction: Option<&str>,
    base_confidence: f64,
) -> Result<Recommendation, RewardError> {
    if cards.is_empty() {
        return Err(RewardError::Unavailable);
    }
    if !amount.is_finite() || amount < 0.0 {
        return Err(RewardError::InvalidInput(format!(
            "transaction amount must be a non-negative number, got {amount}"
        )));
    }

    let category = merchant.category.as_str();
    let mut evaluations = evaluate_all(cards, category, amount);
    let rule_best = evaluations
        .first()
        .map(|evaluation| evaluation.card_name.clone())
        .ok_or(RewardError::Unavailable)?;

    let advisory = advisory_prediction.and_then(|predicted| {
        evaluations
            .iter()
            .position(|evaluation| evaluation.card_name == predicted)
    });

    let (winner, confidence, explanation) = match advisory {
        Some(index) if evaluations[index].card_name == rule_best => (
            index,
            AGREEMENT_CONFIDENCE,
            format!(
                "Advisory model and rule engine both recommend {rule_best} for {category} purchases"
            ),
        ),
        Some(index) => (
            index,
            OVERRIDE_CONFIDENCE,
            format!(
                "Advisory model recommends {}, rule engine recommends {rule_best}. Using advisory prediction.",
                evaluations[index].card_name
            ),
        ),
        None => (
            0,
            base_confidence,
            format!("Rule engine recommends {rule_best} for {category} purchases"),
        ),
    };

    let best = evaluations.remove(winner);
    debug!(
        best = %best.card_name,
        category,
        amount,
        confidence,
        "optimized single transaction"
    );

    Ok(Recommendation {
        best_card: best.card_name,
        reward_value: best.reward_amount,
        merchant_category: merchant.category.clone(),
        mcc_code: merchant.mcc_code.clone(),
        alternatives_ranked: evaluations,
        confidence,
        explanation,
    })
}
