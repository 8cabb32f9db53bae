use tracing::debug;

use super::calculator::{aggregate_rewards, evaluate_signup_bonus};
use super::domain::{round_currency, Card, RankedCard, RewardError, SpendVector};

const STRENGTH_COUNT: usize = 2;

/// Rank `cards` by first-year value for a monthly spend vector, best first.
///
/// Cards with equal value keep their catalog order.
pub fn rank(cards: &[Card], spend: &SpendVector) -> Result<Vec<RankedCard>, RewardError> {
    if cards.is_empty() {
        return Err(RewardError::Unavailable);
    }
    let total_monthly_spend = spend.validate()?;

    let mut ranked: Vec<RankedCard> = cards
        .iter()
        .map(|card| rank_card(card, spend, total_monthly_spend))
        .collect();
    ranked.sort_by(|a, b| b.first_year_value.total_cmp(&a.first_year_value));

    debug!(
        cards = ranked.len(),
        total_monthly_spend,
        best = %ranked[0].card_name,
        "ranked catalog for spend profile"
    );
    Ok(ranked)
}

fn rank_card(card: &Card, spend: &SpendVector, total_monthly_spend: f64) -> RankedCard {
    let rewards = aggregate_rewards(card, spend);
    let signup_bonus = evaluate_signup_bonus(card, total_monthly_spend);
    let first_year_value = round_currency(rewards.net_annual_rewards + signup_bonus.earned_value());

    RankedCard {
        card_name: card.name.clone(),
        issuer: card.issuer.clone(),
        rewards,
        signup_bonus,
        category_strengths: category_strengths(card),
        first_year_value,
    }
}

/// The card's two highest-rate categories, lower-cased; ties go alphabetically.
pub fn category_strengths(card: &Card) -> Vec<String> {
    let mut rates: Vec<(&String, f64)> = card
        .category_rewards
        .iter()
        .map(|(category, rate)| (category, *rate))
        .collect();
    // category_rewards iterates alphabetically, so a stable sort keeps ties ordered.
    rates.sort_by(|a, b| b.1.total_cmp(&a.1));
    rates
        .into_iter()
        .take(STRENGTH_COUNT)
        .map(|(category, _)| category.to_lowercase())
        .collect()
}
