use super::category::CategoryMap;
use super::domain::{
    round_currency, Card, CategoryReward, RewardBreakdown, SignupBonusResult, SpendVector,
    SIGNUP_WINDOW_MONTHS,
};

/// Reward and effective rate for `amount` spent in `category` on `card`.
///
/// Spend above a category cap earns the card's base rate. The effective rate
/// is the blended rate actually realized and is 0 when `amount` is 0.
pub fn reward_for_category(card: &Card, category: &str, amount: f64) -> (f64, f64) {
    let Some(&rate) = card.category_rewards.get(category) else {
        return (amount * card.base_reward, card.base_reward);
    };

    match card.category_caps.get(category) {
        Some(&cap) => {
            let capped_reward = amount.min(cap) * rate;
            let overflow_reward = (amount - cap).max(0.0) * card.base_reward;
            let total = capped_reward + overflow_reward;
            let effective_rate = if amount > 0.0 { total / amount } else { 0.0 };
            (total, effective_rate)
        }
        None => (amount * rate, rate),
    }
}

/// Monthly and annual rewards for `card` across every category with positive spend.
pub fn aggregate_rewards(card: &Card, spend: &SpendVector) -> RewardBreakdown {
    let mut monthly_rewards = 0.0;
    let mut breakdown = Vec::with_capacity(spend.len());

    for (category, amount) in spend_by_category(spend) {
        let (reward, effective_rate) = reward_for_category(card, &category, amount);
        monthly_rewards += reward;
        breakdown.push(CategoryReward {
            category,
            reward_amount: round_currency(reward),
            effective_rate,
            spend_amount: amount,
        });
    }

    let annual_rewards = monthly_rewards * 12.0;
    let net_annual_rewards = annual_rewards - card.annual_fee;
    let total_spend = spend.total();
    let overall_rate = if total_spend > 0.0 {
        monthly_rewards / total_spend
    } else {
        0.0
    };

    RewardBreakdown {
        categories: breakdown,
        monthly_rewards: round_currency(monthly_rewards),
        annual_rewards: round_currency(annual_rewards),
        net_annual_rewards: round_currency(net_annual_rewards),
        annual_fee: card.annual_fee,
        overall_rate,
    }
}

/// Positive spend summed per canonical category, in first-seen order.
///
/// Keys such as `dining` and `Dining` share one label and so share one cap.
fn spend_by_category(spend: &SpendVector) -> Vec<(String, f64)> {
    let categories = CategoryMap::standard();
    let mut merged: Vec<(String, f64)> = Vec::with_capacity(spend.len());

    for (key, amount) in spend.iter() {
        if amount <= 0.0 {
            continue;
        }
        let category = categories.canonical(key);
        match merged.iter_mut().find(|(label, _)| *label == category) {
            Some((_, total)) => *total += amount,
            None => merged.push((category, amount)),
        }
    }

    merged
}

/// Signup bonus eligibility, prorating the requirement over the bonus window.
///
/// A card without a spend requirement is never eligible through this path.
pub fn evaluate_signup_bonus(card: &Card, total_monthly_spend: f64) -> SignupBonusResult {
    let spend_requirement = card.signup_bonus_spend_requirement;
    let monthly_spend_requirement = spend_requirement / SIGNUP_WINDOW_MONTHS;
    let eligible =
        monthly_spend_requirement > 0.0 && total_monthly_spend >= monthly_spend_requirement;

    SignupBonusResult {
        value: card.signup_bonus,
        spend_requirement,
        monthly_spend_requirement,
        eligible,
    }
}
