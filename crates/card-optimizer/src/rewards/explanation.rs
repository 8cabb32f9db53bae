use super::domain::{RankedCard, SpendVector};

/// Render the justification for recommending `best` to a spender with `spend`.
pub fn explain(best: &RankedCard, spend: &SpendVector) -> String {
    let rewards = &best.rewards;
    let mut parts = vec![format!(
        "{} is optimal for your ${:.2}/month spending profile because:",
        best.card_name,
        spend.total()
    )];

    if !best.category_strengths.is_empty() {
        parts.push(format!(
            "- Strong rewards in {} categories",
            best.category_strengths.join(", ")
        ));
    }

    parts.push(format!(
        "- Estimated ${:.2}/month (${:.2}/year) in rewards",
        rewards.monthly_rewards, rewards.annual_rewards
    ));

    if rewards.annual_fee > 0.0 {
        parts.push(format!(
            "- After ${:.2} annual fee: ${:.2}/year net",
            rewards.annual_fee, rewards.net_annual_rewards
        ));
    } else {
        parts.push("- No annual fee".to_string());
    }

    let bonus = best.signup_bonus.earned_value();
    if bonus > 0.0 {
        parts.push(format!(
            "- Eligible for ${:.2} signup bonus (first year value: ${:.2})",
            bonus, best.first_year_value
        ));
    }

    parts.join(" ")
}
