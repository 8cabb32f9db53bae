use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const DEFAULT_ISSUER: &str = "Unknown";
pub const DEFAULT_BASE_REWARD: f64 = 0.01;

/// Months over which a signup bonus spend requirement is assumed to be met.
pub const SIGNUP_WINDOW_MONTHS: f64 = 3.0;

/// Reward rules for a single card as published in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    #[serde(default = "default_issuer")]
    pub issuer: String,
    #[serde(default = "default_base_reward")]
    pub base_reward: f64,
    /// Elevated rates keyed by canonical category label (e.g. `Groceries`).
    #[serde(default)]
    pub category_rewards: BTreeMap<String, f64>,
    /// Monthly spend eligible for the elevated rate, keyed like `category_rewards`.
    #[serde(default)]
    pub category_caps: BTreeMap<String, f64>,
    #[serde(default)]
    pub annual_fee: f64,
    #[serde(default)]
    pub signup_bonus: f64,
    #[serde(default)]
    pub signup_bonus_spend_requirement: f64,
}

fn default_issuer() -> String {
    DEFAULT_ISSUER.to_string()
}

fn default_base_reward() -> f64 {
    DEFAULT_BASE_REWARD
}

impl Card {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            issuer: default_issuer(),
            base_reward: DEFAULT_BASE_REWARD,
            category_rewards: BTreeMap::new(),
            category_caps: BTreeMap::new(),
            annual_fee: 0.0,
            signup_bonus: 0.0,
            signup_bonus_spend_requirement: 0.0,
        }
    }

    pub fn issued_by(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn with_base_reward(mut self, rate: f64) -> Self {
        self.base_reward = rate;
        self
    }

    pub fn with_category_reward(mut self, category: impl Into<String>, rate: f64) -> Self {
        self.category_rewards.insert(category.into(), rate);
        self
    }

    pub fn with_category_cap(mut self, category: impl Into<String>, cap: f64) -> Self {
        self.category_caps.insert(category.into(), cap);
        self
    }

    pub fn with_annual_fee(mut self, fee: f64) -> Self {
        self.annual_fee = fee;
        self
    }

    pub fn with_signup_bonus(mut self, value: f64, spend_requirement: f64) -> Self {
        self.signup_bonus = value;
        self.signup_bonus_spend_requirement = spend_requirement;
        self
    }

    /// Rate applied to a purchase in `category`, ignoring caps.
    pub fn rate_for(&self, category: &str) -> f64 {
        self.category_rewards
            .get(category)
            .copied()
            .unwrap_or(self.base_reward)
    }
}

/// Monthly spend per category, kept in the order the caller supplied it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpendVector {
    entries: Vec<(String, f64)>,
}

impl SpendVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, category: impl Into<String>, amount: f64) -> Self {
        self.insert(category, amount);
        self
    }

    /// Set the amount for `category`; an existing key keeps its position.
    pub fn insert(&mut self, category: impl Into<String>, amount: f64) {
        let category = category.into();
        match self.entries.iter_mut().find(|(key, _)| *key == category) {
            Some(entry) => entry.1 = amount,
            None => self.entries.push((category, amount)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries
            .iter()
            .map(|(category, amount)| (category.as_str(), *amount))
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, amount)| amount).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check the ranking precondition and return the total monthly spend.
    pub fn validate(&self) -> Result<f64, RewardError> {
        if let Some((category, amount)) = self
            .iter()
            .find(|(_, amount)| !amount.is_finite() || *amount < 0.0)
        {
            return Err(RewardError::InvalidInput(format!(
                "spend for '{category}' must be a non-negative number, got {amount}"
            )));
        }

        let total = self.total();
        if !total.is_finite() {
            return Err(RewardError::InvalidInput(
                "total spend must be a finite number".to_string(),
            ));
        }
        if total <= 0.0 {
            return Err(RewardError::InvalidInput(
                "total spend must be greater than 0".to_string(),
            ));
        }
        Ok(total)
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for SpendVector {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut spend = SpendVector::new();
        for (category, amount) in iter {
            spend.insert(category, amount);
        }
        spend
    }
}

impl Serialize for SpendVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (category, amount) in &self.entries {
            map.serialize_entry(category, amount)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SpendVector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SpendVisitor;

        impl<'de> Visitor<'de> for SpendVisitor {
            type Value = SpendVector;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping spend categories to monthly amounts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut spend = SpendVector::new();
                while let Some((category, amount)) = access.next_entry::<String, f64>()? {
                    spend.insert(category, amount);
                }
                Ok(spend)
            }
        }

        deserializer.deserialize_map(SpendVisitor)
    }
}

/// Reward earned in one category of a spend vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryReward {
    pub category: String,
    pub reward_amount: f64,
    pub effective_rate: f64,
    pub spend_amount: f64,
}

/// Per-card reward totals for a spend vector. Currency fields are rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardBreakdown {
    pub categories: Vec<CategoryReward>,
    pub monthly_rewards: f64,
    pub annual_rewards: f64,
    pub net_annual_rewards: f64,
    pub annual_fee: f64,
    pub overall_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupBonusResult {
    pub value: f64,
    pub spend_requirement: f64,
    pub monthly_spend_requirement: f64,
    pub eligible: bool,
}

impl SignupBonusResult {
    /// Bonus counted toward first-year value: all or nothing.
    pub fn earned_value(&self) -> f64 {
        if self.eligible {
            self.value
        } else {
            0.0
        }
    }
}

/// Ranking output unit for the multi-category recommendation flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCard {
    pub card_name: String,
    pub issuer: String,
    pub rewards: RewardBreakdown,
    pub signup_bonus: SignupBonusResult,
    pub category_strengths: Vec<String>,
    pub first_year_value: f64,
}

impl RankedCard {
    pub fn view(&self) -> CardRecommendationView {
        CardRecommendationView {
            card_name: self.card_name.clone(),
            issuer: self.issuer.clone(),
            reward_rate: self.rewards.overall_rate,
            annual_fee: self.rewards.annual_fee,
            estimated_monthly_rewards: self.rewards.monthly_rewards,
            estimated_annual_rewards: self.rewards.annual_rewards,
            net_annual_rewards: self.rewards.net_annual_rewards,
            signup_bonus_value: self.signup_bonus.earned_value(),
            signup_bonus_eligible: self.signup_bonus.eligible,
            first_year_value: self.first_year_value,
            category_strengths: self.category_strengths.clone(),
            cashback_breakdown: self.rewards.categories.clone(),
        }
    }
}

/// Flattened representation of a ranked card for API responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardRecommendationView {
    pub card_name: String,
    pub issuer: String,
    pub reward_rate: f64,
    pub annual_fee: f64,
    pub estimated_monthly_rewards: f64,
    pub estimated_annual_rewards: f64,
    pub net_annual_rewards: f64,
    pub signup_bonus_value: f64,
    pub signup_bonus_eligible: bool,
    pub first_year_value: f64,
    pub category_strengths: Vec<String>,
    pub cashback_breakdown: Vec<CategoryReward>,
}

/// One card's straight-rate reward for a single purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardEvaluation {
    pub card_name: String,
    pub reward_amount: f64,
    pub reward_rate: f64,
}

/// Single-transaction recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub best_card: String,
    pub reward_value: f64,
    pub merchant_category: String,
    pub mcc_code: Option<String>,
    pub alternatives_ranked: Vec<CardEvaluation>,
    pub confidence: f64,
    pub explanation: String,
}

/// Precondition failures signalled by the reward core.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RewardError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unavailable: no cards available")]
    Unavailable,
}

pub(crate) fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
