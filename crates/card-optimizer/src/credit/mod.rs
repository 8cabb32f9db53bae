//! Placeholder credit-score heuristic used for card eligibility hints.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const BASE_SCORE: u16 = 650;
const MAX_SCORE: u16 = 850;
const ESTIMATE_CONFIDENCE: f64 = 0.70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentHistory {
    Good,
    Fair,
    Poor,
}

impl FromStr for PaymentHistory {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "good" => Ok(Self::Good),
            "fair" => Ok(Self::Fair),
            "poor" => Ok(Self::Poor),
            other => Err(format!(
                "unknown payment history '{other}' (expected good, fair, or poor)"
            )),
        }
    }
}

/// Self-reported profile; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditProfile {
    #[serde(default)]
    pub income: Option<f64>,
    #[serde(default)]
    pub credit_history_years: Option<u32>,
    #[serde(default)]
    pub existing_cards: Option<u32>,
    #[serde(default)]
    pub payment_history: Option<PaymentHistory>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditTier {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl CreditTier {
    fn for_score(score: u16) -> Self {
        match score {
            750.. => Self::Excellent,
            700..=749 => Self::Good,
            650..=699 => Self::Fair,
            _ => Self::Poor,
        }
    }

    pub fn eligible_cards(&self) -> &'static str {
        match self {
            CreditTier::Excellent => "all",
            CreditTier::Good => "most",
            CreditTier::Fair => "some",
            CreditTier::Poor => "limited",
        }
    }
}

impl fmt::Display for CreditTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CreditTier::Excellent => "excellent",
            CreditTier::Good => "good",
            CreditTier::Fair => "fair",
            CreditTier::Poor => "poor",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditEstimate {
    pub estimated_score: u16,
    pub tier: CreditTier,
    pub eligible_cards: &'static str,
    pub confidence: f64,
    pub factors: CreditProfile,
}

pub fn estimate_score(profile: &CreditProfile) -> CreditEstimate {
    let mut score = BASE_SCORE;

    if profile.income.is_some_and(|income| income > 50_000.0) {
        score += 20;
    }
    if profile.credit_history_years.is_some_and(|years| years > 5) {
        score += 15;
    }
    score += match profile.payment_history {
        Some(PaymentHistory::Good) => 30,
        Some(PaymentHistory::Fair) => 10,
        Some(PaymentHistory::Poor) | None => 0,
    };

    let estimated_score = score.min(MAX_SCORE);
    let tier = CreditTier::for_score(estimated_score);

    CreditEstimate {
        estimated_score,
        tier,
        eligible_cards: tier.eligible_cards(),
        confidence: ESTIMATE_CONFIDENCE,
        factors: profile.clone(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityAdvice {
    Apply,
    ImproveScore,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardEligibility {
    pub card_name: String,
    pub eligible: bool,
    pub approval_probability: f64,
    pub estimated_score: u16,
    pub recommendation: EligibilityAdvice,
}

pub fn card_eligibility(card_name: &str, estimated_score: u16) -> CardEligibility {
    let (eligible, approval_probability) = match estimated_score {
        750.. => (true, 0.95),
        700..=749 => (true, 0.80),
        650..=699 => (true, 0.60),
        _ => (false, 0.30),
    };

    CardEligibility {
        card_name: card_name.to_string(),
        eligible,
        approval_probability,
        estimated_score,
        recommendation: if eligible {
            EligibilityAdvice::Apply
        } else {
            EligibilityAdvice::ImproveScore
        },
    }
}
