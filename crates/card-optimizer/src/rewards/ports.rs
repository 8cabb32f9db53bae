use serde::{Deserialize, Serialize};

use super::domain::Card;
use crate::catalog::CatalogError;

/// Source of card records; the core receives a fresh snapshot per request.
pub trait CardCatalog: Send + Sync {
    fn cards(&self) -> Result<Vec<Card>, CatalogError>;
}

/// Maps a free-text merchant string to a spending category.
pub trait MerchantResolver: Send + Sync {
    fn resolve(&self, merchant: &str) -> MerchantResolution;
}

/// Optional classifier suggesting a card for a purchase.
///
/// Its output is advisory only: an unknown card name or `None` means no override.
pub trait AdvisoryPredictor: Send + Sync {
    fn predict(&self, category: &str, amount: f64) -> Option<String>;

    fn is_loaded(&self) -> bool {
        true
    }
}

/// Merchant resolution result handed to the single-transaction evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantResolution {
    pub merchant: String,
    pub category: String,
    pub mcc_code: Option<String>,
    pub source: ResolutionSource,
}

impl MerchantResolution {
    pub const UNRESOLVED_CATEGORY: &'static str = "Other";

    pub fn unresolved(merchant: impl Into<String>) -> Self {
        Self {
            merchant: merchant.into(),
            category: Self::UNRESOLVED_CATEGORY.to_string(),
            mcc_code: None,
            source: ResolutionSource::Default,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    LocalCsv,
    FallbackMapping,
    Default,
}

impl ResolutionSource {
    pub fn label(&self) -> &'static str {
        match self {
            ResolutionSource::LocalCsv => "local_csv",
            ResolutionSource::FallbackMapping => "fallback_mapping",
            ResolutionSource::Default => "default",
        }
    }
}
