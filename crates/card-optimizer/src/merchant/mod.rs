//! Merchant-name resolution to spending categories and MCC codes.

mod mapping;
mod mcc;
mod normalizer;

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::rewards::{MerchantResolution, MerchantResolver, ResolutionSource};

pub use mcc::{HttpMccDirectory, MccDirectory};
pub use normalizer::normalize_merchant_name;

#[derive(Debug, Clone, PartialEq, Eq)]
struct MerchantEntry {
    category: String,
    mcc_code: Option<String>,
}

/// Resolver backed by a local merchant table with a built-in fallback list.
#[derive(Debug, Clone, Default)]
pub struct TableMerchantResolver {
    local: HashMap<String, MerchantEntry>,
}

impl TableMerchantResolver {
    /// Load the local table; a missing file leaves only the fallback list.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, csv::Error> {
        let path = path.as_ref();
        if !path.exists() {
            warn!(path = %path.display(), "merchant table not found; using fallback mapping");
            return Ok(Self::default());
        }

        let file = File::open(path).map_err(csv::Error::from)?;
        let resolver = Self::from_reader(file)?;
        info!(path = %path.display(), merchants = resolver.local.len(), "loaded merchant table");
        Ok(resolver)
    }

    /// Read `merchant,category,mcc_code` rows. Names are keyed in normalized
    /// form; the first row for a merchant wins.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut local = HashMap::new();

        for record in csv_reader.deserialize::<MerchantRow>() {
            let row = record?;
            let key = normalize_merchant_name(&row.merchant).to_lowercase();
            if key.is_empty() {
                continue;
            }
            local.entry(key).or_insert_with(|| MerchantEntry {
                category: row
                    .category
                    .filter(|category| !category.is_empty())
                    .unwrap_or_else(|| MerchantResolution::UNRESOLVED_CATEGORY.to_string()),
                mcc_code: row.mcc_code.as_deref().and_then(pad_mcc),
            });
        }

        Ok(Self { local })
    }
}

impl MerchantResolver for TableMerchantResolver {
    fn resolve(&self, merchant: &str) -> MerchantResolution {
        let normalized = normalize_merchant_name(merchant);

        if let Some(entry) = self.local.get(&normalized.to_lowercase()) {
            return MerchantResolution {
                merchant: normalized,
                category: entry.category.clone(),
                mcc_code: entry.mcc_code.clone(),
                source: ResolutionSource::LocalCsv,
            };
        }

        if let Some((category, mcc_code)) = mapping::fallback_category(&normalized) {
            return MerchantResolution {
                merchant: normalized,
                category: category.to_string(),
                mcc_code: Some(mcc_code.to_string()),
                source: ResolutionSource::FallbackMapping,
            };
        }

        MerchantResolution::unresolved(normalized)
    }
}

#[derive(Debug, Deserialize)]
struct MerchantRow {
    merchant: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    mcc_code: Option<String>,
}

/// Left-pad a numeric MCC to four digits; `5812.0` style exports are accepted.
fn pad_mcc(raw: &str) -> Option<String> {
    let digits = raw.trim().trim_end_matches(".0");
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    Some(format!("{digits:0>4}"))
}
