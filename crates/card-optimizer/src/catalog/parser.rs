use std::collections::BTreeMap;
use std::io::Read;

use serde::{Deserialize, Deserializer};
use tracing::warn;

use super::CatalogError;
use crate::rewards::{Card, DEFAULT_BASE_REWARD, DEFAULT_ISSUER};

pub fn parse_cards<R: Read>(reader: R) -> Result<Vec<Card>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut cards = Vec::new();

    for record in csv_reader.deserialize::<CardRow>() {
        let row = record?;
        cards.push(row.into_card()?);
    }

    Ok(cards)
}

#[derive(Debug, Deserialize)]
struct CardRow {
    card_name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    issuer: Option<String>,
    #[serde(default)]
    base_reward: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    category_rewards: Option<String>,
    #[serde(default)]
    annual_fee: Option<f64>,
    #[serde(default)]
    signup_bonus: Option<f64>,
    #[serde(default)]
    signup_bonus_spend_requirement: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    category_caps: Option<String>,
}

impl CardRow {
    fn into_card(self) -> Result<Card, CatalogError> {
        let name = self.card_name;
        if name.is_empty() {
            return Err(CatalogError::InvalidCard {
                card: name,
                field: "card_name",
                reason: "must not be empty".to_string(),
            });
        }

        let base_reward = non_negative(
            &name,
            "base_reward",
            self.base_reward.unwrap_or(DEFAULT_BASE_REWARD),
        )?;
        let annual_fee = non_negative(&name, "annual_fee", self.annual_fee.unwrap_or(0.0))?;
        let signup_bonus = non_negative(&name, "signup_bonus", self.signup_bonus.unwrap_or(0.0))?;
        let signup_bonus_spend_requirement = non_negative(
            &name,
            "signup_bonus_spend_requirement",
            self.signup_bonus_spend_requirement.unwrap_or(0.0),
        )?;
        let category_rewards =
            parse_rate_map(&name, "category_rewards", self.category_rewards.as_deref())?;
        let category_caps = parse_rate_map(&name, "category_caps", self.category_caps.as_deref())?;

        Ok(Card {
            issuer: self.issuer.unwrap_or_else(|| DEFAULT_ISSUER.to_string()),
            name,
            base_reward,
            category_rewards,
            category_caps,
            annual_fee,
            signup_bonus,
            signup_bonus_spend_requirement,
        })
    }
}

fn non_negative(card: &str, field: &'static str, value: f64) -> Result<f64, CatalogError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(CatalogError::InvalidCard {
            card: card.to_string(),
            field,
            reason: format!("expected a non-negative number, got {value}"),
        })
    }
}

/// Parse a `{'Dining': 0.03}` style cell. Malformed objects are logged and ignored.
fn parse_rate_map(
    card: &str,
    field: &'static str,
    raw: Option<&str>,
) -> Result<BTreeMap<String, f64>, CatalogError> {
    let Some(raw) = raw else {
        return Ok(BTreeMap::new());
    };

    let map = match serde_json::from_str::<BTreeMap<String, f64>>(&raw.replace('\'', "\"")) {
        Ok(map) => map,
        Err(err) => {
            warn!(card, field, %err, "ignoring malformed reward map");
            return Ok(BTreeMap::new());
        }
    };

    for (category, value) in &map {
        if !value.is_finite() || *value < 0.0 {
            return Err(CatalogError::InvalidCard {
                card: card.to_string(),
                field,
                reason: format!("'{category}' must be non-negative, got {value}"),
            });
        }
    }

    Ok(map)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "card_name,issuer,base_reward,category_rewards,annual_fee,signup_bonus,signup_bonus_spend_requirement,category_caps\n";

    #[test]
    fn parses_quoted_reward_maps() {
        let csv = format!(
            "{HEADER}Dining Plus,Acme Bank,0.01,\"{{'Dining': 0.03, 'Groceries': 0.02}}\",95,200,1500,\"{{'Groceries': 500}}\"\n"
        );

        let cards = parse_cards(csv.as_bytes()).expect("catalog parses");

        assert_eq!(cards.len(), 1);
        let card = &cards[0];
        assert_eq!(card.name, "Dining Plus");
        assert_eq!(card.issuer, "Acme Bank");
        assert_eq!(card.category_rewards.get("Dining"), Some(&0.03));
        assert_eq!(card.category_caps.get("Groceries"), Some(&500.0));
        assert_eq!(card.annual_fee, 95.0);
        assert_eq!(card.signup_bonus_spend_requirement, 1500.0);
    }

    #[test]
    fn empty_cells_take_defaults() {
        let csv = format!("{HEADER}Plain Card,,,,,,,\n");

        let cards = parse_cards(csv.as_bytes()).expect("catalog parses");

        let card = &cards[0];
        assert_eq!(card.issuer, DEFAULT_ISSUER);
        assert_eq!(card.base_reward, DEFAULT_BASE_REWARD);
        assert!(card.category_rewards.is_empty());
        assert_eq!(card.annual_fee, 0.0);
        assert_eq!(card.signup_bonus, 0.0);
    }

    #[test]
    fn malformed_reward_map_is_ignored() {
        let csv = format!("{HEADER}Broken Map,Acme,0.015,\"{{Dining: three}}\",0,0,0,\n");

        let cards = parse_cards(csv.as_bytes()).expect("catalog parses");

        assert!(cards[0].category_rewards.is_empty());
        assert_eq!(cards[0].base_reward, 0.015);
    }

    #[test]
    fn negative_fee_is_rejected() {
        let csv = format!("{HEADER}Bad Fee,Acme,0.01,,-5,0,0,\n");

        let err = parse_cards(csv.as_bytes()).expect_err("negative fee rejected");

        match err {
            CatalogError::InvalidCard { card, field, .. } => {
                assert_eq!(card, "Bad Fee");
                assert_eq!(field, "annual_fee");
            }
            other => panic!("expected invalid card, got {other:?}"),
        }
    }

    #[test]
    fn negative_category_rate_is_rejected() {
        let csv = format!("{HEADER}Bad Rate,Acme,0.01,\"{{'Gas': -0.02}}\",0,0,0,\n");

        let err = parse_cards(csv.as_bytes()).expect_err("negative rate rejected");

        assert!(matches!(
            err,
            CatalogError::InvalidCard {
                field: "category_rewards",
                ..
            }
        ));
    }
}
