//! Flat-file card catalog backing the reward engine.

mod parser;

use std::fs::File;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::rewards::{Card, CardCatalog};

pub use parser::parse_cards;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read card catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid card catalog CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("card '{card}' has invalid {field}: {reason}")]
    InvalidCard {
        card: String,
        field: &'static str,
        reason: String,
    },
}

/// Catalog read from a CSV file on every request.
#[derive(Debug, Clone)]
pub struct CsvCardCatalog {
    path: PathBuf,
}

impl CsvCardCatalog {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl CardCatalog for CsvCardCatalog {
    fn cards(&self) -> Result<Vec<Card>, CatalogError> {
        if !self.path.exists() {
            warn!(path = %self.path.display(), "card catalog not found");
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let cards = parse_cards(file)?;
        info!(path = %self.path.display(), count = cards.len(), "loaded card catalog");
        Ok(cards)
    }
}

/// Fixed catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCardCatalog {
    cards: Vec<Card>,
}

impl InMemoryCardCatalog {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }
}

impl CardCatalog for InMemoryCardCatalog {
    fn cards(&self) -> Result<Vec<Card>, CatalogError> {
        Ok(self.cards.clone())
    }
}

pub fn find_card<'a>(cards: &'a [Card], name: &str) -> Option<&'a Card> {
    cards.iter().find(|card| card.name == name)
}
