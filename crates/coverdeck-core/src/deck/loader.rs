use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::models::Item;
use crate::{Error, Result};

/// Where the deck comes from. Consumed once at startup.
pub trait DeckSource {
    fn load_deck(&self) -> Result<Vec<Item>>;
}

/// Deck stored as a JSON array of item objects
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DeckSource for JsonFileSource {
    fn load_deck(&self) -> Result<Vec<Item>> {
        debug!("Loading deck from {}", self.path.display());
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            Error::DeckLoad(format!("cannot read {}: {}", self.path.display(), e))
        })?;
        let items = parse_deck(&content)?;
        info!("Loaded {} items from {}", items.len(), self.path.display());
        Ok(items)
    }
}

/// Parse deck JSON, rejecting malformed input and duplicate ids.
///
/// An empty array is a valid (empty) deck.
pub fn parse_deck(content: &str) -> Result<Vec<Item>> {
    let items: Vec<Item> = serde_json::from_str(content)
        .map_err(|e| Error::DeckLoad(format!("malformed deck: {}", e)))?;

    let mut seen = HashSet::with_capacity(items.len());
    for item in &items {
        if !seen.insert(&item.id) {
            return Err(Error::DeckLoad(format!("duplicate item id '{}'", item.id)));
        }
    }

    Ok(items)
}
