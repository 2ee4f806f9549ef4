//! Card table loader.

use std::path::Path;

use game_core::CardDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique, read_file};

/// Card table structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardCatalog {
    pub cards: Vec<CardDefinition>,
    /// Cards every run starts with, by id.
    #[serde(default)]
    pub starting_deck: Vec<game_core::CardId>,
}

/// Loader for card tables from RON files.
pub struct CardLoader;

impl CardLoader {
    pub fn load(path: &Path) -> LoadResult<CardCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CardCatalog> {
        let catalog: CardCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse card table RON: {}", e))?;
        ensure_unique("card", catalog.cards.iter().map(|card| &card.id))?;

        if let Some(missing) = catalog
            .starting_deck
            .iter()
            .find(|id| !catalog.cards.iter().any(|card| &card.id == *id))
        {
            anyhow::bail!("Starting deck references unknown card '{}'", missing);
        }
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_deck_must_reference_known_cards() {
        let result = CardLoader::parse(
            r#"(
                cards: [(id: "strike", name: "Strike", cost: 1, price: 45)],
                starting_deck: ["strike", "defend"],
            )"#,
        );
        assert!(result.is_err());
    }
}
