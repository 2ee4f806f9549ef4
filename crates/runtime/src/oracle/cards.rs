//! Minimal [`game_core::CardOracle`] backed by an in-memory map.

use std::collections::HashMap;

use game_content::CardCatalog;
use game_core::{CardDefinition, CardId, CardOracle};

/// CardOracle implementation with the starting deck of the catalog.
#[derive(Default)]
pub struct CardOracleImpl {
    order: Vec<CardId>,
    definitions: HashMap<CardId, CardDefinition>,
    starting_deck: Vec<CardId>,
}

impl CardOracleImpl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_catalog(catalog: CardCatalog) -> Self {
        let mut oracle = Self::new();
        for definition in catalog.cards {
            oracle.add_definition(definition);
        }
        oracle.starting_deck = catalog.starting_deck;
        oracle
    }

    /// Add a card definition.
    pub fn add_definition(&mut self, definition: CardDefinition) {
        if !self.definitions.contains_key(&definition.id) {
            self.order.push(definition.id.clone());
        }
        self.definitions.insert(definition.id.clone(), definition);
    }

    #[must_use]
    pub fn with_starting_deck(mut self, deck: impl IntoIterator<Item = CardId>) -> Self {
        self.starting_deck = deck.into_iter().collect();
        self
    }

    pub fn starting_deck(&self) -> &[CardId] {
        &self.starting_deck
    }

    /// Cards that can be sold, in catalog order.
    pub fn purchasable(&self) -> Vec<&CardDefinition> {
        self.order
            .iter()
            .filter_map(|id| self.definitions.get(id))
            .filter(|definition| definition.price > 0)
            .collect()
    }
}

impl CardOracle for CardOracleImpl {
    fn card(&self, id: &CardId) -> Option<CardDefinition> {
        self.definitions.get(id).cloned()
    }
}
