//! Minimal [`game_core::EventOracle`] backed by an in-memory map.

use std::collections::HashMap;

use game_core::{EventDefinition, EventId, EventOracle};

#[derive(Default)]
pub struct EventOracleImpl {
    definitions: HashMap<EventId, EventDefinition>,
}

impl EventOracleImpl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_definition(&mut self, definition: EventDefinition) {
        self.definitions.insert(definition.id.clone(), definition);
    }
}

impl FromIterator<EventDefinition> for EventOracleImpl {
    fn from_iter<I: IntoIterator<Item = EventDefinition>>(iter: I) -> Self {
        let mut oracle = Self::new();
        for definition in iter {
            oracle.add_definition(definition);
        }
        oracle
    }
}

impl EventOracle for EventOracleImpl {
    fn event(&self, id: &EventId) -> Option<EventDefinition> {
        self.definitions.get(id).cloned()
    }
}
