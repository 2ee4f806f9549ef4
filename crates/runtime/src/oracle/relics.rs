//! [`game_core::RelicOracle`] backed by loaded relic specs.

use std::collections::HashMap;

use game_content::RelicSpec;
use game_core::{RelicBehavior, RelicId, RelicOracle};

/// RelicOracle implementation keeping catalog order for deterministic draws.
#[derive(Default)]
pub struct RelicOracleImpl {
    order: Vec<RelicId>,
    relics: HashMap<RelicId, RelicSpec>,
}

impl RelicOracleImpl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a relic definition. A later definition with the same id replaces
    /// the earlier one but keeps its catalog position.
    pub fn add(&mut self, spec: RelicSpec) {
        if !self.relics.contains_key(&spec.id) {
            self.order.push(spec.id.clone());
        }
        self.relics.insert(spec.id.clone(), spec);
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl FromIterator<RelicSpec> for RelicOracleImpl {
    fn from_iter<I: IntoIterator<Item = RelicSpec>>(iter: I) -> Self {
        let mut oracle = Self::new();
        for spec in iter {
            oracle.add(spec);
        }
        oracle
    }
}

impl RelicOracle for RelicOracleImpl {
    fn relic(&self, id: &RelicId) -> Option<&dyn RelicBehavior> {
        self.relics
            .get(id)
            .map(|spec| spec as &dyn RelicBehavior)
    }

    fn relic_ids(&self) -> Vec<RelicId> {
        self.order.clone()
    }
}
