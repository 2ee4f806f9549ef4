//! [`game_core::DeityOracle`] backed by loaded deity specs.

use std::collections::HashMap;

use game_content::DeitySpec;
use game_core::{DeityBehavior, DeityId, DeityOracle};

#[derive(Default)]
pub struct DeityOracleImpl {
    order: Vec<DeityId>,
    deities: HashMap<DeityId, DeitySpec>,
}

impl DeityOracleImpl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, spec: DeitySpec) {
        if !self.deities.contains_key(&spec.id) {
            self.order.push(spec.id.clone());
        }
        self.deities.insert(spec.id.clone(), spec);
    }

    /// Epithet shown next to the deity's name, if it has one.
    pub fn epithet(&self, id: &DeityId) -> Option<&str> {
        self.deities
            .get(id)
            .map(|spec| spec.epithet.as_str())
            .filter(|epithet| !epithet.is_empty())
    }
}

impl FromIterator<DeitySpec> for DeityOracleImpl {
    fn from_iter<I: IntoIterator<Item = DeitySpec>>(iter: I) -> Self {
        let mut oracle = Self::new();
        for spec in iter {
            oracle.add(spec);
        }
        oracle
    }
}

impl DeityOracle for DeityOracleImpl {
    fn deity(&self, id: &DeityId) -> Option<&dyn DeityBehavior> {
        self.deities
            .get(id)
            .map(|spec| spec as &dyn DeityBehavior)
    }

    fn deity_ids(&self) -> Vec<DeityId> {
        self.order.clone()
    }
}
