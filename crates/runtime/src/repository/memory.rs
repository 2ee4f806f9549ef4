//! In-memory StateRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use super::{RepositoryError, Result, RunSnapshot, StateRepository};

/// In-memory implementation of StateRepository.
#[derive(Default)]
pub struct InMemoryStateRepo {
    snapshots: RwLock<BTreeMap<u64, RunSnapshot>>,
}

impl InMemoryStateRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateRepository for InMemoryStateRepo {
    fn save(&self, nonce: u64, snapshot: &RunSnapshot) -> Result<()> {
        let mut snapshots = self
            .snapshots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        snapshots.insert(nonce, snapshot.clone());
        Ok(())
    }

    fn load(&self, nonce: u64) -> Result<Option<RunSnapshot>> {
        let snapshots = self
            .snapshots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(snapshots.get(&nonce).cloned())
    }

    fn delete(&self, nonce: u64) -> Result<()> {
        let mut snapshots = self
            .snapshots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        snapshots.remove(&nonce);
        Ok(())
    }

    fn list_nonces(&self) -> Result<Vec<u64>> {
        let snapshots = self
            .snapshots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(snapshots.keys().copied().collect())
    }
}
