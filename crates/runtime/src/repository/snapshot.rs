//! Run snapshots and the service that persists them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use game_core::{ChoiceStack, RunState};

use super::{FileStateRepository, Result, StateRepository};
use crate::api::Encounter;

/// Everything needed to resume a run: rules state, open and queued choices,
/// and the encounter the combat engine was asked to start.
///
/// Missing fields load as defaults so snapshots survive schema growth.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSnapshot {
    pub version: u32,
    pub state: RunState,
    pub choices: ChoiceStack,
    pub encounter: Option<Encounter>,
}

impl RunSnapshot {
    pub const CURRENT_VERSION: u32 = 1;
}

impl Default for RunSnapshot {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            state: RunState::default(),
            choices: ChoiceStack::default(),
            encounter: None,
        }
    }
}

/// Facade over a [`StateRepository`] keyed by run nonce.
pub struct SnapshotService {
    repo: Box<dyn StateRepository>,
}

impl SnapshotService {
    pub fn new(repo: Box<dyn StateRepository>) -> Self {
        Self { repo }
    }

    /// Create a file-based snapshot service.
    pub fn new_file_based(base_dir: impl AsRef<Path>) -> Result<Self> {
        let repo = FileStateRepository::new(base_dir.as_ref().join("snapshots"))?;
        Ok(Self::new(Box::new(repo)))
    }

    /// Saves `snapshot` under its run nonce and returns that nonce.
    pub fn save(&self, snapshot: &RunSnapshot) -> Result<u64> {
        let nonce = snapshot.state.nonce;
        self.repo.save(nonce, snapshot)?;
        tracing::info!(target: "runtime::repository", "Saved snapshot: nonce={}", nonce);
        Ok(nonce)
    }

    pub fn load(&self, nonce: u64) -> Result<Option<RunSnapshot>> {
        self.repo.load(nonce)
    }

    /// Loads the snapshot with the highest nonce.
    pub fn latest(&self) -> Result<Option<RunSnapshot>> {
        let Some(&nonce) = self.repo.list_nonces()?.last() else {
            return Ok(None);
        };
        let snapshot = self.repo.load(nonce)?;
        if snapshot.is_none() {
            tracing::warn!(
                target: "runtime::repository",
                "Snapshot listed but missing: nonce={}",
                nonce
            );
        }
        Ok(snapshot)
    }

    /// Deletes all but the newest `keep` snapshots.
    pub fn prune(&self, keep: usize) -> Result<usize> {
        let nonces = self.repo.list_nonces()?;
        let excess = nonces.len().saturating_sub(keep);
        let mut deleted = 0;
        for &nonce in &nonces[..excess] {
            self.repo.delete(nonce)?;
            deleted += 1;
        }
        if deleted > 0 {
            tracing::info!(target: "runtime::repository", "Pruned {} snapshots", deleted);
        }
        Ok(deleted)
    }

}
