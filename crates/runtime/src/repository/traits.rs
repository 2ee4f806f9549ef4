//! Repository contract for saving and loading run snapshots.

use super::{Result, RunSnapshot};

/// Storage for run snapshots, keyed by the run nonce they were taken at.
pub trait StateRepository: Send + Sync {
    fn save(&self, nonce: u64, snapshot: &RunSnapshot) -> Result<()>;

    /// Returns `None` when nothing is stored under `nonce`.
    fn load(&self, nonce: u64) -> Result<Option<RunSnapshot>>;

    /// Deleting a missing nonce is not an error.
    fn delete(&self, nonce: u64) -> Result<()>;

    /// Stored nonces in ascending order.
    fn list_nonces(&self) -> Result<Vec<u64>>;
}
