//! Repository layer for dynamic runtime data
//!
//! Repositories handle data that CHANGES during a run: snapshots of the run
//! state and its open choices, for save/load and rollback.
//!
//! Static content (relics, deities, cards, events) is handled by oracles, not
//! repositories.

mod error;
mod file;
mod memory;
mod snapshot;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileStateRepository;
pub use memory::InMemoryStateRepo;
pub use snapshot::{RunSnapshot, SnapshotService};
pub use traits::StateRepository;
