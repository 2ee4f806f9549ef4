//! Runtime orchestration for the run-resolution rules.
//!
//! This crate wires content oracles, the rules in `game-core` and snapshot
//! repositories into a [`RunSession`] that the exploration and combat engines
//! drive through plain function calls, and that a rendering layer reads the
//! open choice from.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the orchestrator and the per-kind choice handlers
//! - [`api`] exposes the types downstream clients interact with
//! - [`oracle`] and [`repository`] provide data adapters reused by other crates
pub mod api;
pub mod oracle;
pub mod repository;
pub mod session;

pub use api::{
    CombatReward, Encounter, NodeKind, NodeRequest, Result, RunSetup, RuntimeError,
};
pub use oracle::{
    CardOracleImpl, DeityOracleImpl, EventOracleImpl, OracleManager, RelicOracleImpl,
};
pub use repository::{
    FileStateRepository, InMemoryStateRepo, RepositoryError, RunSnapshot, SnapshotService,
    StateRepository,
};
pub use session::RunSession;
