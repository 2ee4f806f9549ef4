//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the session and infrastructure layers can stay focused on orchestration.

pub mod errors;
pub mod types;

pub use errors::{Result, RuntimeError};
pub use types::{CombatReward, Encounter, NodeKind, NodeRequest, RunSetup};
