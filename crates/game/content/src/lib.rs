//! Data-driven content definitions and loaders.
//!
//! This crate houses the static content of a run and the loaders that read it
//! from RON/TOML data files:
//! - Relic definitions (unlock conditions, hooks, damage rules)
//! - Deity definitions (patron and hostile effects)
//! - Card and event tables
//! - Run configuration
//!
//! Content is consumed by runtime oracles and never appears in run state.
//! Every spec implements the `game-core` capability traits directly, so the
//! rules never see a content-specific type.

pub mod specs;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use specs::{CardTrigger, DeitySpec, EffectList, RelicSpec};

#[cfg(feature = "loaders")]
pub use loaders::{
    CardLoader, ConfigLoader, ContentFactory, DeityLoader, EventLoader, LoadResult, RelicLoader,
    cards::CardCatalog,
};
