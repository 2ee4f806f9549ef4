//! Damage resolution pipeline.
//!
//! A damage event is described by a [`DamageContext`] that names its target,
//! source and the [`DamagePhase`] it starts from. Modifiers registered by
//! relics and deities are folded over the context one phase at a time; each
//! modifier produces a successor context instead of mutating in place.
//!
//! # Guarantees
//!
//! - Modifiers only fire for the phase they were written for
//! - `current` is clamped to `>= 0` after every step, so no modifier ever
//!   observes a negative value
//! - Fold order is deterministic: relics in acquisition order, then faith

mod context;
mod pipeline;
mod rule;

pub use context::{DamageContext, DamagePhase, DamageSource, DamageTarget};
pub use pipeline::{DamageModifier, DamagePipeline, NoStages, StageResolver, fold_modifiers};
pub use rule::{DamageOp, DamageRule};
