//! Deterministic run-resolution rules shared by the runtime and offline tools.
//!
//! `game-core` decides what the player is asked next, which passive modifiers
//! are in effect, and how those modifiers reshape damage. It is organised as
//! four coupled subsystems:
//!
//! - [`damage`]: the phase-tagged [`DamageContext`] and the modifier pipeline
//! - [`relic`]: relic grant/unlock/activation lifecycle and hook dispatch
//! - [`faith`]: deity affinity points, focus/patron selection, madness branch
//! - [`choice`]: the modal decision surface with its FIFO queue and return stack
//!
//! All mutation happens on an explicitly passed [`RunState`]; read-only content
//! tables are reached through the oracle traits bundled in [`GameEnv`].
pub mod choice;
pub mod config;
pub mod damage;
pub mod effect;
pub mod env;
pub mod error;
pub mod faith;
pub mod hooks;
pub mod ids;
pub mod relic;
pub mod state;

#[cfg(test)]
mod test_support;

pub use choice::{
    Choice, ChoiceContext, ChoiceError, ChoiceFrame, ChoiceKind, ChoiceOption, ChoiceResolver,
    ChoiceStack, CloseOutcome, Dispatched, PickOrigin, PickPurpose, Pile, Resolution, ShopOffer,
    ShopStock,
};
pub use config::GameConfig;
pub use damage::{
    DamageContext, DamageModifier, DamageOp, DamagePhase, DamagePipeline, DamageRule,
    DamageSource, DamageTarget, NoStages, StageResolver,
};
pub use effect::HookEffect;
pub use env::{
    CardDefinition, CardOracle, DeityOracle, EventDefinition, EventFollowUp, EventOption,
    EventOracle, GameEnv, OracleError, PcgRng, RelicOracle, RngOracle, compute_seed,
};
pub use error::{ErrorSeverity, GameError};
pub use faith::{
    DeityBehavior, FaithError, FaithState, HostileOutcome, MadnessBane, MadnessBoon,
    MadnessOutcome, MadnessResolution, MadnessTrack,
};
pub use hooks::{
    ActivationObserver, CardPlacedObserver, CombatStartObserver, DamageAppliedObserver,
    UpkeepObserver,
};
pub use ids::{CardId, DeityId, EventId, NodeId, RelicId};
pub use relic::{
    AppliedDamage, DamageNotification, GrantOutcome, ProgressCounter, RelicBehavior, RelicError,
    RelicLifecycle, RelicRuntimeState, RelicSource, RelicState, UnlockCondition, UnlockError,
    UnlockPredicate, UnlockProgress, UnlockReport,
};
pub use state::{
    CardInstance, CardTag, DeckError, ResourceError, Resources, RollContext, RunPhase, RunState,
};
