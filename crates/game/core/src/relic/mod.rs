//! Relic lifecycle and hook dispatch.
//!
//! Relics are granted to a run, optionally wait for an unlock condition
//! measured against a progress baseline, and only participate in hooks while
//! ACTIVE. The lifecycle is strictly `Dormant → Pending → Active`.

mod behavior;
mod lifecycle;
mod progress;
mod unlock;

pub use crate::hooks::AppliedDamage;
pub use behavior::RelicBehavior;
pub use lifecycle::{
    DamageNotification, GrantOutcome, RelicError, RelicLifecycle, RelicRuntimeState, RelicSource,
    RelicState, UnlockReport,
};
pub use progress::{ProgressCounter, UnlockProgress};
pub use unlock::{UnlockCondition, UnlockError, UnlockPredicate};
