use crate::damage::DamageModifier;
use crate::hooks::{
    ActivationObserver, CardPlacedObserver, CombatStartObserver, DamageAppliedObserver,
    UpkeepObserver,
};
use crate::ids::RelicId;

use super::UnlockPredicate;

/// Capability set of a relic definition.
///
/// Every accessor defaults to `None`; a definition overrides only the
/// extension points it participates in.
pub trait RelicBehavior: Send + Sync {
    fn id(&self) -> &RelicId;

    fn name(&self) -> &str;

    /// Condition gating activation. `None` means the relic activates on grant.
    fn unlock(&self) -> Option<&dyn UnlockPredicate> {
        None
    }

    fn activation(&self) -> Option<&dyn ActivationObserver> {
        None
    }

    fn combat_start(&self) -> Option<&dyn CombatStartObserver> {
        None
    }

    fn card_placed(&self) -> Option<&dyn CardPlacedObserver> {
        None
    }

    fn upkeep(&self) -> Option<&dyn UpkeepObserver> {
        None
    }

    fn damage_modifier(&self) -> Option<&dyn DamageModifier> {
        None
    }

    fn damage_applied(&self) -> Option<&dyn DamageAppliedObserver> {
        None
    }
}
