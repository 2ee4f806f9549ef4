use crate::damage::DamageModifier;
use crate::effect::HookEffect;
use crate::hooks::CombatStartObserver;
use crate::ids::DeityId;

/// Capability set of a deity definition.
///
/// Patron capabilities apply only while the deity is the patron; hostile
/// capabilities apply for the rest of the run once it turns hostile.
pub trait DeityBehavior: Send + Sync {
    fn id(&self) -> &DeityId;

    fn name(&self) -> &str;

    fn patron_modifier(&self) -> Option<&dyn DamageModifier> {
        None
    }

    fn hostile_modifier(&self) -> Option<&dyn DamageModifier> {
        None
    }

    fn patron_combat_start(&self) -> Option<&dyn CombatStartObserver> {
        None
    }

    fn hostile_combat_start(&self) -> Option<&dyn CombatStartObserver> {
        None
    }

    /// One-time effects applied the first time this deity turns hostile.
    fn on_became_hostile(&self) -> Vec<HookEffect> {
        Vec::new()
    }
}
