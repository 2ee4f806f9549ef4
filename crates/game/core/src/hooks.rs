//! Extension points shared by relics and deities.
//!
//! Each extension point is its own capability trait. Content definitions
//! expose the capabilities they implement through `Option<&dyn ...>`
//! accessors, and dispatch iterates only over implementers. Observers return
//! [`HookEffect`]s instead of mutating the run.

use crate::damage::DamageContext;
use crate::effect::HookEffect;
use crate::ids::CardId;

/// Fired once when a relic becomes ACTIVE.
pub trait ActivationObserver {
    fn on_activate(&self) -> Vec<HookEffect>;
}

/// Fired when a combat encounter starts.
pub trait CombatStartObserver {
    fn on_combat_start(&self) -> Vec<HookEffect>;
}

/// Fired after the player places a card.
pub trait CardPlacedObserver {
    fn on_card_placed(&self, card: &CardId) -> Vec<HookEffect>;
}

/// Fired at the end of every combat turn.
pub trait UpkeepObserver {
    fn on_upkeep(&self, turn: u32) -> Vec<HookEffect>;
}

/// Damage that was actually subtracted from a target's health.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppliedDamage {
    pub amount: i32,
    /// Target health after subtraction; `<= 0` means the target is down.
    pub remaining_hp: i32,
}

impl AppliedDamage {
    pub const fn new(amount: i32, remaining_hp: i32) -> Self {
        Self {
            amount,
            remaining_hp,
        }
    }

    pub const fn is_lethal(&self) -> bool {
        self.remaining_hp <= 0
    }
}

/// Observes damage after it has been applied.
pub trait DamageAppliedObserver {
    /// Called for every applied damage event.
    fn on_damage_applied(&self, _ctx: &DamageContext, _applied: &AppliedDamage) -> Vec<HookEffect> {
        Vec::new()
    }

    /// Called at most once per enemy (slot + id) per combat.
    fn on_enemy_killed(&self, _ctx: &DamageContext) -> Vec<HookEffect> {
        Vec::new()
    }
}
