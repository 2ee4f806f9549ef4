//! Effects produced by relic and deity hooks.
//!
//! Hooks never mutate the run directly. They return a list of [`HookEffect`]s
//! which the caller applies: resource effects land on
//! [`Resources`](crate::state::Resources), combat effects are handed back to
//! the combat engine, and deck effects are resolved against the run's deck.

/// A single requested change produced by a hook.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HookEffect {
    GainGold(u32),
    LoseGold(u32),
    Heal(u32),
    LoseHp(u32),
    GainMaxHp(u32),
    AddFatigue(u32),
    ReduceFatigue(u32),
    GainSupplies(u32),
    /// Combat only: block granted to the player.
    GainBlock(u32),
    /// Combat only: extra cards drawn.
    DrawCards(u32),
    /// Combat only: extra energy this turn.
    GainEnergy(u32),
    /// Tags up to `count` random uncursed deck cards as cursed.
    CurseRandomCards { count: u8 },
}

impl HookEffect {
    /// Returns true for effects only the combat engine can honor.
    pub const fn is_combat_only(&self) -> bool {
        matches!(
            self,
            Self::GainBlock(_) | Self::DrawCards(_) | Self::GainEnergy(_)
        )
    }
}
