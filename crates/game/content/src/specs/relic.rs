use game_core::{
    ActivationObserver, CardPlacedObserver, CombatStartObserver, DamageAppliedObserver,
    DamageContext, DamageModifier, DamageRule, HookEffect, RelicBehavior, RelicId,
    UnlockCondition, UnlockPredicate, UpkeepObserver,
};

use super::{CardTrigger, EffectList};

/// Relic definition as written in `relics.ron`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RelicSpec {
    pub id: RelicId,
    pub name: String,
    pub description: String,
    /// Condition that must hold before the relic activates.
    pub unlock: Option<UnlockCondition>,
    pub on_activate: EffectList,
    pub on_combat_start: EffectList,
    pub on_card_placed: Option<CardTrigger>,
    pub on_upkeep: EffectList,
    /// Rules folded over damage while the relic is ACTIVE.
    pub damage: Vec<DamageRule>,
    /// Emitted once per enemy killed.
    pub on_kill: EffectList,
}

impl RelicSpec {
    pub fn new(id: impl Into<RelicId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}

impl DamageAppliedObserver for RelicSpec {
    fn on_enemy_killed(&self, _ctx: &DamageContext) -> Vec<HookEffect> {
        self.on_kill.effects()
    }
}

impl RelicBehavior for RelicSpec {
    fn id(&self) -> &RelicId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn unlock(&self) -> Option<&dyn UnlockPredicate> {
        self.unlock
            .as_ref()
            .map(|condition| condition as &dyn UnlockPredicate)
    }

    fn activation(&self) -> Option<&dyn ActivationObserver> {
        self.on_activate
            .non_empty()
            .map(|effects| effects as &dyn ActivationObserver)
    }

    fn combat_start(&self) -> Option<&dyn CombatStartObserver> {
        self.on_combat_start
            .non_empty()
            .map(|effects| effects as &dyn CombatStartObserver)
    }

    fn card_placed(&self) -> Option<&dyn CardPlacedObserver> {
        self.on_card_placed
            .as_ref()
            .map(|trigger| trigger as &dyn CardPlacedObserver)
    }

    fn upkeep(&self) -> Option<&dyn UpkeepObserver> {
        self.on_upkeep
            .non_empty()
            .map(|effects| effects as &dyn UpkeepObserver)
    }

    fn damage_modifier(&self) -> Option<&dyn DamageModifier> {
        (!self.damage.is_empty()).then_some(&self.damage as &dyn DamageModifier)
    }

    fn damage_applied(&self) -> Option<&dyn DamageAppliedObserver> {
        (!self.on_kill.is_empty()).then_some(self as &dyn DamageAppliedObserver)
    }
}
