use game_core::{
    CombatStartObserver, DamageModifier, DamageRule, DeityBehavior, DeityId, HookEffect,
};

use super::EffectList;

/// Deity definition as written in `deities.ron`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeitySpec {
    pub id: DeityId,
    pub name: String,
    pub epithet: String,
    /// Rules in effect while this deity is the patron.
    pub patron_damage: Vec<DamageRule>,
    /// Rules in effect for the rest of the run once hostile.
    pub hostile_damage: Vec<DamageRule>,
    pub patron_combat_start: EffectList,
    pub hostile_combat_start: EffectList,
    /// Applied once, the first time the deity turns hostile.
    pub on_became_hostile: EffectList,
}

impl DeitySpec {
    pub fn new(id: impl Into<DeityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}

impl DeityBehavior for DeitySpec {
    fn id(&self) -> &DeityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn patron_modifier(&self) -> Option<&dyn DamageModifier> {
        (!self.patron_damage.is_empty()).then_some(&self.patron_damage as &dyn DamageModifier)
    }

    fn hostile_modifier(&self) -> Option<&dyn DamageModifier> {
        (!self.hostile_damage.is_empty()).then_some(&self.hostile_damage as &dyn DamageModifier)
    }

    fn patron_combat_start(&self) -> Option<&dyn CombatStartObserver> {
        self.patron_combat_start
            .non_empty()
            .map(|effects| effects as &dyn CombatStartObserver)
    }

    fn hostile_combat_start(&self) -> Option<&dyn CombatStartObserver> {
        self.hostile_combat_start
            .non_empty()
            .map(|effects| effects as &dyn CombatStartObserver)
    }

    fn on_became_hostile(&self) -> Vec<HookEffect> {
        self.on_became_hostile.effects()
    }
}
