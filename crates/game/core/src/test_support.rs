//! In-crate fixtures: minimal relic/deity tables for unit tests.

use crate::config::GameConfig;
use crate::damage::{DamageContext, DamageModifier, DamageRule};
use crate::effect::HookEffect;
use crate::env::{DeityOracle, GameEnv, PcgRng, RelicOracle};
use crate::faith::DeityBehavior;
use crate::hooks::{ActivationObserver, CombatStartObserver, DamageAppliedObserver};
use crate::ids::{DeityId, RelicId};
use crate::relic::{RelicBehavior, UnlockCondition, UnlockPredicate};

pub struct TestRelic {
    pub id: RelicId,
    pub unlock: Option<UnlockCondition>,
    pub rules: Vec<DamageRule>,
    pub on_activate: Vec<HookEffect>,
    pub on_combat_start: Vec<HookEffect>,
    pub on_kill: Vec<HookEffect>,
}

impl TestRelic {
    pub fn new(id: &str) -> Self {
        Self {
            id: RelicId::new(id),
            unlock: None,
            rules: Vec::new(),
            on_activate: Vec::new(),
            on_combat_start: Vec::new(),
            on_kill: Vec::new(),
        }
    }

    pub fn unlock(mut self, condition: UnlockCondition) -> Self {
        self.unlock = Some(condition);
        self
    }

    pub fn rule(mut self, rule: DamageRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn on_activate(mut self, effect: HookEffect) -> Self {
        self.on_activate.push(effect);
        self
    }

    pub fn on_combat_start(mut self, effect: HookEffect) -> Self {
        self.on_combat_start.push(effect);
        self
    }

    pub fn on_kill(mut self, effect: HookEffect) -> Self {
        self.on_kill.push(effect);
        self
    }
}

impl ActivationObserver for TestRelic {
    fn on_activate(&self) -> Vec<HookEffect> {
        self.on_activate.clone()
    }
}

impl CombatStartObserver for TestRelic {
    fn on_combat_start(&self) -> Vec<HookEffect> {
        self.on_combat_start.clone()
    }
}

impl DamageAppliedObserver for TestRelic {
    fn on_enemy_killed(&self, _ctx: &DamageContext) -> Vec<HookEffect> {
        self.on_kill.clone()
    }
}

impl RelicBehavior for TestRelic {
    fn id(&self) -> &RelicId {
        &self.id
    }

    fn name(&self) -> &str {
        self.id.as_str()
    }

    fn unlock(&self) -> Option<&dyn UnlockPredicate> {
        self.unlock.as_ref().map(|condition| condition as _)
    }

    fn activation(&self) -> Option<&dyn ActivationObserver> {
        (!self.on_activate.is_empty()).then_some(self as _)
    }

    fn combat_start(&self) -> Option<&dyn CombatStartObserver> {
        (!self.on_combat_start.is_empty()).then_some(self as _)
    }

    fn damage_modifier(&self) -> Option<&dyn DamageModifier> {
        (!self.rules.is_empty()).then_some(&self.rules as _)
    }

    fn damage_applied(&self) -> Option<&dyn DamageAppliedObserver> {
        (!self.on_kill.is_empty()).then_some(self as _)
    }
}

#[derive(Default)]
pub struct TestRelics(pub Vec<TestRelic>);

impl RelicOracle for TestRelics {
    fn relic(&self, id: &RelicId) -> Option<&dyn RelicBehavior> {
        self.0
            .iter()
            .find(|relic| &relic.id == id)
            .map(|relic| relic as _)
    }

    fn relic_ids(&self) -> Vec<RelicId> {
        self.0.iter().map(|relic| relic.id.clone()).collect()
    }
}

pub struct TestDeity {
    pub id: DeityId,
    pub patron: Vec<DamageRule>,
    pub hostile: Vec<DamageRule>,
    pub on_hostile: Vec<HookEffect>,
}

impl TestDeity {
    pub fn new(id: &str) -> Self {
        Self {
            id: DeityId::new(id),
            patron: Vec::new(),
            hostile: Vec::new(),
            on_hostile: Vec::new(),
        }
    }
}

impl DeityBehavior for TestDeity {
    fn id(&self) -> &DeityId {
        &self.id
    }

    fn name(&self) -> &str {
        self.id.as_str()
    }

    fn patron_modifier(&self) -> Option<&dyn DamageModifier> {
        (!self.patron.is_empty()).then_some(&self.patron as _)
    }

    fn hostile_modifier(&self) -> Option<&dyn DamageModifier> {
        (!self.hostile.is_empty()).then_some(&self.hostile as _)
    }

    fn on_became_hostile(&self) -> Vec<HookEffect> {
        self.on_hostile.clone()
    }
}

#[derive(Default)]
pub struct TestDeities(pub Vec<TestDeity>);

impl DeityOracle for TestDeities {
    fn deity(&self, id: &DeityId) -> Option<&dyn DeityBehavior> {
        self.0
            .iter()
            .find(|deity| &deity.id == id)
            .map(|deity| deity as _)
    }

    fn deity_ids(&self) -> Vec<DeityId> {
        self.0.iter().map(|deity| deity.id.clone()).collect()
    }
}

pub static CONFIG: GameConfig = GameConfig::new();

pub fn env<'a>(relics: &'a TestRelics, deities: &'a TestDeities) -> GameEnv<'a> {
    GameEnv::new(
        Some(relics),
        Some(deities),
        None,
        None,
        Some(&PcgRng),
        &CONFIG,
    )
}

pub fn deity_ids(ids: [&str; 3]) -> [DeityId; 3] {
    ids.map(DeityId::new)
}
