//! Shared fixtures for runtime integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use game_content::{DeitySpec, EffectList, RelicSpec};
use game_core::{
    CardDefinition, CardId, ChoiceContext, ChoiceKind, DamageOp, DamagePhase, DamageRule,
    DamageSource, DamageTarget, DeityId, EventDefinition, EventFollowUp, EventId, EventOption,
    GameConfig, HookEffect, ProgressCounter, UnlockCondition,
};
use runtime::{
    CardOracleImpl, DeityOracleImpl, EventOracleImpl, OracleManager, RelicOracleImpl, RunSession,
    RunSetup,
};
use tracing_subscriber::EnvFilter;

pub const ARDENT: &str = "ardent";
pub const VEILED: &str = "veiled";
pub const GILDED: &str = "gilded";

/// Routes runtime logs through the test harness. Set `RUST_LOG` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn player_attack(phase: DamagePhase, op: DamageOp) -> DamageRule {
    DamageRule::new(phase, op)
        .for_target(DamageTarget::Enemy)
        .for_source(DamageSource::PlayerAttack)
}

fn relics() -> RelicOracleImpl {
    let mut whetstone = RelicSpec::new("whetstone", "Whetstone");
    whetstone
        .damage
        .push(player_attack(DamagePhase::PreStatus, DamageOp::Add(3)));

    let mut null_ward = RelicSpec::new("null_ward", "Null Ward");
    null_ward.damage.push(
        DamageRule::new(DamagePhase::PostBlock, DamageOp::Scale { num: 0, den: 1 })
            .for_reason("thorns"),
    );

    let mut pilgrim_badge = RelicSpec::new("pilgrim_badge", "Pilgrim Badge");
    pilgrim_badge.unlock = Some(UnlockCondition::reaches(ProgressCounter::EventPicks, 3));
    pilgrim_badge.on_activate = EffectList::new([HookEffect::GainMaxHp(8)]);

    let mut trophy_belt = RelicSpec::new("trophy_belt", "Trophy Belt");
    trophy_belt.on_kill = EffectList::new([HookEffect::GainBlock(4)]);

    let mut merchant_seal = RelicSpec::new("merchant_seal", "Merchant Seal");
    merchant_seal.on_activate = EffectList::new([HookEffect::GainGold(25)]);

    let mut ember_flask = RelicSpec::new("ember_flask", "Ember Flask");
    ember_flask.on_upkeep =
        EffectList::new([HookEffect::GainSupplies(1), HookEffect::DrawCards(1)]);

    let mut iron_buckle = RelicSpec::new("iron_buckle", "Iron Buckle");
    iron_buckle.on_combat_start =
        EffectList::new([HookEffect::GainBlock(2), HookEffect::GainGold(5)]);

    [
        whetstone,
        null_ward,
        pilgrim_badge,
        trophy_belt,
        merchant_seal,
        ember_flask,
        iron_buckle,
    ]
        .into_iter()
        .collect()
}

fn deities() -> DeityOracleImpl {
    let mut ardent = DeitySpec::new(ARDENT, "Ardent");
    ardent
        .patron_damage
        .push(player_attack(DamagePhase::PreStatus, DamageOp::Add(2)));
    ardent.on_became_hostile = EffectList::new([HookEffect::CurseRandomCards { count: 2 }]);

    let veiled = DeitySpec::new(VEILED, "Veiled");

    let mut gilded = DeitySpec::new(GILDED, "Gilded");
    gilded.patron_combat_start = EffectList::new([HookEffect::GainBlock(3)]);
    gilded.hostile_combat_start = EffectList::new([HookEffect::DrawCards(2)]);

    [ardent, veiled, gilded].into_iter().collect()
}

fn cards() -> CardOracleImpl {
    let mut oracle = CardOracleImpl::new();
    oracle.add_definition(CardDefinition::new("strike", "Strike", 1, 50));
    oracle.add_definition(CardDefinition::new("defend", "Defend", 1, 50));
    oracle.add_definition(CardDefinition::new("bash", "Bash", 2, 80));
    oracle.add_definition(CardDefinition::new("cleave", "Cleave", 1, 60));
    oracle.with_starting_deck(
        ["strike", "strike", "strike", "defend", "defend", "bash"].map(CardId::new),
    )
}

fn option(key: &str, effects: Vec<HookEffect>) -> EventOption {
    EventOption {
        key: key.to_owned(),
        label: key.to_owned(),
        detail: None,
        cost_gold: 0,
        effects,
        grant_relic: None,
        follow_up: None,
    }
}

fn events() -> EventOracleImpl {
    let wayside = EventDefinition {
        id: EventId::new("wayside"),
        title: "Wayside Altar".to_owned(),
        prompt: "Candles gutter in the draft.".to_owned(),
        options: vec![option("pray", vec![HookEffect::Heal(5)]), option("leave", Vec::new())],
    };
    let mirror = EventDefinition {
        id: EventId::new("mirror"),
        title: "Mirror Pool".to_owned(),
        prompt: "Your reflection reaches back.".to_owned(),
        options: vec![
            EventOption {
                follow_up: Some(EventFollowUp::DuplicateCard),
                ..option("reach", vec![HookEffect::LoseHp(3)])
            },
            option("leave", Vec::new()),
        ],
    };
    let toll = EventDefinition {
        id: EventId::new("toll"),
        title: "Toll Bridge".to_owned(),
        prompt: "The keeper wants coin.".to_owned(),
        options: vec![
            EventOption {
                cost_gold: 30,
                grant_relic: Some("merchant_seal".into()),
                ..option("pay", Vec::new())
            },
            option("leave", Vec::new()),
        ],
    };
    [wayside, mirror, toll].into_iter().collect()
}

pub fn oracles() -> OracleManager {
    OracleManager::new(
        Arc::new(relics()),
        Arc::new(deities()),
        Arc::new(cards()),
        Arc::new(events()),
        Arc::new(GameConfig::default()),
    )
}

pub fn setup() -> RunSetup {
    RunSetup::new(7).with_offered([ARDENT, VEILED, GILDED].map(DeityId::new))
}

/// Session with `patron` chosen and nothing open.
pub fn session_devoted_to(patron: &str, setup: RunSetup) -> RunSession {
    init_tracing();
    let mut session = RunSession::start(oracles(), setup).expect("run should start");
    session
        .try_dispatch(&format!("deity:{patron}"))
        .expect("patron choice should resolve");
    session
}

/// Session with Ardent chosen as patron and nothing open.
pub fn session_with(setup: RunSetup) -> RunSession {
    session_devoted_to(ARDENT, setup)
}

pub fn session() -> RunSession {
    session_with(setup())
}

pub fn open_kind(session: &RunSession) -> Option<ChoiceKind> {
    session.current_choice().map(|choice| choice.kind)
}

pub fn open_context(session: &RunSession) -> ChoiceContext {
    session
        .choices()
        .current()
        .map(|frame| frame.context.clone())
        .expect("a choice should be open")
}
