//! Relic unlock timing, combat hooks, reward queues and damage folding.

mod common;

use common::open_kind;
use game_core::{
    AppliedDamage, ChoiceContext, ChoiceKind, CloseOutcome, DamageContext, DamagePhase,
    DamageSource, DamageTarget, Dispatched, HookEffect, NoStages, NodeId, ProgressCounter,
    RelicId, RelicSource, RelicState,
};
use runtime::{CombatReward, Encounter, NodeKind, NodeRequest, RuntimeError};

fn relic(id: &str) -> RelicId {
    RelicId::new(id)
}

/// Relic Unlock Scenario
///
/// A relic waiting on "3 event picks" flips to PENDING on the third pick but
/// only activates once the choice stack settles back to exploration.
#[test]
fn unlocked_relic_waits_for_exploration_before_activating() {
    let mut session = common::session_with(common::setup().with_relic("pilgrim_badge"));
    let badge = relic("pilgrim_badge");
    assert_eq!(session.state().relics.state_of(&badge), Some(RelicState::Dormant));

    for node in 1..=2 {
        session
            .enter_node(NodeId(node), NodeKind::Event("wayside".into()))
            .unwrap();
        session.try_dispatch("pray").unwrap();
    }
    assert_eq!(session.state().progress.get(ProgressCounter::EventPicks), 2);
    assert_eq!(session.state().relics.state_of(&badge), Some(RelicState::Dormant));

    // Third pick opens a follow-up, so the stack is still busy.
    session
        .enter_node(NodeId(3), NodeKind::Event("mirror".into()))
        .unwrap();
    session.try_dispatch("reach").unwrap();
    assert_eq!(session.state().relics.state_of(&badge), Some(RelicState::Pending));
    assert_eq!(session.state().resources.max_hp, 60);

    session.try_dispatch("card:0").unwrap();
    assert!(session.choices().is_idle());
    assert_eq!(session.state().relics.state_of(&badge), Some(RelicState::Active));
    assert_eq!(session.state().resources.max_hp, 68);
}

/// Elite Combat Scenario
///
/// Kills are credited once per enemy, big hits are counted, and the victory
/// queues the card reward ahead of the elite relic offer.
#[test]
fn elite_victory_queues_reward_then_relic_offer() {
    let mut session = common::session_with(common::setup().with_relic("trophy_belt"));
    assert!(matches!(
        session.card_placed(&"strike".into()),
        Err(RuntimeError::NotInCombat)
    ));

    let request = session
        .enter_node(
            NodeId(1),
            NodeKind::Combat {
                elite: true,
                boss: false,
            },
        )
        .unwrap();
    let encounter = Encounter {
        elite: true,
        boss: false,
    };
    assert_eq!(request, NodeRequest::StartCombat(encounter));
    assert_eq!(session.encounter(), Some(encounter));

    assert!(session.combat_started().unwrap().is_empty());
    assert!(session.state().in_combat());
    session.card_placed(&"strike".into()).unwrap();
    assert_eq!(session.state().progress.get(ProgressCounter::CardsPlaced), 1);

    let lethal = DamageContext::new(
        DamageTarget::Enemy,
        DamageSource::PlayerAttack,
        DamagePhase::Final,
        10,
    )
    .with_enemy(0, "slime");
    let first = session
        .damage_applied(&lethal, AppliedDamage::new(10, 0))
        .unwrap();
    assert_eq!(first, vec![HookEffect::GainBlock(4)]);
    let trailing = session
        .damage_applied(&lethal, AppliedDamage::new(3, -3))
        .unwrap();
    assert!(trailing.is_empty());

    let anonymous = DamageContext::new(
        DamageTarget::Enemy,
        DamageSource::Other,
        DamagePhase::Final,
        5,
    );
    session
        .damage_applied(&anonymous, AppliedDamage::new(5, 0))
        .unwrap();
    assert_eq!(session.state().progress.get(ProgressCounter::Kills), 1);

    let hit = |amount| {
        DamageContext::new(
            DamageTarget::Player,
            DamageSource::EnemyAttack,
            DamagePhase::Final,
            amount,
        )
    };
    session
        .damage_applied(&hit(11), AppliedDamage::new(11, 49))
        .unwrap();
    session
        .damage_applied(&hit(12), AppliedDamage::new(12, 37))
        .unwrap();
    assert_eq!(session.state().progress.get(ProgressCounter::BigHitsTaken), 1);

    session
        .combat_won(CombatReward {
            gold: 20,
            cards: vec!["cleave".into()],
            relics: vec!["merchant_seal".into()],
        })
        .unwrap();
    let state = session.state();
    assert!(!state.in_combat());
    assert_eq!(state.resources.gold, 99 + 20);
    assert_eq!(state.progress.get(ProgressCounter::CombatsWon), 1);
    assert_eq!(state.progress.get(ProgressCounter::EliteWins), 1);
    assert_eq!(session.encounter(), None);
    assert_eq!(open_kind(&session), Some(ChoiceKind::Reward));
    assert_eq!(session.choices().queued(), 1);

    assert_eq!(
        session.try_dispatch("card:0").unwrap(),
        Dispatched::Closed(CloseOutcome::Dequeued)
    );
    assert_eq!(session.state().deck.len(), 7);
    assert!(matches!(
        common::open_context(&session),
        ChoiceContext::RelicOffer {
            source: RelicSource::Elite,
            ..
        }
    ));

    assert_eq!(
        session.try_dispatch("relic:0").unwrap(),
        Dispatched::Closed(CloseOutcome::Idle)
    );
    let seal = session
        .state()
        .relics
        .get(&relic("merchant_seal"))
        .cloned()
        .unwrap();
    assert_eq!(seal.source, RelicSource::Elite);
    assert_eq!(seal.obtained_at_node, NodeId(1));
    assert_eq!(session.state().resources.gold, 99 + 20 + 25);
}

#[test]
fn unknown_reward_is_rejected_before_leaving_combat() {
    let mut session = common::session();
    session
        .enter_node(
            NodeId(1),
            NodeKind::Combat {
                elite: false,
                boss: false,
            },
        )
        .unwrap();
    session.combat_started().unwrap();

    let err = session
        .combat_won(CombatReward {
            gold: 50,
            cards: vec!["phantom".into()],
            relics: Vec::new(),
        })
        .unwrap_err();
    assert!(matches!(err, RuntimeError::Deck(_)));
    assert!(session.state().in_combat());
    assert_eq!(session.state().resources.gold, 99);
    assert!(session.choices().is_idle());

    assert!(matches!(
        session.enter_node(NodeId(2), NodeKind::Rest),
        Err(RuntimeError::InCombat)
    ));
}

/// Damage Pipeline Scenario
///
/// Raw 10 picks up +3 from the relic and +2 from the patron. A relic that
/// zeroes "thorns" damage after block wipes it out whatever came before.
#[test]
fn damage_folds_relics_then_patron() {
    let session = common::session_with(
        common::setup()
            .with_relic("whetstone")
            .with_relic("null_ward"),
    );

    let attack = DamageContext::new(
        DamageTarget::Enemy,
        DamageSource::PlayerAttack,
        DamagePhase::PreStatus,
        10,
    );
    let resolved = session.resolve_damage(attack.clone(), &mut NoStages).unwrap();
    assert_eq!(resolved.raw(), 10);
    assert_eq!(resolved.current(), 15);
    assert_eq!(resolved.phase(), DamagePhase::Final);

    let thorns = attack.with_reason("thorns");
    let resolved = session.resolve_damage(thorns, &mut NoStages).unwrap();
    assert_eq!(resolved.current(), 0);

    let incoming = DamageContext::new(
        DamageTarget::Player,
        DamageSource::EnemyAttack,
        DamagePhase::PreStatus,
        7,
    );
    let resolved = session.resolve_damage(incoming, &mut NoStages).unwrap();
    assert_eq!(resolved.current(), 7);

    // Entering late skips the earlier phases.
    let late = DamageContext::new(
        DamageTarget::Enemy,
        DamageSource::PlayerAttack,
        DamagePhase::PreBlock,
        10,
    );
    let resolved = session.resolve_damage(late, &mut NoStages).unwrap();
    assert_eq!(resolved.current(), 10);
}

#[test]
fn treasure_offers_only_unowned_relics() {
    let mut session = common::session_with(common::setup().with_relic("whetstone"));
    let request = session.enter_node(NodeId(1), NodeKind::Treasure).unwrap();
    assert_eq!(request, NodeRequest::Choice(ChoiceKind::RelicOffer));

    let ChoiceContext::RelicOffer { relics, source } = common::open_context(&session) else {
        panic!("relic offer should be open");
    };
    assert_eq!(source, RelicSource::Treasure);
    assert_eq!(relics.len(), 3);
    assert!(!relics.contains(&relic("whetstone")));

    session.try_dispatch("skip").unwrap();
    assert_eq!(session.state().relics.owned().len(), 1);
}

#[test]
fn upkeep_applies_run_effects_and_defers_combat_ones() {
    let mut session = common::session_with(common::setup().with_relic("ember_flask"));
    assert!(matches!(session.turn_ended(1), Err(RuntimeError::NotInCombat)));

    session
        .enter_node(
            NodeId(1),
            NodeKind::Combat {
                elite: false,
                boss: false,
            },
        )
        .unwrap();
    session.combat_started().unwrap();
    for turn in 1..=2 {
        assert_eq!(
            session.turn_ended(turn).unwrap(),
            vec![HookEffect::DrawCards(1)]
        );
    }
    assert_eq!(session.state().resources.supplies, 2);
}

/// Combat Start Scenario
///
/// Relic effects come first, then the patron's. Once madness betrays the
/// patron, its hostile effects replace the patron ones.
#[test]
fn combat_start_folds_relics_then_faith() {
    let mut session =
        common::session_devoted_to(common::GILDED, common::setup().with_relic("iron_buckle"));
    let combat = |elite| NodeKind::Combat { elite, boss: false };

    session.enter_node(NodeId(1), combat(false)).unwrap();
    assert_eq!(
        session.combat_started().unwrap(),
        vec![HookEffect::GainBlock(2), HookEffect::GainBlock(3)]
    );
    assert_eq!(session.state().resources.gold, 99 + 5);
    assert!(matches!(session.combat_started(), Err(RuntimeError::InCombat)));
    session.combat_won(CombatReward::default()).unwrap();

    assert!(session.objective_obtained().unwrap());
    session.try_dispatch("accept").unwrap();
    assert!(session.state().faith.is_hostile(&"gilded".into()));

    session.enter_node(NodeId(2), combat(true)).unwrap();
    assert_eq!(
        session.combat_started().unwrap(),
        vec![HookEffect::GainBlock(2), HookEffect::DrawCards(2)]
    );
}
