//! Mutable per-run state.
//!
//! [`RunState`] is the single context handle every rule mutates. It is passed
//! explicitly; nothing in the core holds global state. Content is reached
//! through [`GameEnv`] and never stored here, so a snapshot of this struct is
//! enough to resume a run.
mod deck;
mod resources;

pub use deck::{CardInstance, CardTag, DeckError};
pub use resources::{ResourceError, Resources};

use crate::damage::{DamageContext, DamagePipeline, StageResolver};
use crate::effect::HookEffect;
use crate::env::{GameEnv, OracleError, compute_seed};
use crate::faith::{
    FaithError, FaithState, HostileOutcome, MadnessBane, MadnessBoon, MadnessResolution,
};
use crate::ids::{CardId, DeityId, NodeId, RelicId};
use crate::relic::{
    GrantOutcome, ProgressCounter, RelicError, RelicLifecycle, RelicSource, UnlockProgress,
    UnlockReport,
};

/// Which flow currently owns the run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum RunPhase {
    #[default]
    Exploration,
    Combat,
}

/// Independent random rolls within one nonce step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum RollContext {
    Curse = 1,
    Shrine = 2,
    Madness = 3,
    Shop = 4,
    Treasure = 5,
    Offer = 6,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunState {
    /// Fixed at run start.
    pub seed: u64,
    /// Bumped on every resolved step; mixed into every random roll.
    pub nonce: u64,
    pub node: NodeId,
    pub phase: RunPhase,
    pub resources: Resources,
    pub deck: Vec<CardInstance>,
    pub progress: UnlockProgress,
    pub relics: RelicLifecycle,
    pub faith: FaithState,
}

impl RunState {
    pub fn new(seed: u64, resources: Resources) -> Self {
        Self {
            seed,
            resources,
            ..Self::default()
        }
    }

    pub fn in_combat(&self) -> bool {
        self.phase == RunPhase::Combat
    }

    pub fn advance_nonce(&mut self) {
        self.nonce = self.nonce.wrapping_add(1);
    }

    pub fn roll_seed(&self, context: RollContext) -> u64 {
        compute_seed(self.seed, self.nonce, context as u32)
    }

    pub fn record(&mut self, counter: ProgressCounter) {
        self.progress.increment(counter);
    }

    // ===== effects =====

    /// Applies resource and deck effects. Combat-only effects are returned
    /// untouched for the combat engine.
    pub fn apply_effects(
        &mut self,
        effects: impl IntoIterator<Item = HookEffect>,
        env: &GameEnv<'_>,
    ) -> Result<Vec<HookEffect>, OracleError> {
        let mut deferred = Vec::new();
        for effect in effects {
            if effect.is_combat_only() {
                deferred.push(effect);
                continue;
            }
            self.apply_effect(effect, env)?;
        }
        Ok(deferred)
    }

    fn apply_effect(&mut self, effect: HookEffect, env: &GameEnv<'_>) -> Result<(), OracleError> {
        let resources = &mut self.resources;
        match effect {
            HookEffect::GainGold(amount) => resources.gain_gold(amount),
            HookEffect::LoseGold(amount) => resources.lose_gold(amount),
            HookEffect::Heal(amount) => {
                resources.heal(amount);
            }
            HookEffect::LoseHp(amount) => resources.lose_hp(amount),
            HookEffect::GainMaxHp(amount) => resources.gain_max_hp(amount),
            HookEffect::AddFatigue(amount) => resources.add_fatigue(amount),
            HookEffect::ReduceFatigue(amount) => resources.reduce_fatigue(amount),
            HookEffect::GainSupplies(amount) => resources.gain_supplies(amount),
            HookEffect::CurseRandomCards { count } => {
                self.curse_random_cards(usize::from(count), env)?;
            }
            HookEffect::GainBlock(_) | HookEffect::DrawCards(_) | HookEffect::GainEnergy(_) => {}
        }
        Ok(())
    }

    /// Tags up to `count` uncursed cards as cursed and returns their indices.
    pub fn curse_random_cards(
        &mut self,
        count: usize,
        env: &GameEnv<'_>,
    ) -> Result<Vec<usize>, OracleError> {
        let candidates: Vec<usize> = self
            .deck
            .iter()
            .enumerate()
            .filter(|(_, card)| !card.is_cursed())
            .map(|(index, _)| index)
            .collect();
        if candidates.is_empty() || count == 0 {
            return Ok(Vec::new());
        }

        let seed = self.roll_seed(RollContext::Curse);
        let picked: Vec<usize> = env
            .rng()?
            .sample_indices(seed, candidates.len(), count)
            .into_iter()
            .map(|i| candidates[i])
            .collect();
        for &index in &picked {
            self.deck[index].tags.insert(CardTag::Cursed);
        }
        Ok(picked)
    }

    // ===== relics =====

    /// Grants a relic at the current node and applies its activation effects.
    pub fn grant_relic(
        &mut self,
        id: &RelicId,
        source: RelicSource,
        env: &GameEnv<'_>,
    ) -> Result<GrantOutcome, RelicError> {
        let outcome = self
            .relics
            .grant(id, source, self.node, &self.progress, env)?;
        if let GrantOutcome::Activated(effects) = &outcome {
            self.apply_effects(effects.clone(), env)?;
        }
        Ok(outcome)
    }

    pub fn check_unlocks(&mut self, env: &GameEnv<'_>) -> Result<UnlockReport, OracleError> {
        self.relics.check_unlocks(&self.progress, env)
    }

    /// Activates queued relics. Does nothing while in combat.
    pub fn flush_pending_activations(
        &mut self,
        env: &GameEnv<'_>,
    ) -> Result<Vec<(RelicId, Vec<HookEffect>)>, OracleError> {
        if self.in_combat() {
            return Ok(Vec::new());
        }
        let activated = self.relics.flush_pending_activations(self.node, env)?;
        for (_, effects) in &activated {
            self.apply_effects(effects.clone(), env)?;
        }
        Ok(activated)
    }

    // ===== faith =====

    /// Marks a deity hostile and applies its one-time effects on first call.
    pub fn set_deity_hostile(
        &mut self,
        deity: &DeityId,
        env: &GameEnv<'_>,
    ) -> Result<HostileOutcome, FaithError> {
        let outcome = self.faith.set_hostile(deity)?;
        if outcome == HostileOutcome::Newly {
            let effects = FaithState::hostility_effects(deity, env)?;
            self.apply_effects(effects, env)?;
        }
        Ok(outcome)
    }

    pub fn accept_madness(
        &mut self,
        boon: MadnessBoon,
        env: &GameEnv<'_>,
    ) -> Result<MadnessResolution, FaithError> {
        let resolution = self.faith.accept_madness(boon, env.config())?;
        self.apply_effects(resolution.effects.clone(), env)?;
        if let Some(betrayed) = &resolution.betrayed {
            let effects = FaithState::hostility_effects(betrayed, env)?;
            self.apply_effects(effects, env)?;
        }
        Ok(resolution)
    }

    pub fn reject_madness(
        &mut self,
        bane: MadnessBane,
        env: &GameEnv<'_>,
    ) -> Result<MadnessResolution, FaithError> {
        let resolution = self.faith.reject_madness(bane, self.resources.gold)?;
        self.apply_effects(resolution.effects.clone(), env)?;
        Ok(resolution)
    }

    /// Combat-start effects: relics first, then faith.
    pub fn begin_combat(&mut self, env: &GameEnv<'_>) -> Result<Vec<HookEffect>, OracleError> {
        self.phase = RunPhase::Combat;
        let mut effects = self.relics.begin_combat(env)?;
        effects.extend(self.faith.combat_start_effects(env)?);
        self.apply_effects(effects, env)
    }

    pub fn end_combat(&mut self) {
        self.phase = RunPhase::Exploration;
    }

    // ===== damage =====

    /// Pipeline with relic modifiers (acquisition order) then faith modifiers.
    pub fn damage_pipeline<'a>(
        &'a self,
        env: &GameEnv<'a>,
    ) -> Result<DamagePipeline<'a>, OracleError> {
        let mut pipeline = DamagePipeline::new();
        pipeline.extend(self.relics.damage_modifiers(env)?);
        pipeline.extend(self.faith.damage_modifiers(env)?);
        Ok(pipeline)
    }

    /// Runs `ctx` from its phase through `Final`.
    pub fn resolve_damage(
        &self,
        ctx: DamageContext,
        stages: &mut dyn StageResolver,
        env: &GameEnv<'_>,
    ) -> Result<DamageContext, OracleError> {
        Ok(self.damage_pipeline(env)?.resolve(ctx, stages))
    }

    // ===== deck =====

    pub fn card(&self, index: usize) -> Result<&CardInstance, DeckError> {
        self.deck.get(index).ok_or(DeckError::IndexOutOfRange {
            index,
            len: self.deck.len(),
        })
    }

    pub fn add_card(&mut self, card: &CardId, env: &GameEnv<'_>) -> Result<(), DeckError> {
        let definition = env
            .cards()?
            .card(card)
            .ok_or_else(|| DeckError::UnknownCard(card.clone()))?;
        self.deck.push(CardInstance::from_definition(&definition));
        Ok(())
    }

    pub fn can_upgrade(&self, index: usize, env: &GameEnv<'_>) -> Result<bool, DeckError> {
        let instance = self.card(index)?;
        if instance.upgraded {
            return Ok(false);
        }
        Ok(env
            .cards()?
            .card(&instance.card)
            .is_some_and(|definition| definition.upgradeable))
    }

    /// Deck indices eligible for an upgrade.
    pub fn upgradeable_cards(&self, env: &GameEnv<'_>) -> Result<Vec<usize>, DeckError> {
        let mut indices = Vec::new();
        for index in 0..self.deck.len() {
            if self.can_upgrade(index, env)? {
                indices.push(index);
            }
        }
        Ok(indices)
    }

    pub fn upgrade_card(&mut self, index: usize, env: &GameEnv<'_>) -> Result<(), DeckError> {
        if !self.can_upgrade(index, env)? {
            return Err(DeckError::NotUpgradeable(index));
        }
        self.deck[index].upgraded = true;
        Ok(())
    }

    pub fn remove_card(&mut self, index: usize) -> Result<CardInstance, DeckError> {
        self.card(index)?;
        Ok(self.deck.remove(index))
    }

    pub fn duplicate_card(&mut self, index: usize) -> Result<(), DeckError> {
        let copy = self.card(index)?.clone();
        self.deck.push(copy);
        Ok(())
    }

    /// Fuses `second` into `first`: the survivor gains `tag` plus
    /// [`CardTag::Fused`], keeps either upgrade, and `second` leaves the deck.
    /// Returns the survivor's new index.
    pub fn synthesize(
        &mut self,
        first: usize,
        second: usize,
        tag: CardTag,
    ) -> Result<usize, DeckError> {
        if first == second {
            return Err(DeckError::SameCard(first));
        }
        let absorbed = self.card(second)?.clone();
        let survivor = self.card(first)?;
        if !survivor.synthesis_candidates().contains(&tag) {
            return Err(DeckError::InvalidSynthesisTag(tag));
        }

        let survivor = &mut self.deck[first];
        survivor.upgraded |= absorbed.upgraded;
        survivor.tags.insert(tag);
        survivor.tags.insert(CardTag::Fused);
        survivor.tags.extend(
            absorbed
                .tags
                .iter()
                .copied()
                .filter(|tag| *tag == CardTag::Cursed),
        );
        self.deck.remove(second);
        Ok(if second < first { first - 1 } else { first })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::{
        DamageOp, DamagePhase, DamageRule, DamageSource, DamageTarget, NoStages,
    };
    use crate::test_support::{TestDeities, TestDeity, TestRelic, TestRelics, deity_ids, env};

    fn run_with_deck(cards: &[&str]) -> RunState {
        let mut run = RunState::new(42, Resources::new(50, 100));
        run.deck = cards.iter().map(|card| CardInstance::new(*card)).collect();
        run
    }

    #[test]
    fn hostility_curses_once() {
        let relics = TestRelics::default();
        let mut spiteful = TestDeity::new("b");
        spiteful
            .on_hostile
            .push(HookEffect::CurseRandomCards { count: 2 });
        let deities = TestDeities(vec![TestDeity::new("a"), spiteful, TestDeity::new("c")]);
        let env = env(&relics, &deities);

        let mut run = run_with_deck(&["strike", "strike", "defend", "bash"]);
        run.faith.offer(deity_ids(["a", "b", "c"])).unwrap();
        run.faith.choose(&DeityId::new("a"), env.config()).unwrap();

        let b = DeityId::new("b");
        assert_eq!(run.set_deity_hostile(&b, &env), Ok(HostileOutcome::Newly));
        assert_eq!(run.deck.iter().filter(|card| card.is_cursed()).count(), 2);

        assert_eq!(run.set_deity_hostile(&b, &env), Ok(HostileOutcome::Already));
        assert_eq!(run.deck.iter().filter(|card| card.is_cursed()).count(), 2);
    }

    #[test]
    fn curse_skips_cursed_cards() {
        let relics = TestRelics::default();
        let deities = TestDeities::default();
        let env = env(&relics, &deities);

        let mut run = run_with_deck(&["strike", "defend", "bash"]);
        run.deck[1].tags.insert(CardTag::Cursed);
        let cursed = run.curse_random_cards(5, &env).unwrap();
        assert_eq!(cursed.len(), 2);
        assert!(!cursed.contains(&1));
        assert!(run.deck.iter().all(CardInstance::is_cursed));
    }

    #[test]
    fn flush_waits_for_exploration() {
        let relics = TestRelics(vec![
            TestRelic::new("hunter")
                .unlock(crate::relic::UnlockCondition::delta(ProgressCounter::Kills, 1))
                .on_activate(HookEffect::GainGold(25)),
        ]);
        let deities = TestDeities::default();
        let env = env(&relics, &deities);
        let id = RelicId::new("hunter");

        let mut run = run_with_deck(&[]);
        run.grant_relic(&id, RelicSource::Elite, &env).unwrap();
        run.begin_combat(&env).unwrap();
        run.record(ProgressCounter::Kills);
        run.check_unlocks(&env).unwrap();

        assert!(run.flush_pending_activations(&env).unwrap().is_empty());
        assert_eq!(run.resources.gold, 100);

        run.end_combat();
        let activated = run.flush_pending_activations(&env).unwrap();
        assert_eq!(activated.len(), 1);
        assert_eq!(run.resources.gold, 125);
    }

    #[test]
    fn pipeline_folds_relics_before_faith() {
        let relics = TestRelics(vec![
            TestRelic::new("plus").rule(DamageRule::new(DamagePhase::PreStatus, DamageOp::Add(3))),
            TestRelic::new("nullify").rule(
                DamageRule::new(DamagePhase::PostBlock, DamageOp::Scale { num: 0, den: 1 })
                    .for_reason("thorns"),
            ),
        ]);
        let mut patron = TestDeity::new("a");
        patron
            .patron
            .push(DamageRule::new(DamagePhase::PreStatus, DamageOp::Scale { num: 2, den: 1 }));
        let deities = TestDeities(vec![patron, TestDeity::new("b"), TestDeity::new("c")]);
        let env = env(&relics, &deities);

        let mut run = run_with_deck(&[]);
        run.faith.offer(deity_ids(["a", "b", "c"])).unwrap();
        run.faith.choose(&DeityId::new("a"), env.config()).unwrap();
        run.grant_relic(&RelicId::new("plus"), RelicSource::Start, &env)
            .unwrap();
        run.grant_relic(&RelicId::new("nullify"), RelicSource::Start, &env)
            .unwrap();

        let ctx = DamageContext::new(
            DamageTarget::Enemy,
            DamageSource::PlayerAttack,
            DamagePhase::PreStatus,
            10,
        );
        let resolved = run
            .resolve_damage(ctx.clone(), &mut NoStages, &env)
            .unwrap();
        assert_eq!(resolved.current(), 26);

        let thorns = run
            .resolve_damage(ctx.with_reason("thorns"), &mut NoStages, &env)
            .unwrap();
        assert_eq!(thorns.current(), 0);
    }

    #[test]
    fn synthesis_fuses_and_removes_second_card() {
        let mut run = run_with_deck(&["strike", "defend", "bash"]);
        run.deck[2].upgraded = true;

        assert_eq!(
            run.synthesize(1, 1, CardTag::Retain),
            Err(DeckError::SameCard(1))
        );
        assert_eq!(
            run.synthesize(1, 2, CardTag::Cursed),
            Err(DeckError::InvalidSynthesisTag(CardTag::Cursed))
        );

        let survivor = run.synthesize(2, 0, CardTag::Retain).unwrap();
        assert_eq!(survivor, 1);
        assert_eq!(run.deck.len(), 2);
        let fused = &run.deck[survivor];
        assert_eq!(fused.card, CardId::new("bash"));
        assert!(fused.upgraded);
        assert!(fused.has_tag(CardTag::Retain) && fused.has_tag(CardTag::Fused));
    }

    #[test]
    fn madness_acceptance_costs_fatigue() {
        let relics = TestRelics::default();
        let deities = TestDeities(vec![
            TestDeity::new("a"),
            TestDeity::new("b"),
            TestDeity::new("c"),
        ]);
        let env = env(&relics, &deities);
        let mut run = run_with_deck(&[]);
        run.faith.offer(deity_ids(["a", "b", "c"])).unwrap();
        run.faith.choose(&DeityId::new("a"), env.config()).unwrap();
        run.faith.awaken_madness();

        run.accept_madness(MadnessBoon::Vigor, &env).unwrap();
        assert_eq!(run.resources.fatigue, 3);
        assert_eq!(run.resources.max_hp, 60);
        assert!(run.faith.is_hostile(&DeityId::new("a")));
    }
}
