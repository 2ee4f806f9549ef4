//! Run orchestration.
//!
//! [`RunSession`] owns the mutable [`RunState`] and [`ChoiceStack`] of one run
//! and exposes the entry points the exploration and combat engines call. It
//! never panics on bad input: [`RunSession::dispatch`] turns every failure into
//! a logged diagnostic and a short status message.

mod frames;
mod resolver;

use game_core::{
    AppliedDamage, CardId, Choice, ChoiceKind, ChoiceStack, DamageContext, DamageTarget, DeckError,
    DeityId, Dispatched, GameConfig, GameEnv, GameError, HookEffect, MadnessBane, MadnessBoon,
    NodeId, Pile, ProgressCounter, RelicError, RelicId, RelicSource, RollContext, RunState,
    ShopOffer, ShopStock, StageResolver,
};
use tracing::{debug, error, info, warn};

use crate::api::{CombatReward, Encounter, NodeKind, NodeRequest, Result, RunSetup, RuntimeError};
use crate::oracle::OracleManager;
use crate::repository::RunSnapshot;
use resolver::SessionResolver;

/// Cards a shop puts on sale per visit.
const SHOP_OFFERS: usize = 3;
/// Relics a treasure node offers.
const TREASURE_RELICS: usize = 3;

/// One run in progress.
pub struct RunSession {
    oracles: OracleManager,
    state: RunState,
    choices: ChoiceStack,
    encounter: Option<Encounter>,
    status: Option<String>,
}

impl RunSession {
    /// Starts a run: offers three deities, deals the starting deck, grants the
    /// starting relics and opens the patron choice.
    pub fn start(oracles: OracleManager, setup: RunSetup) -> Result<Self> {
        let env = oracles.as_game_env();
        let mut state = RunState::new(setup.seed, setup.resources);

        let offered = match setup.offered {
            Some(offered) => {
                let table = env.deities()?;
                if let Some(missing) = offered.iter().find(|id| table.deity(id).is_none()) {
                    return Err(RuntimeError::UnknownDeity(missing.clone()));
                }
                offered
            }
            None => draw_offered(&state, &env)?,
        };
        for relic in &setup.starting_relics {
            if env.relics()?.relic(relic).is_none() {
                return Err(RelicError::UnknownRelic(relic.clone()).into());
            }
        }

        state.faith.offer(offered)?;
        for card in oracles.cards().starting_deck() {
            state.add_card(card, &env)?;
        }
        for relic in &setup.starting_relics {
            state.grant_relic(relic, RelicSource::Start, &env)?;
        }

        let mut choices = ChoiceStack::new();
        choices.open(frames::god_choice(state.faith.offered(), &env)?);
        info!(
            target: "runtime::choice",
            seed = setup.seed,
            offered = ?state.faith.offered(),
            deck = state.deck.len(),
            "run started"
        );

        Ok(Self {
            oracles,
            state,
            choices,
            encounter: None,
            status: None,
        })
    }

    /// Resumes a run from a snapshot taken by [`RunSession::snapshot`].
    pub fn restore(oracles: OracleManager, snapshot: RunSnapshot) -> Result<Self> {
        if snapshot.version > RunSnapshot::CURRENT_VERSION {
            return Err(RuntimeError::UnsupportedSnapshot {
                found: snapshot.version,
                expected: RunSnapshot::CURRENT_VERSION,
            });
        }
        let RunSnapshot {
            state,
            mut choices,
            encounter,
            ..
        } = snapshot;

        let env = oracles.as_game_env();
        let mut rebuilt = 0;
        for frame in choices.frames_mut().filter(|frame| frame.is_placeholder()) {
            *frame = frames::rebuild(&frame.context, &state, &env)?;
            rebuilt += 1;
        }
        info!(
            target: "runtime::repository",
            nonce = state.nonce,
            open = ?choices.current().map(|frame| frame.kind()),
            rebuilt,
            "run restored"
        );

        Ok(Self {
            oracles,
            state,
            choices,
            encounter,
            status: None,
        })
    }

    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            version: RunSnapshot::CURRENT_VERSION,
            state: self.state.clone(),
            choices: self.choices.clone(),
            encounter: self.encounter,
        }
    }

    // ===== accessors =====

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn choices(&self) -> &ChoiceStack {
        &self.choices
    }

    /// The choice the rendering layer should show, if any.
    pub fn current_choice(&self) -> Option<&Choice> {
        self.choices.visible()
    }

    /// Message describing why the last key was rejected.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Combat requested by the last combat node, until it is won.
    pub fn encounter(&self) -> Option<Encounter> {
        self.encounter
    }

    pub fn oracles(&self) -> &OracleManager {
        &self.oracles
    }

    // ===== exploration =====

    /// Enters an exploration node and opens whatever it offers.
    pub fn enter_node(&mut self, node: NodeId, kind: NodeKind) -> Result<NodeRequest> {
        if self.state.in_combat() {
            return Err(RuntimeError::InCombat);
        }
        if !self.choices.is_idle() {
            return Err(RuntimeError::ChoicePending);
        }

        let env = self.oracles.as_game_env();
        let event = match &kind {
            NodeKind::Event(id) => Some(
                env.events()?
                    .event(id)
                    .ok_or_else(|| RuntimeError::UnknownEvent(id.clone()))?,
            ),
            _ => None,
        };

        self.state.node = node;
        self.state.advance_nonce();
        self.state.record(ProgressCounter::NodesVisited);
        settle_unlocks(&mut self.state, &env)?;
        flush_activations(&mut self.state, &env)?;
        debug!(target: "runtime::choice", %node, ?kind, "node entered");

        let frame = match kind {
            NodeKind::Rest => frames::rest(&self.state, &env),
            NodeKind::Event(_) => match &event {
                Some(definition) => frames::event(definition),
                None => return Ok(NodeRequest::Nothing),
            },
            NodeKind::Shop => {
                let stock = shop_stock(&self.oracles, &self.state, &env)?;
                frames::shop(node, stock, &env)?
            }
            NodeKind::Shrine => match draw_tempter(&self.state, &env)? {
                Some(tempter) => frames::god_tempt(tempter, &env)?,
                None => {
                    self.status = Some("The shrine is silent.".to_owned());
                    return Ok(NodeRequest::Nothing);
                }
            },
            NodeKind::Forge => match frames::synth_pick(None, &self.state, &env) {
                Ok(frame) => frame,
                Err(RuntimeError::Unavailable(reason)) => {
                    self.status = Some(reason.to_owned());
                    return Ok(NodeRequest::Nothing);
                }
                Err(err) => return Err(err),
            },
            NodeKind::Treasure => {
                let relics = draw_treasure(&self.state, &env)?;
                if relics.is_empty() {
                    self.status = Some("The chest is empty.".to_owned());
                    return Ok(NodeRequest::Nothing);
                }
                frames::relic_offer(relics, RelicSource::Treasure, &env)?
            }
            NodeKind::Combat { elite, boss } => {
                let encounter = Encounter { elite, boss };
                self.encounter = Some(encounter);
                return Ok(NodeRequest::StartCombat(encounter));
            }
        };

        let opened = frame.kind();
        self.choices.open(frame);
        Ok(NodeRequest::Choice(opened))
    }

    /// Opens a read-only view of a pile on top of whatever is open.
    pub fn view_pile(&mut self, pile: Pile) -> Result<ChoiceKind> {
        let env = self.oracles.as_game_env();
        let frame = frames::view_pile(pile, &self.state, &env)?;
        let kind = frame.kind();
        self.choices.open(frame);
        Ok(kind)
    }

    /// Fires the madness trigger. Queues the offer and returns true the first
    /// time; later calls do nothing.
    pub fn objective_obtained(&mut self) -> Result<bool> {
        let env = self.oracles.as_game_env();
        let roll = env
            .rng()?
            .next_u32(self.state.roll_seed(RollContext::Madness)) as usize;
        let boon = MadnessBoon::ALL[roll % MadnessBoon::ALL.len()];
        let bane = MadnessBane::ALL[(roll / MadnessBoon::ALL.len()) % MadnessBane::ALL.len()];

        if !self.state.faith.awaken_madness() || !self.state.faith.should_offer_madness() {
            return Ok(false);
        }
        self.state.faith.take_madness_offer(boon, bane)?;
        let opened = self
            .choices
            .enqueue(frames::madness_tempt(boon, bane, &env));
        info!(target: "runtime::faith", %boon, %bane, opened, "madness offered");
        Ok(true)
    }

    // ===== combat =====

    /// Enters combat and returns the combat-only start effects for the engine.
    pub fn combat_started(&mut self) -> Result<Vec<HookEffect>> {
        if self.state.in_combat() {
            return Err(RuntimeError::InCombat);
        }
        let env = self.oracles.as_game_env();
        let effects = self.state.begin_combat(&env)?;
        info!(
            target: "runtime::damage",
            encounter = ?self.encounter,
            effects = effects.len(),
            "combat started"
        );
        Ok(effects)
    }

    pub fn card_placed(&mut self, card: &CardId) -> Result<Vec<HookEffect>> {
        self.require_combat()?;
        let env = self.oracles.as_game_env();
        self.state.record(ProgressCounter::CardsPlaced);
        let effects = self.state.relics.on_card_placed(card, &env)?;
        let deferred = self.state.apply_effects(effects, &env)?;
        settle_unlocks(&mut self.state, &env)?;
        Ok(deferred)
    }

    pub fn turn_ended(&mut self, turn: u32) -> Result<Vec<HookEffect>> {
        self.require_combat()?;
        let env = self.oracles.as_game_env();
        let effects = self.state.relics.on_upkeep(turn, &env)?;
        let deferred = self.state.apply_effects(effects, &env)?;
        Ok(deferred)
    }

    /// Runs a damage event through relic and faith modifiers.
    pub fn resolve_damage(
        &self,
        ctx: DamageContext,
        stages: &mut dyn StageResolver,
    ) -> Result<DamageContext> {
        let env = self.oracles.as_game_env();
        let resolved = self.state.resolve_damage(ctx, stages, &env)?;
        debug!(
            target: "runtime::damage",
            target_kind = ?resolved.target(),
            source = ?resolved.source(),
            raw = resolved.raw(),
            current = resolved.current(),
            "damage resolved"
        );
        Ok(resolved)
    }

    /// Reports damage subtracted from health. Credits kills once per enemy and
    /// counts big hits on the player; returns combat-only effects.
    pub fn damage_applied(
        &mut self,
        ctx: &DamageContext,
        applied: AppliedDamage,
    ) -> Result<Vec<HookEffect>> {
        self.require_combat()?;
        let env = self.oracles.as_game_env();

        let notification = self.state.relics.notify_damage_applied(ctx, applied, &env)?;
        if notification.killed {
            self.state.record(ProgressCounter::Kills);
            debug!(
                target: "runtime::damage",
                enemy = ?ctx.enemy_id(),
                slot = ?ctx.enemy_index(),
                "enemy killed"
            );
        }
        if ctx.target() == DamageTarget::Player && applied.amount >= env.config().big_hit_threshold
        {
            self.state.record(ProgressCounter::BigHitsTaken);
        }
        settle_unlocks(&mut self.state, &env)?;

        let deferred = self.state.apply_effects(notification.effects, &env)?;
        Ok(deferred)
    }

    /// Leaves combat and queues the card reward, then the relic offer.
    pub fn combat_won(&mut self, reward: CombatReward) -> Result<()> {
        self.require_combat()?;
        let env = self.oracles.as_game_env();
        let encounter = self.encounter.unwrap_or_default();

        let cards = env.cards()?;
        if let Some(missing) = reward.cards.iter().find(|id| cards.card(id).is_none()) {
            return Err(DeckError::UnknownCard(missing.clone()).into());
        }
        let card_offer = if reward.cards.is_empty() {
            None
        } else {
            Some(frames::reward(reward.cards, &env)?)
        };
        let relic_offer = if reward.relics.is_empty() {
            None
        } else {
            Some(frames::relic_offer(
                reward.relics,
                encounter.relic_source(),
                &env,
            )?)
        };

        self.encounter = None;
        self.state.end_combat();
        self.state.record(ProgressCounter::CombatsWon);
        if encounter.elite {
            self.state.record(ProgressCounter::EliteWins);
        }
        self.state.resources.gain_gold(reward.gold);
        settle_unlocks(&mut self.state, &env)?;

        for frame in card_offer.into_iter().chain(relic_offer) {
            self.choices.enqueue(frame);
        }
        if self.choices.is_idle() {
            flush_activations(&mut self.state, &env)?;
        }
        info!(
            target: "runtime::choice",
            ?encounter,
            gold = reward.gold,
            queued = self.choices.queued(),
            "combat won"
        );
        Ok(())
    }

    fn require_combat(&self) -> Result<()> {
        if self.state.in_combat() {
            Ok(())
        } else {
            Err(RuntimeError::NotInCombat)
        }
    }

    // ===== choices =====

    /// Resolves `key` against the open choice.
    ///
    /// Failures are logged and stored as [`status`](Self::status); the run and
    /// the open choice are left as they were.
    pub fn dispatch(&mut self, key: &str) -> Option<Dispatched> {
        match self.try_dispatch(key) {
            Ok(dispatched) => {
                self.status = None;
                Some(dispatched)
            }
            Err(err) => {
                report(&err, key);
                self.status = Some(err.to_string());
                None
            }
        }
    }

    /// Like [`dispatch`](Self::dispatch) but returns the error.
    pub fn try_dispatch(&mut self, key: &str) -> Result<Dispatched> {
        let env = self.oracles.as_game_env();
        let mut resolver = SessionResolver::new(&mut self.state, &env);
        let dispatched = self.choices.dispatch(key, &mut resolver)?;
        debug!(target: "runtime::choice", key, ?dispatched, "choice resolved");

        self.state.advance_nonce();
        settle_unlocks(&mut self.state, &env)?;
        if self.choices.is_idle() && !self.state.in_combat() {
            flush_activations(&mut self.state, &env)?;
        }
        Ok(dispatched)
    }
}

fn report(err: &RuntimeError, key: &str) {
    let severity = err.severity();
    if severity.is_internal() {
        error!(
            target: "runtime::choice",
            key,
            code = err.error_code(),
            severity = severity.as_str(),
            "choice failed: {}",
            err
        );
    } else {
        warn!(
            target: "runtime::choice",
            key,
            code = err.error_code(),
            severity = severity.as_str(),
            "choice rejected: {}",
            err
        );
    }
}

/// Evaluates unlock predicates and logs what changed.
fn settle_unlocks(state: &mut RunState, env: &GameEnv<'_>) -> Result<()> {
    let unlocks = state.check_unlocks(env)?;
    for relic in &unlocks.newly_pending {
        info!(target: "runtime::relic", relic = %relic, "relic unlocked, activation pending");
    }
    for (relic, err) in &unlocks.failures {
        warn!(
            target: "runtime::relic",
            relic = %relic,
            code = err.error_code(),
            "unlock check failed: {}",
            err
        );
    }
    Ok(())
}

fn flush_activations(state: &mut RunState, env: &GameEnv<'_>) -> Result<()> {
    for (relic, effects) in state.flush_pending_activations(env)? {
        info!(target: "runtime::relic", relic = %relic, ?effects, "relic activated");
    }
    Ok(())
}

fn draw_offered(
    state: &RunState,
    env: &GameEnv<'_>,
) -> Result<[DeityId; GameConfig::OFFERED_DEITIES]> {
    let ids = env.deities()?.deity_ids();
    let found = ids.len();
    let drawn: Vec<DeityId> = env
        .rng()?
        .sample_indices(
            state.roll_seed(RollContext::Offer),
            found,
            GameConfig::OFFERED_DEITIES,
        )
        .into_iter()
        .map(|index| ids[index].clone())
        .collect();
    drawn
        .try_into()
        .map_err(|_| RuntimeError::NotEnoughDeities {
            found,
            required: GameConfig::OFFERED_DEITIES,
        })
}

fn shop_stock(oracles: &OracleManager, state: &RunState, env: &GameEnv<'_>) -> Result<ShopStock> {
    let catalog = oracles.cards().purchasable();
    let offers = env
        .rng()?
        .sample_indices(state.roll_seed(RollContext::Shop), catalog.len(), SHOP_OFFERS)
        .into_iter()
        .map(|index| ShopOffer {
            card: catalog[index].id.clone(),
            price: catalog[index].price,
            sold: false,
        })
        .collect();
    let config = env.config();
    Ok(ShopStock {
        offers,
        upgrade_price: config.upgrade_price,
        remove_price: config.remove_price,
    })
}

/// Offered deity that is neither the focus nor hostile.
fn draw_tempter(state: &RunState, env: &GameEnv<'_>) -> Result<Option<DeityId>> {
    let faith = &state.faith;
    let candidates: Vec<&DeityId> = faith
        .offered()
        .iter()
        .filter(|id| faith.focus() != Some(*id) && !faith.is_hostile(id))
        .collect();
    let pick = env
        .rng()?
        .pick_index(state.roll_seed(RollContext::Shrine), candidates.len());
    Ok(pick.map(|index| candidates[index].clone()))
}

fn draw_treasure(state: &RunState, env: &GameEnv<'_>) -> Result<Vec<RelicId>> {
    let unowned: Vec<RelicId> = env
        .relics()?
        .relic_ids()
        .into_iter()
        .filter(|id| !state.relics.owns(id))
        .collect();
    Ok(env
        .rng()?
        .sample_indices(
            state.roll_seed(RollContext::Treasure),
            unowned.len(),
            TREASURE_RELICS,
        )
        .into_iter()
        .map(|index| unowned[index].clone())
        .collect())
}
