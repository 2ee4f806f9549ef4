use std::collections::{BTreeSet, VecDeque};

use crate::config::GameConfig;
use crate::damage::{DamageContext, DamageModifier, DamageTarget, fold_modifiers};
use crate::effect::HookEffect;
use crate::env::{GameEnv, OracleError};
use crate::error::{ErrorSeverity, GameError};
use crate::hooks::AppliedDamage;
use crate::ids::{CardId, NodeId, RelicId};

use super::{RelicBehavior, UnlockError, UnlockProgress};

/// Lifecycle state of an owned relic. Transitions only move forward.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum RelicState {
    Dormant,
    Pending,
    Active,
}

/// Where a relic came from.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RelicSource {
    #[default]
    Start,
    Reward,
    Elite,
    Boss,
    Shop,
    Event,
    Treasure,
}

/// Per-run record of an owned relic.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelicRuntimeState {
    pub id: RelicId,
    state: RelicState,
    /// Progress snapshot taken at grant time; `None` when the relic has no
    /// unlock condition.
    #[cfg_attr(feature = "serde", serde(default))]
    unlock_baseline: Option<UnlockProgress>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub source: RelicSource,
    #[cfg_attr(feature = "serde", serde(default))]
    pub obtained_at_node: NodeId,
    #[cfg_attr(feature = "serde", serde(default))]
    activated_at_node: Option<NodeId>,
}

impl RelicRuntimeState {
    pub fn state(&self) -> RelicState {
        self.state
    }

    pub fn unlock_baseline(&self) -> Option<&UnlockProgress> {
        self.unlock_baseline.as_ref()
    }

    pub fn activated_at_node(&self) -> Option<NodeId> {
        self.activated_at_node
    }

    pub fn is_active(&self) -> bool {
        self.state == RelicState::Active
    }

    fn mark_pending(&mut self) -> bool {
        if self.state != RelicState::Dormant {
            return false;
        }
        self.state = RelicState::Pending;
        true
    }

    fn mark_active(&mut self, node: NodeId) -> bool {
        if self.state != RelicState::Pending {
            return false;
        }
        self.state = RelicState::Active;
        self.activated_at_node = Some(node);
        true
    }
}

/// Result of [`RelicLifecycle::grant`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GrantOutcome {
    /// No unlock condition: the relic is ACTIVE and these activation effects
    /// must be applied.
    Activated(Vec<HookEffect>),
    /// The relic waits for its unlock condition.
    Dormant,
    /// The relic was already owned; nothing changed.
    AlreadyOwned,
}

/// Result of [`RelicLifecycle::check_unlocks`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnlockReport {
    pub newly_pending: Vec<RelicId>,
    /// Predicates that failed to evaluate; each counts as "not met".
    pub failures: Vec<(RelicId, UnlockError)>,
}

/// Result of [`RelicLifecycle::notify_damage_applied`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DamageNotification {
    pub effects: Vec<HookEffect>,
    /// True when this event is the first lethal hit on this enemy this combat.
    pub killed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RelicError {
    #[error("relic '{0}' is not in the content table")]
    UnknownRelic(RelicId),

    #[error("relic limit of {limit} reached")]
    Full { limit: usize },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for RelicError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownRelic(_) | Self::Full { .. } => ErrorSeverity::Validation,
            Self::Oracle(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownRelic(_) => "RELIC_UNKNOWN",
            Self::Full { .. } => "RELIC_FULL",
            Self::Oracle(err) => err.error_code(),
        }
    }
}

/// Owned relics in acquisition order plus the deferred activation queue.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RelicLifecycle {
    owned: Vec<RelicRuntimeState>,
    pending: VecDeque<RelicId>,
    /// Enemies (slot, id) already credited with a kill this combat.
    slain: BTreeSet<(u8, String)>,
}

impl RelicLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Owned relics in acquisition order.
    pub fn owned(&self) -> &[RelicRuntimeState] {
        &self.owned
    }

    pub fn get(&self, id: &RelicId) -> Option<&RelicRuntimeState> {
        self.owned.iter().find(|relic| &relic.id == id)
    }

    pub fn owns(&self, id: &RelicId) -> bool {
        self.get(id).is_some()
    }

    pub fn state_of(&self, id: &RelicId) -> Option<RelicState> {
        self.get(id).map(RelicRuntimeState::state)
    }

    /// Relics waiting for [`Self::flush_pending_activations`], in unlock order.
    pub fn pending(&self) -> impl Iterator<Item = &RelicId> {
        self.pending.iter()
    }

    /// Adds `id` to the run.
    ///
    /// Unknown ids abort without mutation. Relics without an unlock condition
    /// activate immediately; the others capture `progress` as their baseline.
    pub fn grant(
        &mut self,
        id: &RelicId,
        source: RelicSource,
        node: NodeId,
        progress: &UnlockProgress,
        env: &GameEnv<'_>,
    ) -> Result<GrantOutcome, RelicError> {
        let behavior = env
            .relics()?
            .relic(id)
            .ok_or_else(|| RelicError::UnknownRelic(id.clone()))?;

        if self.owns(id) {
            return Ok(GrantOutcome::AlreadyOwned);
        }
        if self.owned.len() >= GameConfig::MAX_RELICS {
            return Err(RelicError::Full {
                limit: GameConfig::MAX_RELICS,
            });
        }

        if behavior.unlock().is_some() {
            self.owned.push(RelicRuntimeState {
                id: id.clone(),
                state: RelicState::Dormant,
                unlock_baseline: Some(progress.clone()),
                source,
                obtained_at_node: node,
                activated_at_node: None,
            });
            return Ok(GrantOutcome::Dormant);
        }

        self.owned.push(RelicRuntimeState {
            id: id.clone(),
            state: RelicState::Active,
            unlock_baseline: None,
            source,
            obtained_at_node: node,
            activated_at_node: Some(node),
        });
        Ok(GrantOutcome::Activated(activation_effects(behavior)))
    }

    /// Moves every dormant relic whose condition now holds to PENDING and
    /// queues it for activation. Activation itself is deferred.
    pub fn check_unlocks(
        &mut self,
        progress: &UnlockProgress,
        env: &GameEnv<'_>,
    ) -> Result<UnlockReport, OracleError> {
        let oracle = env.relics()?;
        let mut report = UnlockReport::default();

        for relic in &mut self.owned {
            if relic.state != RelicState::Dormant {
                continue;
            }
            let Some(baseline) = relic.unlock_baseline.as_ref() else {
                continue;
            };
            let Some(behavior) = oracle.relic(&relic.id) else {
                report
                    .failures
                    .push((relic.id.clone(), UnlockError::DefinitionMissing));
                continue;
            };
            let Some(predicate) = behavior.unlock() else {
                continue;
            };

            match predicate.is_met(progress, baseline) {
                Ok(true) => {
                    if relic.mark_pending() {
                        self.pending.push_back(relic.id.clone());
                        report.newly_pending.push(relic.id.clone());
                    }
                }
                Ok(false) => {}
                Err(err) => report.failures.push((relic.id.clone(), err)),
            }
        }

        Ok(report)
    }

    /// Activates every queued PENDING relic and returns its activation
    /// effects. A no-op when nothing is queued.
    pub fn flush_pending_activations(
        &mut self,
        node: NodeId,
        env: &GameEnv<'_>,
    ) -> Result<Vec<(RelicId, Vec<HookEffect>)>, OracleError> {
        if self.pending.is_empty() {
            return Ok(Vec::new());
        }
        let oracle = env.relics()?;
        let mut activated = Vec::with_capacity(self.pending.len());

        while let Some(id) = self.pending.pop_front() {
            let Some(relic) = self.owned.iter_mut().find(|relic| relic.id == id) else {
                continue;
            };
            if !relic.mark_active(node) {
                continue;
            }
            let effects = oracle.relic(&id).map(activation_effects).unwrap_or_default();
            activated.push((id, effects));
        }

        Ok(activated)
    }

    /// Behaviors of ACTIVE relics in acquisition order.
    fn active_behaviors<'a>(
        &'a self,
        env: &GameEnv<'a>,
    ) -> Result<impl Iterator<Item = &'a dyn RelicBehavior> + use<'a>, OracleError> {
        let oracle = env.relics()?;
        Ok(self
            .owned
            .iter()
            .filter(|relic| relic.is_active())
            .filter_map(move |relic| oracle.relic(&relic.id)))
    }

    /// Damage modifiers of ACTIVE relics in acquisition order.
    pub fn damage_modifiers<'a>(
        &'a self,
        env: &GameEnv<'a>,
    ) -> Result<Vec<&'a dyn DamageModifier>, OracleError> {
        Ok(self
            .active_behaviors(env)?
            .filter_map(|behavior| behavior.damage_modifier())
            .collect())
    }

    /// Folds every ACTIVE relic's modifier over `ctx` at its current phase.
    pub fn modify_damage(
        &self,
        ctx: DamageContext,
        env: &GameEnv<'_>,
    ) -> Result<DamageContext, OracleError> {
        Ok(fold_modifiers(ctx, self.damage_modifiers(env)?))
    }

    /// Resets per-combat bookkeeping and collects combat-start effects.
    pub fn begin_combat(&mut self, env: &GameEnv<'_>) -> Result<Vec<HookEffect>, OracleError> {
        self.slain.clear();
        Ok(self
            .active_behaviors(env)?
            .filter_map(|behavior| behavior.combat_start())
            .flat_map(|observer| observer.on_combat_start())
            .collect())
    }

    pub fn on_card_placed(
        &self,
        card: &CardId,
        env: &GameEnv<'_>,
    ) -> Result<Vec<HookEffect>, OracleError> {
        Ok(self
            .active_behaviors(env)?
            .filter_map(|behavior| behavior.card_placed())
            .flat_map(|observer| observer.on_card_placed(card))
            .collect())
    }

    pub fn on_upkeep(&self, turn: u32, env: &GameEnv<'_>) -> Result<Vec<HookEffect>, OracleError> {
        Ok(self
            .active_behaviors(env)?
            .filter_map(|behavior| behavior.upkeep())
            .flat_map(|observer| observer.on_upkeep(turn))
            .collect())
    }

    /// Notifies ACTIVE relics of damage that was subtracted from health.
    ///
    /// Kill observers fire at most once per enemy per combat, keyed by
    /// `(enemy_index, enemy_id)`. A lethal context without enemy identity is
    /// never credited as a kill.
    pub fn notify_damage_applied(
        &mut self,
        ctx: &DamageContext,
        applied: AppliedDamage,
        env: &GameEnv<'_>,
    ) -> Result<DamageNotification, OracleError> {
        let killed = ctx.target() == DamageTarget::Enemy
            && applied.is_lethal()
            && match (ctx.enemy_index(), ctx.enemy_id()) {
                (Some(index), Some(id)) => self.slain.insert((index, id.to_owned())),
                _ => false,
            };

        let mut effects = Vec::new();
        for observer in self
            .active_behaviors(env)?
            .filter_map(|behavior| behavior.damage_applied())
        {
            effects.extend(observer.on_damage_applied(ctx, &applied));
            if killed {
                effects.extend(observer.on_enemy_killed(ctx));
            }
        }

        Ok(DamageNotification { effects, killed })
    }
}

fn activation_effects(behavior: &dyn RelicBehavior) -> Vec<HookEffect> {
    behavior
        .activation()
        .map(|observer| observer.on_activate())
        .unwrap_or_default()
}
