use std::collections::{BTreeMap, BTreeSet};

use crate::config::GameConfig;
use crate::damage::DamageModifier;
use crate::effect::HookEffect;
use crate::env::{GameEnv, OracleError};
use crate::error::{ErrorSeverity, GameError};
use crate::ids::DeityId;

use super::{MadnessBane, MadnessBoon, MadnessOutcome, MadnessResolution, MadnessTrack};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FaithError {
    #[error("deity '{0}' is offered more than once")]
    DuplicateOffer(DeityId),

    #[error("deity '{0}' is not one of the offered deities")]
    NotOffered(DeityId),

    #[error("a patron deity has already been chosen")]
    AlreadyChosen,

    #[error("madness is not available ({0:?})")]
    MadnessUnavailable(MadnessTrack),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for FaithError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DuplicateOffer(_) | Self::NotOffered(_) => ErrorSeverity::Validation,
            Self::AlreadyChosen | Self::MadnessUnavailable(_) => ErrorSeverity::Validation,
            Self::Oracle(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateOffer(_) => "FAITH_DUPLICATE_OFFER",
            Self::NotOffered(_) => "FAITH_NOT_OFFERED",
            Self::AlreadyChosen => "FAITH_ALREADY_CHOSEN",
            Self::MadnessUnavailable(_) => "FAITH_MADNESS_UNAVAILABLE",
            Self::Oracle(err) => err.error_code(),
        }
    }
}

/// Result of [`FaithState::set_hostile`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostileOutcome {
    /// The deity just turned hostile; its one-time effects are owed.
    Newly,
    Already,
}

/// Per-run faith bookkeeping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FaithState {
    offered: Vec<DeityId>,
    points: BTreeMap<DeityId, u8>,
    focus: Option<DeityId>,
    last_focus: Option<DeityId>,
    /// Append-only.
    hostile: BTreeSet<DeityId>,
    chosen: bool,
    madness: MadnessTrack,
}

impl FaithState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixes the three offered deities for the run.
    pub fn offer(
        &mut self,
        deities: [DeityId; GameConfig::OFFERED_DEITIES],
    ) -> Result<(), FaithError> {
        if self.chosen {
            return Err(FaithError::AlreadyChosen);
        }
        for (i, deity) in deities.iter().enumerate() {
            if deities[..i].contains(deity) {
                return Err(FaithError::DuplicateOffer(deity.clone()));
            }
        }
        self.points = deities.iter().map(|deity| (deity.clone(), 0)).collect();
        self.offered = deities.into();
        self.focus = None;
        self.last_focus = None;
        Ok(())
    }

    /// Run-start pick: the chosen deity gets maximum points, the others zero.
    pub fn choose(&mut self, deity: &DeityId, config: &GameConfig) -> Result<(), FaithError> {
        if self.chosen {
            return Err(FaithError::AlreadyChosen);
        }
        self.ensure_offered(deity)?;

        for (id, points) in &mut self.points {
            *points = if id == deity { config.max_faith_points } else { 0 };
        }
        self.focus = Some(deity.clone());
        self.last_focus = Some(deity.clone());
        self.hostile.clear();
        self.chosen = true;
        Ok(())
    }

    pub fn offered(&self) -> &[DeityId] {
        &self.offered
    }

    pub fn is_offered(&self, deity: &DeityId) -> bool {
        self.offered.contains(deity)
    }

    pub fn chosen(&self) -> bool {
        self.chosen
    }

    pub fn points(&self, deity: &DeityId) -> u8 {
        self.points.get(deity).copied().unwrap_or(0)
    }

    pub fn total_points(&self) -> u32 {
        self.points.values().map(|&points| u32::from(points)).sum()
    }

    pub fn focus(&self) -> Option<&DeityId> {
        self.focus.as_ref()
    }

    pub fn last_focus(&self) -> Option<&DeityId> {
        self.last_focus.as_ref()
    }

    pub fn is_hostile(&self, deity: &DeityId) -> bool {
        self.hostile.contains(deity)
    }

    /// Hostile deities in offered order.
    pub fn hostile(&self) -> impl Iterator<Item = &DeityId> {
        self.offered.iter().filter(|deity| self.hostile.contains(*deity))
    }

    pub fn madness(&self) -> &MadnessTrack {
        &self.madness
    }

    /// Recomputes the focus among non-hostile offered deities.
    ///
    /// Ties prefer the previous focus, then `rising`, then offered order.
    pub fn recompute_focus(&mut self, rising: Option<&DeityId>) -> Option<&DeityId> {
        let candidates: Vec<&DeityId> = self
            .offered
            .iter()
            .filter(|deity| !self.hostile.contains(*deity))
            .collect();

        let next = candidates
            .iter()
            .map(|deity| self.points(deity))
            .max()
            .and_then(|best| {
                let tied: Vec<&DeityId> = candidates
                    .iter()
                    .copied()
                    .filter(|deity| self.points(deity) == best)
                    .collect();
                if let [only] = tied.as_slice() {
                    return Some(*only);
                }
                self.last_focus
                    .as_ref()
                    .filter(|last| tied.contains(last))
                    .or_else(|| rising.filter(|rising| tied.contains(rising)))
                    .or_else(|| tied.first().copied())
            })
            .cloned();

        if let Some(focus) = &next {
            self.last_focus = Some(focus.clone());
        }
        self.focus = next;
        self.focus.as_ref()
    }

    /// Moves one point from the current focus to `tempter`.
    ///
    /// A no-op (returning false) when the tempter is the focus, is not offered,
    /// or when no point can move without leaving `0..=max`. Total points are
    /// conserved either way.
    pub fn accept_temptation(&mut self, tempter: &DeityId, config: &GameConfig) -> bool {
        let Some(focus) = self.focus.clone() else {
            return false;
        };
        if &focus == tempter || !self.is_offered(tempter) {
            return false;
        }
        if self.points(&focus) == 0 || self.points(tempter) >= config.max_faith_points {
            return false;
        }

        if let Some(points) = self.points.get_mut(tempter) {
            *points += 1;
        }
        if let Some(points) = self.points.get_mut(&focus) {
            *points -= 1;
        }
        self.recompute_focus(Some(tempter));
        true
    }

    /// The focus deity if it has reached the patron threshold and is not
    /// hostile.
    pub fn patron(&self, config: &GameConfig) -> Option<&DeityId> {
        self.focus.as_ref().filter(|focus| {
            self.points(focus) >= config.patron_threshold && !self.hostile.contains(*focus)
        })
    }

    /// Marks `deity` hostile for the rest of the run and recomputes the focus.
    pub fn set_hostile(&mut self, deity: &DeityId) -> Result<HostileOutcome, FaithError> {
        self.ensure_offered(deity)?;
        if !self.hostile.insert(deity.clone()) {
            return Ok(HostileOutcome::Already);
        }
        self.recompute_focus(None);
        Ok(HostileOutcome::Newly)
    }

    /// Fires the madness trigger. Returns false if it already fired.
    pub fn awaken_madness(&mut self) -> bool {
        self.madness.awaken()
    }

    pub fn should_offer_madness(&self) -> bool {
        self.madness.should_offer()
    }

    /// Marks the madness offer as shown.
    pub fn take_madness_offer(
        &mut self,
        boon: MadnessBoon,
        bane: MadnessBane,
    ) -> Result<(), FaithError> {
        if self.madness.take_offer(boon, bane) {
            Ok(())
        } else {
            Err(FaithError::MadnessUnavailable(self.madness))
        }
    }

    /// Accepts madness: pays the fatigue cost, takes the boon and betrays the
    /// current focus.
    pub fn accept_madness(
        &mut self,
        boon: MadnessBoon,
        config: &GameConfig,
    ) -> Result<MadnessResolution, FaithError> {
        let outcome = MadnessOutcome::Accepted(boon);
        if !self.madness.consume(outcome) {
            return Err(FaithError::MadnessUnavailable(self.madness));
        }

        let mut effects = vec![HookEffect::AddFatigue(config.madness_fatigue_cost)];
        effects.extend(boon.immediate_effects());

        let mut betrayed = None;
        if let Some(focus) = self.focus.clone()
            && self.set_hostile(&focus)? == HostileOutcome::Newly
        {
            betrayed = Some(focus);
        }

        Ok(MadnessResolution {
            outcome,
            effects,
            betrayed,
        })
    }

    /// Rejects madness: the track itself turns hostile and the bane applies.
    pub fn reject_madness(
        &mut self,
        bane: MadnessBane,
        gold: u32,
    ) -> Result<MadnessResolution, FaithError> {
        let outcome = MadnessOutcome::Rejected(bane);
        if !self.madness.consume(outcome) {
            return Err(FaithError::MadnessUnavailable(self.madness));
        }
        Ok(MadnessResolution {
            outcome,
            effects: bane.immediate_effects(gold),
            betrayed: None,
        })
    }

    /// Faith damage modifiers in fold order: patron, hostile deities in
    /// offered order, then the madness boon or bane.
    pub fn damage_modifiers<'a>(
        &'a self,
        env: &GameEnv<'a>,
    ) -> Result<Vec<&'a dyn DamageModifier>, OracleError> {
        let mut modifiers = Vec::new();
        if self.offered.is_empty() && !self.madness.is_consumed() {
            return Ok(modifiers);
        }
        let oracle = env.deities()?;

        if let Some(patron) = self.patron(env.config()).and_then(|id| oracle.deity(id)) {
            modifiers.extend(patron.patron_modifier());
        }
        for deity in self.hostile().filter_map(|id| oracle.deity(id)) {
            modifiers.extend(deity.hostile_modifier());
        }
        modifiers.extend(self.madness.modifier());
        Ok(modifiers)
    }

    /// Combat-start effects of the patron and of every hostile deity.
    pub fn combat_start_effects(&self, env: &GameEnv<'_>) -> Result<Vec<HookEffect>, OracleError> {
        if self.offered.is_empty() {
            return Ok(Vec::new());
        }
        let oracle = env.deities()?;
        let mut effects = Vec::new();

        if let Some(observer) = self
            .patron(env.config())
            .and_then(|id| oracle.deity(id))
            .and_then(|deity| deity.patron_combat_start())
        {
            effects.extend(observer.on_combat_start());
        }
        for observer in self
            .hostile()
            .filter_map(|id| oracle.deity(id))
            .filter_map(|deity| deity.hostile_combat_start())
        {
            effects.extend(observer.on_combat_start());
        }
        Ok(effects)
    }

    /// One-time effects owed by a deity that just turned hostile.
    pub fn hostility_effects(
        deity: &DeityId,
        env: &GameEnv<'_>,
    ) -> Result<Vec<HookEffect>, OracleError> {
        Ok(env
            .deities()?
            .deity(deity)
            .map(|behavior| behavior.on_became_hostile())
            .unwrap_or_default())
    }

    fn ensure_offered(&self, deity: &DeityId) -> Result<(), FaithError> {
        if self.is_offered(deity) {
            Ok(())
        } else {
            Err(FaithError::NotOffered(deity.clone()))
        }
    }
}
