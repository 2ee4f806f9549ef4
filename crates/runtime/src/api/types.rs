//! Requests exchanged with the exploration and combat engines.

use serde::{Deserialize, Serialize};

use game_core::{CardId, ChoiceKind, DeityId, EventId, GameConfig, RelicId, RelicSource, Resources};

/// Parameters of a new run.
#[derive(Clone, Debug)]
pub struct RunSetup {
    pub seed: u64,
    /// Deities offered at run start. Drawn from the deity table when absent.
    pub offered: Option<[DeityId; GameConfig::OFFERED_DEITIES]>,
    pub starting_relics: Vec<RelicId>,
    pub resources: Resources,
}

impl RunSetup {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            offered: None,
            starting_relics: Vec::new(),
            resources: Resources::default(),
        }
    }

    #[must_use]
    pub fn with_offered(mut self, offered: [DeityId; GameConfig::OFFERED_DEITIES]) -> Self {
        self.offered = Some(offered);
        self
    }

    #[must_use]
    pub fn with_relic(mut self, relic: impl Into<RelicId>) -> Self {
        self.starting_relics.push(relic.into());
        self
    }

    #[must_use]
    pub fn with_resources(mut self, resources: Resources) -> Self {
        self.resources = resources;
        self
    }
}

/// Kind of exploration node being entered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Rest,
    Shop,
    Event(EventId),
    Shrine,
    Forge,
    Treasure,
    Combat { elite: bool, boss: bool },
}

/// Combat encounter requested from the combat engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    pub elite: bool,
    pub boss: bool,
}

impl Encounter {
    pub const fn relic_source(self) -> RelicSource {
        if self.boss {
            RelicSource::Boss
        } else if self.elite {
            RelicSource::Elite
        } else {
            RelicSource::Reward
        }
    }
}

/// What the caller must do after entering a node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeRequest {
    /// A choice was opened; render it and feed keys to `dispatch`.
    Choice(ChoiceKind),
    /// Hand control to the combat engine.
    StartCombat(Encounter),
    /// The node had nothing to offer.
    Nothing,
}

/// Spoils reported by the combat engine after a victory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CombatReward {
    pub gold: u32,
    pub cards: Vec<CardId>,
    pub relics: Vec<RelicId>,
}
