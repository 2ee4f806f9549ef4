//! Traits describing read-only content tables.
//!
//! Oracles expose relic, deity, card and event definitions plus deterministic
//! randomness. The [`GameEnv`] aggregate bundles them with the run
//! configuration so rules can reach everything they need without coupling to
//! concrete implementations. The core never mutates content; it only derives
//! per-run instances from it.
mod cards;
mod deities;
mod error;
mod events;
mod relics;
mod rng;

pub use cards::{CardDefinition, CardOracle};
pub use deities::DeityOracle;
pub use error::OracleError;
pub use events::{EventDefinition, EventFollowUp, EventOption, EventOracle};
pub use relics::RelicOracle;
pub use rng::{PcgRng, RngOracle, compute_seed};

use crate::config::GameConfig;

static DEFAULT_CONFIG: GameConfig = GameConfig::new();

/// Aggregates read-only oracles required by the rules.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    relics: Option<&'a dyn RelicOracle>,
    deities: Option<&'a dyn DeityOracle>,
    cards: Option<&'a dyn CardOracle>,
    events: Option<&'a dyn EventOracle>,
    rng: Option<&'a dyn RngOracle>,
    config: &'a GameConfig,
}

impl<'a> GameEnv<'a> {
    pub fn new(
        relics: Option<&'a dyn RelicOracle>,
        deities: Option<&'a dyn DeityOracle>,
        cards: Option<&'a dyn CardOracle>,
        events: Option<&'a dyn EventOracle>,
        rng: Option<&'a dyn RngOracle>,
        config: &'a GameConfig,
    ) -> Self {
        Self {
            relics,
            deities,
            cards,
            events,
            rng,
            config,
        }
    }

    pub fn with_all(
        relics: &'a dyn RelicOracle,
        deities: &'a dyn DeityOracle,
        cards: &'a dyn CardOracle,
        events: &'a dyn EventOracle,
        rng: &'a dyn RngOracle,
        config: &'a GameConfig,
    ) -> Self {
        Self::new(
            Some(relics),
            Some(deities),
            Some(cards),
            Some(events),
            Some(rng),
            config,
        )
    }

    /// Environment with no oracles and the default configuration.
    pub fn empty() -> Self {
        Self {
            relics: None,
            deities: None,
            cards: None,
            events: None,
            rng: None,
            config: &DEFAULT_CONFIG,
        }
    }

    /// Returns the RelicOracle, or an error if not available.
    pub fn relics(&self) -> Result<&'a dyn RelicOracle, OracleError> {
        self.relics.ok_or(OracleError::RelicsNotAvailable)
    }

    /// Returns the DeityOracle, or an error if not available.
    pub fn deities(&self) -> Result<&'a dyn DeityOracle, OracleError> {
        self.deities.ok_or(OracleError::DeitiesNotAvailable)
    }

    /// Returns the CardOracle, or an error if not available.
    pub fn cards(&self) -> Result<&'a dyn CardOracle, OracleError> {
        self.cards.ok_or(OracleError::CardsNotAvailable)
    }

    /// Returns the EventOracle, or an error if not available.
    pub fn events(&self) -> Result<&'a dyn EventOracle, OracleError> {
        self.events.ok_or(OracleError::EventsNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    pub fn rng(&self) -> Result<&'a dyn RngOracle, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }
}

impl core::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GameEnv")
            .field("relics", &self.relics.is_some())
            .field("deities", &self.deities.is_some())
            .field("cards", &self.cards.is_some())
            .field("events", &self.events.is_some())
            .field("rng", &self.rng.is_some())
            .field("config", self.config)
            .finish()
    }
}
