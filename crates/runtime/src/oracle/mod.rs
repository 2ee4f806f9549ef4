//! Runtime wrappers around static content oracles.
//!
//! These implementations expose `game-core` oracle traits and bundle them into
//! an [`OracleManager`] so the session can build [`GameEnv`] views on demand.
//! The data is immutable at runtime; dynamic state lives in
//! [`game_core::RunState`] and the repositories.
mod cards;
mod deities;
mod events;
mod relics;

use std::sync::Arc;

use game_content::{ContentFactory, LoadResult};
use game_core::{GameConfig, GameEnv, PcgRng};

pub use cards::CardOracleImpl;
pub use deities::DeityOracleImpl;
pub use events::EventOracleImpl;
pub use relics::RelicOracleImpl;

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) relics: Arc<RelicOracleImpl>,
    pub(crate) deities: Arc<DeityOracleImpl>,
    pub(crate) cards: Arc<CardOracleImpl>,
    pub(crate) events: Arc<EventOracleImpl>,
    pub(crate) config: Arc<GameConfig>,
    pub(crate) rng: PcgRng,
}

impl OracleManager {
    /// Creates a new oracle manager
    pub fn new(
        relics: Arc<RelicOracleImpl>,
        deities: Arc<DeityOracleImpl>,
        cards: Arc<CardOracleImpl>,
        events: Arc<EventOracleImpl>,
        config: Arc<GameConfig>,
    ) -> Self {
        Self {
            relics,
            deities,
            cards,
            events,
            config,
            rng: PcgRng, // PcgRng is stateless
        }
    }

    /// Loads every table from a content data directory.
    pub fn from_factory(factory: &ContentFactory) -> LoadResult<Self> {
        let config = factory.load_config()?;
        let relics = factory.load_relics()?.into_iter().collect();
        let deities = factory.load_deities()?.into_iter().collect();
        let cards = CardOracleImpl::from_catalog(factory.load_cards()?);
        let events = factory.load_events()?.into_iter().collect();

        Ok(Self::new(
            Arc::new(relics),
            Arc::new(deities),
            Arc::new(cards),
            Arc::new(events),
            Arc::new(config),
        ))
    }

    /// Converts oracle manager into GameEnv for game-core
    pub fn as_game_env(&self) -> GameEnv<'_> {
        GameEnv::with_all(
            self.relics.as_ref(),
            self.deities.as_ref(),
            self.cards.as_ref(),
            self.events.as_ref(),
            &self.rng,
            self.config.as_ref(),
        )
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn relics(&self) -> &RelicOracleImpl {
        &self.relics
    }

    pub fn deities(&self) -> &DeityOracleImpl {
        &self.deities
    }

    pub fn cards(&self) -> &CardOracleImpl {
        &self.cards
    }
}
