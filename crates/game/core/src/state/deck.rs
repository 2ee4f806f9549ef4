use std::collections::BTreeSet;

use crate::env::{CardDefinition, OracleError};
use crate::error::{ErrorSeverity, GameError};
use crate::ids::CardId;

/// Closed set of markers a card instance can carry.
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
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CardTag {
    /// Applied by hostile deities; cannot be removed by synthesis.
    Cursed,
    /// Result of a synthesis.
    Fused,
    Retain,
    Innate,
    Swift,
    Exhaust,
}

impl CardTag {
    /// Tags a synthesis may add to the fused card.
    pub const SYNTHESIS: [CardTag; 3] = [CardTag::Retain, CardTag::Innate, CardTag::Swift];
}

/// A card owned by the run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CardInstance {
    pub card: CardId,
    pub upgraded: bool,
    pub tags: BTreeSet<CardTag>,
}

impl CardInstance {
    pub fn new(card: impl Into<CardId>) -> Self {
        Self {
            card: card.into(),
            upgraded: false,
            tags: BTreeSet::new(),
        }
    }

    pub fn from_definition(definition: &CardDefinition) -> Self {
        Self {
            card: definition.id.clone(),
            upgraded: false,
            tags: definition.tags.iter().copied().collect(),
        }
    }

    pub fn has_tag(&self, tag: CardTag) -> bool {
        self.tags.contains(&tag)
    }

    pub fn is_cursed(&self) -> bool {
        self.has_tag(CardTag::Cursed)
    }

    /// Synthesis tags this card does not carry yet.
    pub fn synthesis_candidates(&self) -> Vec<CardTag> {
        CardTag::SYNTHESIS
            .into_iter()
            .filter(|tag| !self.has_tag(*tag))
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DeckError {
    #[error("card index {index} is out of range (deck size {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("card '{0}' is not in the content table")]
    UnknownCard(CardId),

    #[error("card at index {0} cannot be upgraded")]
    NotUpgradeable(usize),

    #[error("synthesis needs two different cards (got index {0} twice)")]
    SameCard(usize),

    #[error("tag '{0}' cannot be added by synthesis")]
    InvalidSynthesisTag(CardTag),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for DeckError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Oracle(err) => err.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::IndexOutOfRange { .. } => "DECK_INDEX_OUT_OF_RANGE",
            Self::UnknownCard(_) => "DECK_UNKNOWN_CARD",
            Self::NotUpgradeable(_) => "DECK_NOT_UPGRADEABLE",
            Self::SameCard(_) => "DECK_SAME_CARD",
            Self::InvalidSynthesisTag(_) => "DECK_INVALID_SYNTHESIS_TAG",
            Self::Oracle(err) => err.error_code(),
        }
    }
}
