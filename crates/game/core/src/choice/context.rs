use crate::faith::{MadnessBane, MadnessBoon};
use crate::ids::{CardId, DeityId, EventId, NodeId, RelicId};
use crate::relic::RelicSource;
use crate::state::CardTag;

use super::ChoiceKind;

/// Where an upgrade or removal pick was opened from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PickOrigin {
    /// Paid service; the price is charged when a card is picked.
    Shop { price: u32 },
    Rest,
    Event,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PickPurpose {
    Duplicate,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pile {
    #[default]
    Deck,
    Cursed,
}

/// A card for sale.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShopOffer {
    pub card: CardId,
    pub price: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sold: bool,
}

/// Stock and service prices of one shop visit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShopStock {
    pub offers: Vec<ShopOffer>,
    pub upgrade_price: u32,
    pub remove_price: u32,
}

/// Typed payload bound to an open choice.
///
/// Each variant corresponds to exactly one [`ChoiceKind`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChoiceContext {
    GodChoice {
        offered: Vec<DeityId>,
    },
    Rest {
        high_fatigue: bool,
    },
    Event {
        event: EventId,
    },
    Shop {
        node: NodeId,
        stock: ShopStock,
    },
    Reward {
        cards: Vec<CardId>,
    },
    RelicOffer {
        relics: Vec<RelicId>,
        source: RelicSource,
    },
    UpgradePick {
        origin: PickOrigin,
    },
    RemovePick {
        origin: PickOrigin,
    },
    GodTempt {
        tempter: DeityId,
    },
    MadnessTempt {
        boon: MadnessBoon,
        bane: MadnessBane,
    },
    /// First step picks `first`, second step picks the card fused into it.
    SynthPick {
        first: Option<usize>,
    },
    SynthTag {
        first: usize,
        second: usize,
        tags: Vec<CardTag>,
    },
    PickCard {
        purpose: PickPurpose,
    },
    ViewPile {
        pile: Pile,
    },
}

impl ChoiceContext {
    pub const fn kind(&self) -> ChoiceKind {
        match self {
            Self::GodChoice { .. } => ChoiceKind::GodChoice,
            Self::Rest { .. } => ChoiceKind::Rest,
            Self::Event { .. } => ChoiceKind::Event,
            Self::Shop { .. } => ChoiceKind::Shop,
            Self::Reward { .. } => ChoiceKind::Reward,
            Self::RelicOffer { .. } => ChoiceKind::RelicOffer,
            Self::UpgradePick { .. } => ChoiceKind::UpgradePick,
            Self::RemovePick { .. } => ChoiceKind::RemovePick,
            Self::GodTempt { .. } => ChoiceKind::GodTempt,
            Self::MadnessTempt { .. } => ChoiceKind::MadnessTempt,
            Self::SynthPick { .. } => ChoiceKind::SynthPick,
            Self::SynthTag { .. } => ChoiceKind::SynthTag,
            Self::PickCard { .. } => ChoiceKind::PickCard,
            Self::ViewPile { .. } => ChoiceKind::ViewPile,
        }
    }
}
