use crate::ids::CardId;
use crate::state::CardTag;

/// Read-only card table. Card play rules live in the combat engine; the core
/// only needs names, prices and upgrade eligibility.
pub trait CardOracle: Send + Sync {
    fn card(&self, id: &CardId) -> Option<CardDefinition>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardDefinition {
    pub id: CardId,
    pub name: String,
    pub cost: u8,
    /// Base shop price in gold.
    pub price: u32,
    #[cfg_attr(feature = "serde", serde(default = "default_upgradeable"))]
    pub upgradeable: bool,
    /// Tags every fresh copy of this card starts with.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<CardTag>,
}

#[cfg(feature = "serde")]
fn default_upgradeable() -> bool {
    true
}

impl CardDefinition {
    pub fn new(id: impl Into<CardId>, name: impl Into<String>, cost: u8, price: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cost,
            price,
            upgradeable: true,
            tags: Vec::new(),
        }
    }
}
