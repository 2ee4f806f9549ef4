use crate::effect::HookEffect;
use crate::ids::{EventId, RelicId};

/// Read-only narrative event table.
pub trait EventOracle: Send + Sync {
    fn event(&self, id: &EventId) -> Option<EventDefinition>;
}

/// A narrative event shown as an EVENT choice.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventDefinition {
    pub id: EventId,
    pub title: String,
    pub prompt: String,
    pub options: Vec<EventOption>,
}

impl EventDefinition {
    pub fn option(&self, key: &str) -> Option<&EventOption> {
        self.options.iter().find(|option| option.key == key)
    }
}

/// One selectable branch of an event.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventOption {
    pub key: String,
    pub label: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub detail: Option<String>,
    /// Gold required (and spent) to pick this branch.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost_gold: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<HookEffect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub grant_relic: Option<RelicId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub follow_up: Option<EventFollowUp>,
}

/// Card pick that replaces the event once the branch resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventFollowUp {
    UpgradeCard,
    RemoveCard,
    DuplicateCard,
}
