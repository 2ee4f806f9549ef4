use game_core::{
    ActivationObserver, CardId, CardPlacedObserver, CombatStartObserver, HookEffect,
    UpkeepObserver,
};

/// Fixed list of effects emitted whenever the owning hook fires.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EffectList(pub Vec<HookEffect>);

impl EffectList {
    pub fn new(effects: impl IntoIterator<Item = HookEffect>) -> Self {
        Self(effects.into_iter().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn effects(&self) -> Vec<HookEffect> {
        self.0.clone()
    }

    /// `Some(self)` when there is anything to emit.
    pub(crate) fn non_empty(&self) -> Option<&Self> {
        (!self.is_empty()).then_some(self)
    }
}

impl ActivationObserver for EffectList {
    fn on_activate(&self) -> Vec<HookEffect> {
        self.effects()
    }
}

impl CombatStartObserver for EffectList {
    fn on_combat_start(&self) -> Vec<HookEffect> {
        self.effects()
    }
}

impl UpkeepObserver for EffectList {
    fn on_upkeep(&self, _turn: u32) -> Vec<HookEffect> {
        self.effects()
    }
}

/// Effects emitted when a card is placed, optionally only for one card.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardTrigger {
    #[cfg_attr(feature = "serde", serde(default))]
    pub card: Option<CardId>,
    pub effects: Vec<HookEffect>,
}

impl CardPlacedObserver for CardTrigger {
    fn on_card_placed(&self, card: &CardId) -> Vec<HookEffect> {
        match &self.card {
            Some(only) if only != card => Vec::new(),
            _ => self.effects.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_trigger_filters_by_card() {
        let trigger = CardTrigger {
            card: Some(CardId::new("bash")),
            effects: vec![HookEffect::GainBlock(2)],
        };
        assert!(trigger.on_card_placed(&CardId::new("strike")).is_empty());
        assert_eq!(
            trigger.on_card_placed(&CardId::new("bash")),
            vec![HookEffect::GainBlock(2)]
        );
    }
}
