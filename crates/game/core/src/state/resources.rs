use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};

/// Run-wide resource counters outside of combat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Resources {
    pub hp: u32,
    pub max_hp: u32,
    pub gold: u32,
    pub fatigue: u32,
    pub supplies: u32,
}

impl Default for Resources {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_HP, Self::DEFAULT_GOLD)
    }
}

impl Resources {
    pub const DEFAULT_MAX_HP: u32 = 60;
    pub const DEFAULT_GOLD: u32 = 99;

    pub fn new(max_hp: u32, gold: u32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            gold,
            fatigue: 0,
            supplies: 0,
        }
    }

    pub fn can_afford(&self, price: u32) -> bool {
        self.gold >= price
    }

    /// Spends `price` gold, or fails without touching the purse.
    pub fn spend_gold(&mut self, price: u32) -> Result<(), ResourceError> {
        if !self.can_afford(price) {
            return Err(ResourceError::InsufficientGold {
                required: price,
                available: self.gold,
            });
        }
        self.gold -= price;
        Ok(())
    }

    pub fn gain_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    pub fn lose_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_sub(amount);
    }

    /// Heals up to `max_hp` and returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }

    pub fn heal_percent(&mut self, percent: u32) -> u32 {
        self.heal(self.max_hp.saturating_mul(percent) / 100)
    }

    pub fn lose_hp(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    /// Raises max hp and heals by the same amount.
    pub fn gain_max_hp(&mut self, amount: u32) {
        self.max_hp = self.max_hp.saturating_add(amount);
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
    }

    pub fn add_fatigue(&mut self, amount: u32) {
        self.fatigue = self.fatigue.saturating_add(amount);
    }

    pub fn reduce_fatigue(&mut self, amount: u32) {
        self.fatigue = self.fatigue.saturating_sub(amount);
    }

    pub fn gain_supplies(&mut self, amount: u32) {
        self.supplies = self.supplies.saturating_add(amount);
    }

    pub fn is_high_fatigue(&self, config: &GameConfig) -> bool {
        self.fatigue >= config.high_fatigue_threshold
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResourceError {
    #[error("not enough gold: need {required}, have {available}")]
    InsufficientGold { required: u32, available: u32 },
}

impl GameError for ResourceError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientGold { .. } => "RESOURCE_INSUFFICIENT_GOLD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spending_more_than_owned_leaves_gold_untouched() {
        let mut resources = Resources::new(50, 30);
        assert_eq!(
            resources.spend_gold(31),
            Err(ResourceError::InsufficientGold {
                required: 31,
                available: 30
            })
        );
        assert_eq!(resources.gold, 30);
        assert_eq!(resources.spend_gold(30), Ok(()));
        assert_eq!(resources.gold, 0);
    }

    #[test]
    fn heal_is_capped_at_max() {
        let mut resources = Resources::new(50, 0);
        resources.lose_hp(20);
        assert_eq!(resources.heal_percent(30), 15);
        assert_eq!(resources.heal(100), 5);
        assert_eq!(resources.hp, 50);
    }
}
