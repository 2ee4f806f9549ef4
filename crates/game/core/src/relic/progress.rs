use std::collections::BTreeMap;

/// Named run counters consumed by unlock conditions.
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
pub enum ProgressCounter {
    RestsTaken,
    EliteWins,
    CombatsWon,
    BigHitsTaken,
    Kills,
    EventPicks,
    NodesVisited,
    CardsPlaced,
    ShopPurchases,
    Synthesized,
}

/// Monotonically non-decreasing run counters.
///
/// Counters only grow; relic unlock baselines rely on it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UnlockProgress {
    counters: BTreeMap<ProgressCounter, u32>,
}

impl UnlockProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, counter: ProgressCounter) -> u32 {
        self.counters.get(&counter).copied().unwrap_or(0)
    }

    /// Adds `amount` to `counter` (saturating).
    pub fn add(&mut self, counter: ProgressCounter, amount: u32) {
        let value = self.counters.entry(counter).or_insert(0);
        *value = value.saturating_add(amount);
    }

    pub fn increment(&mut self, counter: ProgressCounter) {
        self.add(counter, 1);
    }

    /// Builder used by tests and scenario setup.
    #[must_use]
    pub fn with(mut self, counter: ProgressCounter, value: u32) -> Self {
        self.add(counter, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_counters_read_as_zero() {
        let progress = UnlockProgress::new();
        assert_eq!(progress.get(ProgressCounter::Kills), 0);
    }

    #[test]
    fn add_saturates() {
        let mut progress = UnlockProgress::new().with(ProgressCounter::Kills, u32::MAX - 1);
        progress.add(ProgressCounter::Kills, 5);
        assert_eq!(progress.get(ProgressCounter::Kills), u32::MAX);
    }

    #[test]
    fn counter_names_are_snake_case() {
        assert_eq!(ProgressCounter::EventPicks.as_ref(), "event_picks");
        assert_eq!(
            "big_hits_taken".parse::<ProgressCounter>(),
            Ok(ProgressCounter::BigHitsTaken)
        );
    }
}
