/// Run configuration constants and tunable parameters.
///
/// Every field has a default so partially specified `config.toml` files load.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Upper bound of a deity's affinity points.
    pub max_faith_points: u8,
    /// Minimum points the focus deity needs before its patron effects apply.
    pub patron_threshold: u8,
    /// Fatigue added when the madness offer is accepted.
    pub madness_fatigue_cost: u32,
    /// Percentage of max hp restored by resting.
    pub rest_heal_percent: u32,
    /// Fatigue removed by the `recover` rest option.
    pub rest_fatigue_recovery: u32,
    /// Fatigue at or above which a rest site offers recovery.
    pub high_fatigue_threshold: u32,
    /// Gold charged by a shop for one card upgrade.
    pub upgrade_price: u32,
    /// Gold charged by a shop for one card removal.
    pub remove_price: u32,
    /// Gold charged by a forge for one synthesis.
    pub synth_price: u32,
    /// Damage taken in a single hit that counts as a "big hit".
    pub big_hit_threshold: i32,
    /// Cards cursed when a deity with a curse side effect turns hostile.
    pub curse_on_hostile_count: u8,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Number of deities offered at run start.
    pub const OFFERED_DEITIES: usize = 3;
    /// Upper bound on owned relics per run.
    pub const MAX_RELICS: usize = 64;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_FAITH_POINTS: u8 = 5;
    pub const DEFAULT_PATRON_THRESHOLD: u8 = 3;
    pub const DEFAULT_MADNESS_FATIGUE_COST: u32 = 3;

    pub const fn new() -> Self {
        Self {
            max_faith_points: Self::DEFAULT_MAX_FAITH_POINTS,
            patron_threshold: Self::DEFAULT_PATRON_THRESHOLD,
            madness_fatigue_cost: Self::DEFAULT_MADNESS_FATIGUE_COST,
            rest_heal_percent: 30,
            rest_fatigue_recovery: 2,
            high_fatigue_threshold: 6,
            upgrade_price: 75,
            remove_price: 50,
            synth_price: 40,
            big_hit_threshold: 12,
            curse_on_hostile_count: 2,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
