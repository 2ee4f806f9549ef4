//! Phase-tagged damage record.

/// Who receives the damage.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageTarget {
    Player,
    Enemy,
}

/// What produced the damage.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageSource {
    PlayerAttack,
    EnemyAttack,
    Fatigue,
    Other,
}

/// Stage of the canonical damage sequence.
///
/// Status effects (vulnerable, weak, ...) are applied by the combat engine
/// between `PreStatus` and `PostStatus`; block is subtracted between
/// `PreBlock` and `PostBlock`.
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
pub enum DamagePhase {
    PreStatus,
    PostStatus,
    PreBlock,
    PostBlock,
    Final,
}

impl DamagePhase {
    /// Canonical evaluation order.
    pub const ORDER: [DamagePhase; 5] = [
        DamagePhase::PreStatus,
        DamagePhase::PostStatus,
        DamagePhase::PreBlock,
        DamagePhase::PostBlock,
        DamagePhase::Final,
    ];

    /// Phases from `self` (inclusive) to `Final`.
    pub fn remaining(self) -> impl Iterator<Item = DamagePhase> {
        Self::ORDER.into_iter().filter(move |phase| *phase >= self)
    }
}

/// Immutable damage record; only `current` changes, and only by producing a
/// new context through [`DamageContext::with_current`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageContext {
    target: DamageTarget,
    source: DamageSource,
    phase: DamagePhase,
    raw: i32,
    current: i32,
    reason: Option<String>,
    enemy_index: Option<u8>,
    enemy_id: Option<String>,
}

impl DamageContext {
    /// Creates a context whose `current` starts at `raw` (clamped to zero).
    pub fn new(target: DamageTarget, source: DamageSource, phase: DamagePhase, raw: i32) -> Self {
        Self {
            target,
            source,
            phase,
            raw,
            current: raw.max(0),
            reason: None,
            enemy_index: None,
            enemy_id: None,
        }
    }

    /// Attaches a reason tag (builder pattern).
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches the enemy slot and id involved in this event (builder pattern).
    #[must_use]
    pub fn with_enemy(mut self, index: u8, id: impl Into<String>) -> Self {
        self.enemy_index = Some(index);
        self.enemy_id = Some(id.into());
        self
    }

    /// Returns the successor context with a new `current`, clamped to zero.
    #[must_use]
    pub fn with_current(&self, current: i32) -> Self {
        Self {
            current: current.max(0),
            ..self.clone()
        }
    }

    /// Returns the successor context re-tagged for `phase`.
    #[must_use]
    pub fn at_phase(&self, phase: DamagePhase) -> Self {
        Self {
            phase,
            ..self.clone()
        }
    }

    pub fn target(&self) -> DamageTarget {
        self.target
    }

    pub fn source(&self) -> DamageSource {
        self.source
    }

    pub fn phase(&self) -> DamagePhase {
        self.phase
    }

    pub fn raw(&self) -> i32 {
        self.raw
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn enemy_index(&self) -> Option<u8> {
        self.enemy_index
    }

    pub fn enemy_id(&self) -> Option<&str> {
        self.enemy_id.as_deref()
    }
}
