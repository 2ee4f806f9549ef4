use crate::error::{ErrorSeverity, GameError};

use super::{ProgressCounter, UnlockProgress};

/// Capability deciding whether a dormant relic may activate.
///
/// `current` and `baseline` are full progress snapshots; implementations
/// reason about the delta between them. An `Err` is treated as "not met".
pub trait UnlockPredicate {
    fn is_met(
        &self,
        current: &UnlockProgress,
        baseline: &UnlockProgress,
    ) -> Result<bool, UnlockError>;
}

/// Failure while evaluating an unlock predicate. Never propagated past the
/// lifecycle; reported so the runtime can log it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnlockError {
    #[error("baseline {baseline} for {counter} is ahead of current value {current}")]
    BaselineAhead {
        counter: ProgressCounter,
        baseline: u32,
        current: u32,
    },

    #[error("malformed unlock condition: {0}")]
    Malformed(String),

    #[error("relic definition disappeared from the content table")]
    DefinitionMissing,
}

impl GameError for UnlockError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::BaselineAhead { .. } => "UNLOCK_BASELINE_AHEAD",
            Self::Malformed(_) => "UNLOCK_MALFORMED",
            Self::DefinitionMissing => "UNLOCK_DEFINITION_MISSING",
        }
    }
}

/// Data-driven unlock condition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnlockCondition {
    /// `current[counter] - baseline[counter] >= at_least`
    CounterDelta {
        counter: ProgressCounter,
        at_least: u32,
    },
    /// `current[counter] >= value`, regardless of the baseline.
    CounterReaches {
        counter: ProgressCounter,
        value: u32,
    },
    All(Vec<UnlockCondition>),
    Any(Vec<UnlockCondition>),
}

impl UnlockCondition {
    pub const fn delta(counter: ProgressCounter, at_least: u32) -> Self {
        Self::CounterDelta { counter, at_least }
    }

    pub const fn reaches(counter: ProgressCounter, value: u32) -> Self {
        Self::CounterReaches { counter, value }
    }
}

impl UnlockPredicate for UnlockCondition {
    fn is_met(
        &self,
        current: &UnlockProgress,
        baseline: &UnlockProgress,
    ) -> Result<bool, UnlockError> {
        match self {
            UnlockCondition::CounterDelta { counter, at_least } => {
                let now = current.get(*counter);
                let then = baseline.get(*counter);
                let gained = now.checked_sub(then).ok_or(UnlockError::BaselineAhead {
                    counter: *counter,
                    baseline: then,
                    current: now,
                })?;
                Ok(gained >= *at_least)
            }
            UnlockCondition::CounterReaches { counter, value } => {
                Ok(current.get(*counter) >= *value)
            }
            UnlockCondition::All(parts) | UnlockCondition::Any(parts) if parts.is_empty() => Err(
                UnlockError::Malformed("composite condition has no parts".to_owned()),
            ),
            UnlockCondition::All(parts) => {
                for part in parts {
                    if !part.is_met(current, baseline)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            UnlockCondition::Any(parts) => {
                for part in parts {
                    if part.is_met(current, baseline)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_is_measured_from_baseline() {
        let condition = UnlockCondition::delta(ProgressCounter::EventPicks, 3);
        let baseline = UnlockProgress::new().with(ProgressCounter::EventPicks, 2);

        let current = UnlockProgress::new().with(ProgressCounter::EventPicks, 4);
        assert_eq!(condition.is_met(&current, &baseline), Ok(false));

        let current = UnlockProgress::new().with(ProgressCounter::EventPicks, 5);
        assert_eq!(condition.is_met(&current, &baseline), Ok(true));
    }

    #[test]
    fn reaches_ignores_baseline() {
        let condition = UnlockCondition::reaches(ProgressCounter::EventPicks, 3);
        let baseline = UnlockProgress::new().with(ProgressCounter::EventPicks, 2);
        let current = UnlockProgress::new().with(ProgressCounter::EventPicks, 3);
        assert_eq!(condition.is_met(&current, &baseline), Ok(true));
    }

    #[test]
    fn baseline_ahead_is_an_error() {
        let condition = UnlockCondition::delta(ProgressCounter::Kills, 1);
        let baseline = UnlockProgress::new().with(ProgressCounter::Kills, 3);
        let result = condition.is_met(&UnlockProgress::new(), &baseline);
        assert!(matches!(result, Err(UnlockError::BaselineAhead { .. })));
    }

    #[test]
    fn empty_composite_is_malformed() {
        let result =
            UnlockCondition::All(vec![]).is_met(&UnlockProgress::new(), &UnlockProgress::new());
        assert!(matches!(result, Err(UnlockError::Malformed(_))));
    }

    #[test]
    fn any_short_circuits() {
        let condition = UnlockCondition::Any(vec![
            UnlockCondition::delta(ProgressCounter::RestsTaken, 1),
            UnlockCondition::delta(ProgressCounter::EliteWins, 1),
        ]);
        let current = UnlockProgress::new().with(ProgressCounter::EliteWins, 1);
        assert_eq!(condition.is_met(&current, &UnlockProgress::new()), Ok(true));
    }
}
