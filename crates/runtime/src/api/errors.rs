//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the rules, content lookups, and repositories so
//! clients can bubble them up with consistent context.

use thiserror::Error;

use game_core::{
    ChoiceError, ChoiceKind, DeckError, DeityId, ErrorSeverity, EventId, FaithError, GameError,
    OracleError, RelicError, ResourceError,
};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Choice(#[from] ChoiceError),

    #[error(transparent)]
    Relic(#[from] RelicError),

    #[error(transparent)]
    Faith(#[from] FaithError),

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error(transparent)]
    Deck(#[from] DeckError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("event '{0}' is not in the content table")]
    UnknownEvent(EventId),

    #[error("deity '{0}' is not in the content table")]
    UnknownDeity(DeityId),

    #[error("{kind} cannot use '{key}' right now")]
    InvalidSelection { kind: ChoiceKind, key: String },

    #[error("{0}")]
    Unavailable(&'static str),

    #[error("a choice is still open")]
    ChoicePending,

    #[error("combat is in progress")]
    InCombat,

    #[error("no combat is in progress")]
    NotInCombat,

    #[error("content offers {found} deities, a run needs {required}")]
    NotEnoughDeities { found: usize, required: usize },

    #[error("snapshot version {found} is not supported (expected {expected})")]
    UnsupportedSnapshot { found: u32, expected: u32 },
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Choice(err) => err.severity(),
            Self::Relic(err) => err.severity(),
            Self::Faith(err) => err.severity(),
            Self::Resource(err) => err.severity(),
            Self::Deck(err) => err.severity(),
            Self::Oracle(err) => err.severity(),
            Self::Repository(_) | Self::UnsupportedSnapshot { .. } => ErrorSeverity::Fatal,
            Self::Unavailable(_) => ErrorSeverity::Recoverable,
            Self::UnknownEvent(_)
            | Self::UnknownDeity(_)
            | Self::InvalidSelection { .. }
            | Self::ChoicePending
            | Self::InCombat
            | Self::NotInCombat => ErrorSeverity::Validation,
            Self::NotEnoughDeities { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Choice(err) => err.error_code(),
            Self::Relic(err) => err.error_code(),
            Self::Faith(err) => err.error_code(),
            Self::Resource(err) => err.error_code(),
            Self::Deck(err) => err.error_code(),
            Self::Oracle(err) => err.error_code(),
            Self::Repository(_) => "RUNTIME_REPOSITORY",
            Self::UnknownEvent(_) => "RUNTIME_UNKNOWN_EVENT",
            Self::UnknownDeity(_) => "RUNTIME_UNKNOWN_DEITY",
            Self::InvalidSelection { .. } => "RUNTIME_INVALID_SELECTION",
            Self::Unavailable(_) => "RUNTIME_UNAVAILABLE",
            Self::ChoicePending => "RUNTIME_CHOICE_PENDING",
            Self::InCombat => "RUNTIME_IN_COMBAT",
            Self::NotInCombat => "RUNTIME_NOT_IN_COMBAT",
            Self::NotEnoughDeities { .. } => "RUNTIME_NOT_ENOUGH_DEITIES",
            Self::UnsupportedSnapshot { .. } => "RUNTIME_UNSUPPORTED_SNAPSHOT",
        }
    }
}
