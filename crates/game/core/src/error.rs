//! Common error infrastructure for game-core.
//!
//! Domain errors (`ChoiceError`, `RelicError`, `FaithError`, ...) live next to
//! the subsystem that raises them. This module provides the shared severity
//! classification the runtime uses to decide how loudly to report a failure.
//!
//! No core error is fatal to a run: the worst outcome of any failure is an
//! unchanged decision surface plus a diagnostic.

/// Severity level of an error, used for categorization and reporting.
///
/// - **Recoverable**: the player can retry (e.g. not enough gold)
/// - **Validation**: the request was malformed (unknown key, unknown id)
/// - **Internal**: state inconsistency that indicates a bug
/// - **Fatal**: reserved for corrupted snapshots
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the same choice stays open for another pick.
    Recoverable,

    /// Validation error - invalid input, rejected without mutation.
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - state cannot be trusted.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Shared classification for core and runtime errors.
///
/// `error_code` is stable and shows up in logs.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
