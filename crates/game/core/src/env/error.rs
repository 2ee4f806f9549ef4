//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};

/// Errors that occur when accessing content tables.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("RelicOracle not available")]
    RelicsNotAvailable,

    #[error("DeityOracle not available")]
    DeitiesNotAvailable,

    #[error("CardOracle not available")]
    CardsNotAvailable,

    #[error("EventOracle not available")]
    EventsNotAvailable,

    #[error("RngOracle not available")]
    RngNotAvailable,
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        // Without content the rules cannot interpret any id.
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            RelicsNotAvailable => "ORACLE_RELICS_NOT_AVAILABLE",
            DeitiesNotAvailable => "ORACLE_DEITIES_NOT_AVAILABLE",
            CardsNotAvailable => "ORACLE_CARDS_NOT_AVAILABLE",
            EventsNotAvailable => "ORACLE_EVENTS_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
        }
    }
}
