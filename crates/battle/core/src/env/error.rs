//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{AbilityId, DjinnId, Element, EquipmentId};

/// Errors that occur when resolving definitions through the oracles.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// EquipmentOracle is not available in the environment.
    #[error("EquipmentOracle not available")]
    EquipmentNotAvailable,

    /// Ability definition was not found.
    #[error("ability '{0}' not found")]
    AbilityNotFound(AbilityId),

    /// Djinn definition was not found.
    #[error("djinn '{0}' not found")]
    DjinnNotFound(DjinnId),

    /// Equipment definition was not found.
    #[error("equipment '{0}' not found")]
    EquipmentNotFound(EquipmentId),

    /// Equipment is restricted to another element.
    #[error("equipment '{id}' cannot be worn by a {element} unit")]
    EquipmentRestricted { id: EquipmentId, element: Element },
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            EquipmentNotAvailable => ErrorSeverity::Fatal,
            AbilityNotFound(_) | DjinnNotFound(_) | EquipmentNotFound(_) => {
                ErrorSeverity::Validation
            }
            EquipmentRestricted { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            EquipmentNotAvailable => "ORACLE_EQUIPMENT_NOT_AVAILABLE",
            AbilityNotFound(_) => "ORACLE_ABILITY_NOT_FOUND",
            DjinnNotFound(_) => "ORACLE_DJINN_NOT_FOUND",
            EquipmentNotFound(_) => "ORACLE_EQUIPMENT_NOT_FOUND",
            EquipmentRestricted { .. } => "ORACLE_EQUIPMENT_RESTRICTED",
        }
    }
}
