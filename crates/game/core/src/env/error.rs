//! Errors raised when static game data is missing.

use crate::error::{ErrorSeverity, GameError};

/// A required oracle was not supplied, or it does not know an id.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("MaterialOracle not available")]
    MaterialsNotAvailable,

    #[error("EquipmentOracle not available")]
    EquipmentNotAvailable,

    #[error("EnemyOracle not available")]
    EnemiesNotAvailable,

    #[error("RngOracle not available")]
    RngNotAvailable,

    #[error("material '{0}' not found")]
    MaterialNotFound(String),

    #[error("equipment template '{0}' not found")]
    EquipmentTemplateNotFound(String),

    #[error("enemy template '{0}' not found")]
    EnemyNotFound(String),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            MaterialsNotAvailable | EquipmentNotAvailable | EnemiesNotAvailable
            | RngNotAvailable => ErrorSeverity::Fatal,

            MaterialNotFound(_) | EquipmentTemplateNotFound(_) | EnemyNotFound(_) => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            MaterialsNotAvailable => "ORACLE_MATERIALS_NOT_AVAILABLE",
            EquipmentNotAvailable => "ORACLE_EQUIPMENT_NOT_AVAILABLE",
            EnemiesNotAvailable => "ORACLE_ENEMIES_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
            MaterialNotFound(_) => "ORACLE_MATERIAL_NOT_FOUND",
            EquipmentTemplateNotFound(_) => "ORACLE_EQUIPMENT_TEMPLATE_NOT_FOUND",
            EnemyNotFound(_) => "ORACLE_ENEMY_NOT_FOUND",
        }
    }
}
