//! Errors for engine operations that span more than one component.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EquipError, InventoryError};

/// Failures moving gear between the inventory and equipment slots.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GearError {
    #[error("'{0}' cannot be equipped")]
    NotEquipment(String),

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Equip(#[from] EquipError),
}

impl GameError for GearError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotEquipment(_) => ErrorSeverity::Validation,
            Self::Inventory(error) => error.severity(),
            Self::Equip(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotEquipment(_) => "GEAR_NOT_EQUIPMENT",
            Self::Inventory(error) => error.error_code(),
            Self::Equip(error) => error.error_code(),
        }
    }
}
