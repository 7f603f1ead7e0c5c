//! Error vocabulary shared by every mine-core component.
//!
//! Each component defines its own `thiserror` enum next to the operations it
//! guards (`InventoryError` in the inventory, `SkillError` in the skill book).
//! Rule violations come back as `Err` values the caller branches on; nothing
//! in the crate panics on bad player input.

/// How a host should react to an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Full inventory, too few skill points: retry later.
    Recoverable,
    /// Wrong slot, unknown id: the request itself is wrong.
    Validation,
    /// Component state disagrees with itself.
    Internal,
    /// Static data is missing or malformed.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// The same request may succeed once the player's situation changes.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Internal and fatal errors point at bad data or a bug, not at the player.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Shared surface of every mine-core error enum.
///
/// Hosts map `error_code` to localized messages and use `severity` to decide
/// how loudly to report it.
pub trait GameError: std::fmt::Display + std::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier such as `INVENTORY_FULL`.
    ///
    /// Falls back to the type name for enums that do not override it.
    fn error_code(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
