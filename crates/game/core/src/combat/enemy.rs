use crate::env::{EnemyTemplate, OracleError};
use crate::error::{ErrorSeverity, GameError};

/// A live enemy instance spawned from a template.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyState {
    pub template_id: String,
    pub health: f64,
    pub max_health: f64,
}

impl EnemyState {
    pub fn spawn(template: &EnemyTemplate) -> Self {
        Self {
            template_id: template.id.clone(),
            health: template.health,
            max_health: template.health,
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    #[error("enemy '{0}' is already defeated")]
    EnemyDefeated(String),

    #[error("player is defeated")]
    PlayerDefeated,

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EnemyDefeated(_) | Self::PlayerDefeated => ErrorSeverity::Validation,
            Self::Oracle(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EnemyDefeated(_) => "COMBAT_ENEMY_DEFEATED",
            Self::PlayerDefeated => "COMBAT_PLAYER_DEFEATED",
            Self::Oracle(error) => error.error_code(),
        }
    }
}
