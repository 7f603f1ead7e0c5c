//! Mining time and in-progress mining sessions.
//!
//! A session is driven by the host's frame loop through
//! [`MiningSession::advance`]; each call accumulates `dt * speed` until the
//! required time is reached. Cancelling discards progress with no reward.

use crate::config::GameConfig;
use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};

/// Time to mine one cell, in milliseconds.
///
/// `max(100, base - pickaxe_power * 100 - base * efficiency% / 100)`
pub fn mining_time(base_mining_time_ms: u32, pickaxe_power: f64, efficiency_percent: f64) -> u32 {
    let base = f64::from(base_mining_time_ms);
    let time = base - pickaxe_power * 100.0 - base * efficiency_percent / 100.0;
    time.max(f64::from(GameConfig::MIN_MINING_TIME_MS)).min(f64::from(u32::MAX)) as u32
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum MiningError {
    #[error("mining power {power} is below hardness {hardness} of '{material}'")]
    TooHard {
        material: String,
        hardness: f64,
        power: f64,
    },

    #[error("already mining '{0}'")]
    AlreadyMining(String),

    #[error("not mining")]
    NotMining,

    /// The session finished but the yield did not fit; it stays claimable.
    #[error("inventory full, cannot store '{0}'")]
    InventoryFull(String),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for MiningError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::TooHard { .. } | Self::AlreadyMining(_) | Self::NotMining => {
                ErrorSeverity::Validation
            }
            Self::InventoryFull(_) => ErrorSeverity::Recoverable,
            Self::Oracle(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::TooHard { .. } => "MINING_TOO_HARD",
            Self::AlreadyMining(_) => "MINING_ALREADY_MINING",
            Self::NotMining => "MINING_NOT_MINING",
            Self::InventoryFull(_) => "MINING_INVENTORY_FULL",
            Self::Oracle(error) => error.error_code(),
        }
    }
}

/// Progress report from [`MiningSession::advance`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MiningProgress {
    /// Fraction in `[0, 1)`.
    InProgress(f64),
    Complete,
}

/// An in-progress mining action on one cell.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MiningSession {
    material: String,
    required_ms: u32,
    progress_ms: f64,
}

impl MiningSession {
    pub fn new(material: impl Into<String>, required_ms: u32) -> Self {
        Self {
            material: material.into(),
            required_ms,
            progress_ms: 0.0,
        }
    }

    pub fn material(&self) -> &str {
        &self.material
    }

    pub fn required_ms(&self) -> u32 {
        self.required_ms
    }

    pub fn is_complete(&self) -> bool {
        self.progress_ms >= f64::from(self.required_ms)
    }

    pub fn fraction(&self) -> f64 {
        if self.required_ms == 0 {
            return 1.0;
        }
        (self.progress_ms / f64::from(self.required_ms)).min(1.0)
    }

    /// Accumulates `dt_ms * speed` of work.
    pub fn advance(&mut self, dt_ms: u32, speed: f64) -> MiningProgress {
        if !self.is_complete() {
            self.progress_ms += f64::from(dt_ms) * speed.max(0.0);
        }
        if self.is_complete() {
            MiningProgress::Complete
        } else {
            MiningProgress::InProgress(self.fraction())
        }
    }
}
