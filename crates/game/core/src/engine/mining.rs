use super::GameEngine;
use crate::env::{GameEnv, MaterialTrait};
use crate::events::GameEvent;
use crate::mining::{MiningError, MiningProgress, MiningSession, mining_time};
use crate::state::{LevelUpReport, StatusEffectKind};

/// Cursed materials apply the curse at unit strength.
const CURSED_MATERIAL_MAGNITUDE: f64 = 1.0;

/// What a completed mining session paid out.
#[derive(Clone, Debug, PartialEq)]
pub struct MiningReward {
    pub material: String,
    pub experience: u64,
    pub level_up: LevelUpReport,
}

#[derive(Clone, Debug, PartialEq)]
pub enum MiningAdvance {
    /// Fraction of the required time done, in `[0, 1)`.
    InProgress(f64),
    Completed(MiningReward),
}

impl GameEngine {
    pub fn mining_session(&self) -> Option<&MiningSession> {
        self.mining.as_ref()
    }

    /// Starts mining `material_id`. Returns the required time in milliseconds.
    pub fn start_mining(
        &mut self,
        material_id: &str,
        env: GameEnv<'_>,
    ) -> Result<u32, MiningError> {
        if let Some(session) = &self.mining {
            return Err(MiningError::AlreadyMining(session.material().to_owned()));
        }
        let material = env.material(material_id)?;
        let stats = self.stats();
        if stats.mining_power < material.hardness {
            return Err(MiningError::TooHard {
                material: material.id.clone(),
                hardness: material.hardness,
                power: stats.mining_power,
            });
        }
        let required_ms = mining_time(
            material.base_mining_time_ms,
            stats.mining_power,
            stats.mining_efficiency,
        );
        self.mining = Some(MiningSession::new(material.id.as_str(), required_ms));
        tracing::debug!(material = %material.id, required_ms, "mining started");
        Ok(required_ms)
    }

    /// Advances the active session by `dt_ms` scaled by resolved speed.
    ///
    /// On completion one unit of the material is stored, its experience is
    /// granted and the find events fire. If the unit does not fit, the
    /// session stays complete and the next call retries the claim.
    pub fn advance_mining(
        &mut self,
        dt_ms: u32,
        env: GameEnv<'_>,
    ) -> Result<MiningAdvance, MiningError> {
        let speed = self.stats().speed;
        let session = self.mining.as_mut().ok_or(MiningError::NotMining)?;
        if let MiningProgress::InProgress(fraction) = session.advance(dt_ms, speed) {
            return Ok(MiningAdvance::InProgress(fraction));
        }

        let material = env.material(session.material())?;
        // A single unit can only be rejected for lack of room.
        self.player
            .inventory
            .add_item(&material.to_item(), 1)
            .map_err(|_| MiningError::InventoryFull(material.id.clone()))?;
        self.mining = None;
        tracing::debug!(material = %material.id, "mining complete");

        self.emit(GameEvent::MaterialMined {
            material: material.id.clone(),
            experience: material.experience,
        });
        if material.has(MaterialTrait::Legendary) {
            self.emit(GameEvent::LegendaryFind {
                material: material.id.clone(),
            });
        } else if material.has(MaterialTrait::Rare) {
            self.emit(GameEvent::RareFind {
                material: material.id.clone(),
            });
        }
        if material.has(MaterialTrait::Cursed) {
            let duration = self.config.cursed_material_duration_ms;
            self.apply_status(StatusEffectKind::Cursed, duration, CURSED_MATERIAL_MAGNITUDE);
        }
        let level_up = self.gain_experience(material.experience);

        Ok(MiningAdvance::Completed(MiningReward {
            material: material.id.clone(),
            experience: material.experience,
            level_up,
        }))
    }

    /// Abandons the active session; accumulated progress is lost.
    pub fn cancel_mining(&mut self) -> Option<MiningSession> {
        let cancelled = self.mining.take();
        if let Some(session) = &cancelled {
            tracing::debug!(material = session.material(), "mining cancelled");
        }
        cancelled
    }
}
