//! Level, experience and the level-derived base stats.

use crate::config::GameConfig;
use crate::stats::BaseStats;

/// Outcome of a single experience grant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LevelUpReport {
    pub levels_gained: u32,
    pub new_level: u32,
}

impl LevelUpReport {
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }
}

/// Character progression record.
#[derive(Clone, Debug, PartialEq)]
pub struct Progression {
    level: u32,
    experience: u64,
    experience_to_next: u64,
    base_stats: BaseStats,
    health: f64,
    revision: u64,
}

impl Progression {
    /// A fresh level-1 character at full health.
    pub fn new(config: &GameConfig) -> Self {
        let base_stats = BaseStats::from_starting(&config.starting_stats);
        Self {
            level: 1,
            experience: 0,
            experience_to_next: config.required_xp(1),
            health: base_stats.max_health,
            base_stats,
            revision: 0,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Experience accumulated toward the next level.
    pub fn experience(&self) -> u64 {
        self.experience
    }

    pub fn experience_to_next(&self) -> u64 {
        self.experience_to_next
    }

    pub fn base_stats(&self) -> &BaseStats {
        &self.base_stats
    }

    pub fn health(&self) -> f64 {
        self.health
    }

    /// Bumped whenever the level or base stats change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Sets current health, clamped at zero. The upper bound depends on
    /// resolved stats and is enforced by the caller.
    pub fn set_health(&mut self, health: f64) {
        self.health = health.max(0.0);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Adds experience and applies every level-up it pays for.
    ///
    /// Each level costs `config.required_xp(level)`; the threshold is
    /// subtracted and recomputed per level, so one large grant can advance
    /// several levels. Health is not touched here: a full heal needs the
    /// resolved max health, which only the engine can compute.
    pub fn gain_experience(&mut self, amount: u64, config: &GameConfig) -> LevelUpReport {
        self.experience = self.experience.saturating_add(amount);
        let mut levels_gained = 0;
        while self.experience_to_next > 0 && self.experience >= self.experience_to_next {
            self.experience -= self.experience_to_next;
            self.level += 1;
            levels_gained += 1;

            let deltas = &config.level_up;
            self.base_stats.max_health += deltas.max_health;
            self.base_stats.attack += deltas.attack;
            self.base_stats.defense += deltas.defense;
            self.base_stats.mining_power += deltas.mining_power;

            self.experience_to_next = config.required_xp(self.level);
        }
        if levels_gained > 0 {
            self.revision += 1;
            tracing::debug!(level = self.level, levels_gained, "level up");
        }
        LevelUpReport {
            levels_gained,
            new_level: self.level,
        }
    }

    pub fn snapshot(&self) -> ProgressionSnapshot {
        ProgressionSnapshot {
            level: self.level,
            experience: self.experience,
            base_stats: self.base_stats,
            health: self.health,
        }
    }

    pub fn restore(snapshot: ProgressionSnapshot, config: &GameConfig) -> Self {
        let level = snapshot.level.max(1);
        Self {
            level,
            experience: snapshot.experience,
            experience_to_next: config.required_xp(level),
            base_stats: snapshot.base_stats,
            health: snapshot.health.max(0.0),
            revision: 0,
        }
    }
}

/// Persisted progression shape. The XP threshold is derived from config.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressionSnapshot {
    pub level: u32,
    pub experience: u64,
    pub base_stats: BaseStats,
    pub health: f64,
}
