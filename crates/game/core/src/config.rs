/// Game configuration constants and tunable parameters.
///
/// Compile-time capacities live as associated constants; everything a
/// designer may want to rebalance without recompiling is a field with a
/// sensible default, so a partial `config.toml` still loads.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Number of slots in a fresh player inventory.
    pub inventory_slots: usize,

    /// Experience curve: `required(level) = floor(xp_base * xp_multiplier^(level - 1))`.
    pub xp_base: f64,
    pub xp_multiplier: f64,

    /// Stat growth granted on every level-up.
    pub level_up: LevelUpDeltas,

    /// Base stats of a level-1 character.
    pub starting_stats: StartingStats,

    /// Duration of the curse applied when a cursed material is mined.
    pub cursed_material_duration_ms: u32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum units of one item a single inventory slot may hold.
    pub const MAX_STACK: u32 = 99;
    pub const DEFAULT_INVENTORY_SLOTS: usize = 40;
    /// One entry per status effect kind is enough; keep a spare slot.
    pub const MAX_STATUS_EFFECTS: usize = 8;
    /// Floor applied to every mining time, in milliseconds.
    pub const MIN_MINING_TIME_MS: u32 = 100;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_XP_BASE: f64 = 100.0;
    pub const DEFAULT_XP_MULTIPLIER: f64 = 1.5;
    pub const DEFAULT_CURSE_DURATION_MS: u32 = 10_000;

    pub fn new() -> Self {
        Self {
            inventory_slots: Self::DEFAULT_INVENTORY_SLOTS,
            xp_base: Self::DEFAULT_XP_BASE,
            xp_multiplier: Self::DEFAULT_XP_MULTIPLIER,
            level_up: LevelUpDeltas::default(),
            starting_stats: StartingStats::default(),
            cursed_material_duration_ms: Self::DEFAULT_CURSE_DURATION_MS,
        }
    }

    pub fn with_xp_curve(mut self, base: f64, multiplier: f64) -> Self {
        self.xp_base = base;
        self.xp_multiplier = multiplier;
        self
    }

    pub fn with_inventory_slots(mut self, slots: usize) -> Self {
        self.inventory_slots = slots;
        self
    }

    /// Experience needed to advance from `level` to `level + 1`.
    pub fn required_xp(&self, level: u32) -> u64 {
        let exponent = level.saturating_sub(1) as i32;
        (self.xp_base * self.xp_multiplier.powi(exponent)).floor() as u64
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed stat increases applied per level gained.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LevelUpDeltas {
    pub max_health: f64,
    pub attack: f64,
    pub defense: f64,
    pub mining_power: f64,
}

impl Default for LevelUpDeltas {
    fn default() -> Self {
        Self {
            max_health: 10.0,
            attack: 2.0,
            defense: 1.0,
            mining_power: 1.0,
        }
    }
}

/// Level-1 base stats.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StartingStats {
    pub max_health: f64,
    pub attack: f64,
    pub defense: f64,
    pub mining_power: f64,
    pub mining_efficiency: f64,
    pub speed: f64,
    pub luck: f64,
}

impl Default for StartingStats {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            attack: 10.0,
            defense: 5.0,
            mining_power: 1.0,
            mining_efficiency: 0.0,
            speed: 1.0,
            luck: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_xp_follows_geometric_curve() {
        let config = GameConfig::new();
        assert_eq!(config.required_xp(1), 100);
        assert_eq!(config.required_xp(2), 150);
        assert_eq!(config.required_xp(3), 225);
        // 100 * 1.5^3 = 337.5
        assert_eq!(config.required_xp(4), 337);
    }
}
