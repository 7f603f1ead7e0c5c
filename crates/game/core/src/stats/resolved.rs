//! Base and resolved stat snapshots.

use bitflags::bitflags;

use super::block::StatKind;
use crate::config::StartingStats;

/// Level-derived stats before any modifier is applied.
///
/// Stored on the player's progression record; grows on level-up only.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub max_health: f64,
    pub attack: f64,
    pub defense: f64,
    pub mining_power: f64,
    pub mining_efficiency: f64,
    pub speed: f64,
    pub luck: f64,
}

impl BaseStats {
    pub fn from_starting(starting: &StartingStats) -> Self {
        Self {
            max_health: starting.max_health,
            attack: starting.attack,
            defense: starting.defense,
            mining_power: starting.mining_power,
            mining_efficiency: starting.mining_efficiency,
            speed: starting.speed,
            luck: starting.luck,
        }
    }
}

impl Default for BaseStats {
    fn default() -> Self {
        Self::from_starting(&StartingStats::default())
    }
}

bitflags! {
    /// Special, non-numeric states surfaced by the resolver.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct SpecialFlags: u8 {
        /// Immunity status is active; defense is infinite.
        const IMMUNE = 0b0000_0001;
        /// Berserker status multiplier was applied this resolution.
        const BERSERKER_ACTIVE = 0b0000_0010;
        /// Berserker skill learned.
        const BERSERKER = 0b0000_0100;
        /// Immortal skill learned; health never drops below 1.
        const IMMORTAL = 0b0000_1000;
    }
}

/// Fully combined stats used by every gameplay formula.
///
/// Ephemeral: produced by [`super::StatResolver`] and never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedStats {
    pub attack: f64,
    pub defense: f64,
    pub mining_power: f64,
    pub mining_efficiency: f64,
    pub speed: f64,
    pub luck: f64,
    /// Total health pool after equipment and skill bonuses.
    pub max_health: f64,
    /// Portion of `max_health` that comes from equipment and skills.
    pub max_health_bonus: f64,
    /// Highest auto-mine tier granted by learned skills.
    pub auto_mine: Option<String>,
    pub flags: SpecialFlags,
}

impl ResolvedStats {
    /// Snapshot equal to `base` with no modifiers applied.
    pub fn from_base(base: &BaseStats) -> Self {
        Self {
            attack: base.attack,
            defense: base.defense,
            mining_power: base.mining_power,
            mining_efficiency: base.mining_efficiency,
            speed: base.speed,
            luck: base.luck,
            max_health: base.max_health,
            max_health_bonus: 0.0,
            auto_mine: None,
            flags: SpecialFlags::empty(),
        }
    }

    pub fn get(&self, stat: StatKind) -> f64 {
        match stat {
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::MiningPower => self.mining_power,
            StatKind::MiningEfficiency => self.mining_efficiency,
            StatKind::Speed => self.speed,
            StatKind::Luck => self.luck,
            StatKind::MaxHealth => self.max_health,
        }
    }

    /// Adds `value` to the field backing `stat`.
    ///
    /// `MaxHealth` also accumulates into `max_health_bonus`.
    pub fn add(&mut self, stat: StatKind, value: f64) {
        match stat {
            StatKind::Attack => self.attack += value,
            StatKind::Defense => self.defense += value,
            StatKind::MiningPower => self.mining_power += value,
            StatKind::MiningEfficiency => self.mining_efficiency += value,
            StatKind::Speed => self.speed += value,
            StatKind::Luck => self.luck += value,
            StatKind::MaxHealth => {
                self.max_health += value;
                self.max_health_bonus += value;
            }
        }
    }

    pub fn is_immune(&self) -> bool {
        self.flags.contains(SpecialFlags::IMMUNE)
    }

    pub fn is_immortal(&self) -> bool {
        self.flags.contains(SpecialFlags::IMMORTAL)
    }

    /// Attack/defense/luck view consumed by the damage formula.
    pub fn combat(&self) -> CombatStats {
        CombatStats {
            attack: self.attack,
            defense: self.defense,
            luck: self.luck,
            immune: self.is_immune(),
        }
    }
}

/// The subset of stats the damage formula reads.
///
/// Enemies build one directly from their template; the player derives it
/// from [`ResolvedStats`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CombatStats {
    pub attack: f64,
    pub defense: f64,
    pub luck: f64,
    pub immune: bool,
}

impl CombatStats {
    pub const fn new(attack: f64, defense: f64, luck: f64) -> Self {
        Self {
            attack,
            defense,
            luck,
            immune: false,
        }
    }
}
