//! Damage and critical-hit formulas.
//!
//! ```text
//! crit_chance = clamp(luck * 0.001, 0, 0.20)
//! damage      = max(1, floor((attack - defense * 0.5) * variance * crit_mult))
//! ```
//!
//! Randomness enters only through [`DamageRolls`], so the formula itself is a
//! pure function and tests can pin variance and the crit draw.

use crate::env::{RngOracle, RollContext, RollSeed};
use crate::stats::CombatStats;

pub const MIN_DAMAGE: u32 = 1;
pub const DEFENSE_FACTOR: f64 = 0.5;
pub const CRIT_CHANCE_PER_LUCK: f64 = 0.001;
pub const MAX_CRIT_CHANCE: f64 = 0.20;
pub const CRIT_MULTIPLIER: f64 = 2.0;
pub const VARIANCE_MIN: f64 = 0.8;
pub const VARIANCE_SPAN: f64 = 0.4;

/// Random inputs of one damage roll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageRolls {
    /// Multiplier in `[0.8, 1.2)`.
    pub variance: f64,
    /// Uniform draw in `[0, 1)` compared against the crit chance.
    pub crit_roll: f64,
}

impl DamageRolls {
    /// No variance and a crit draw that never succeeds.
    pub const NEUTRAL: Self = Self {
        variance: 1.0,
        crit_roll: 1.0,
    };

    /// Maps two unit draws onto the variance band and the crit draw.
    pub fn from_units(variance_unit: f64, crit_unit: f64) -> Self {
        Self {
            variance: VARIANCE_MIN + VARIANCE_SPAN * variance_unit,
            crit_roll: crit_unit,
        }
    }

    pub fn roll<R: RngOracle + ?Sized>(rng: &R, seed: RollSeed) -> Self {
        Self::from_units(
            rng.unit(seed.for_roll(RollContext::DamageVariance)),
            rng.unit(seed.for_roll(RollContext::Critical)),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageOutcome {
    pub damage: u32,
    pub critical: bool,
}

pub fn crit_chance(luck: f64) -> f64 {
    (luck * CRIT_CHANCE_PER_LUCK).clamp(0.0, MAX_CRIT_CHANCE)
}

/// Damage dealt by `attacker` to `defender`.
///
/// An immune defender takes nothing and cannot be crit.
pub fn calculate_damage(
    attacker: &CombatStats,
    defender: &CombatStats,
    rolls: DamageRolls,
) -> DamageOutcome {
    if defender.immune {
        return DamageOutcome {
            damage: 0,
            critical: false,
        };
    }
    let critical = rolls.crit_roll < crit_chance(attacker.luck);
    let multiplier = if critical { CRIT_MULTIPLIER } else { 1.0 };
    let raw = (attacker.attack - defender.defense * DEFENSE_FACTOR) * rolls.variance * multiplier;
    // f64::max discards NaN, so degenerate inputs still land on the floor.
    let damage = raw.floor().max(f64::from(MIN_DAMAGE)).min(f64::from(u32::MAX)) as u32;
    DamageOutcome { damage, critical }
}

/// Health remaining after taking `damage`, clamped at zero.
pub fn apply_damage(health: f64, damage: u32) -> f64 {
    (health - f64::from(damage)).max(0.0)
}
