//! Combat resolution.
//!
//! Pure formulas: the caller supplies both sides' stats and the random
//! draws, so nothing here reads global player state.

mod damage;
mod enemy;
mod loot;

pub use damage::{
    CRIT_MULTIPLIER, DamageOutcome, DamageRolls, MAX_CRIT_CHANCE, MIN_DAMAGE, apply_damage,
    calculate_damage, crit_chance,
};
pub use enemy::{CombatError, EnemyState};
pub use loot::{LootDrop, roll_loot};
