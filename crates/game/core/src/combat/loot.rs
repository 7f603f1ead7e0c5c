//! Drop-table rolls.

use crate::env::{DropCount, DropEntry, DropKind, RngOracle, RollContext, RollSeed};

/// One successful drop.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootDrop {
    pub kind: DropKind,
    pub count: u32,
}

/// Rolls every entry of `table` independently against its own chance.
///
/// Entries keep table order in the result; entries whose count rolls to
/// zero are omitted.
pub fn roll_loot<R: RngOracle + ?Sized>(
    table: &[DropEntry],
    rng: &R,
    seed: RollSeed,
) -> Vec<LootDrop> {
    table
        .iter()
        .zip(0u32..)
        .filter_map(|(entry, index)| {
            if !rng.chance(seed.for_roll(RollContext::LootChance(index)), entry.chance) {
                return None;
            }
            let count = match entry.count {
                DropCount::Fixed(count) => count,
                DropCount::Range(min, max) => {
                    rng.range(seed.for_roll(RollContext::LootCount(index)), min, max)
                }
            };
            (count > 0).then(|| LootDrop {
                kind: entry.kind.clone(),
                count,
            })
        })
        .collect()
}
