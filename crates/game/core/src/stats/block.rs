//! Stat vocabulary shared by items, skills and the resolver.

use std::collections::BTreeMap;

use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// Every numeric stat a modifier can target.
///
/// Declaration order is the iteration order used wherever stats are summed,
/// which keeps floating-point accumulation deterministic.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatKind {
    Attack,
    Defense,
    MiningPower,
    /// Percentage of base mining time shaved off.
    MiningEfficiency,
    Speed,
    Luck,
    MaxHealth,
}

/// Sparse per-stat totals.
///
/// Backed by an ordered map so summation and serialization are stable.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StatBlock {
    values: BTreeMap<StatKind, f64>,
}

impl StatBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a block from `(stat, value)` pairs, summing duplicates.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (StatKind, f64)>) -> Self {
        let mut block = Self::new();
        for (stat, value) in pairs {
            block.add(stat, value);
        }
        block
    }

    /// Builder-style [`StatBlock::add`].
    pub fn with(mut self, stat: StatKind, value: f64) -> Self {
        self.add(stat, value);
        self
    }

    pub fn add(&mut self, stat: StatKind, value: f64) {
        *self.values.entry(stat).or_insert(0.0) += value;
    }

    /// Adds every entry of `other` into this block.
    pub fn merge(&mut self, other: &StatBlock) {
        for (stat, value) in other.iter() {
            self.add(stat, value);
        }
    }

    /// Value for `stat`, zero when absent.
    pub fn get(&self, stat: StatKind) -> f64 {
        self.values.get(&stat).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatKind, f64)> + '_ {
        self.values.iter().map(|(stat, value)| (*stat, *value))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(StatKind, f64)> for StatBlock {
    fn from_iter<T: IntoIterator<Item = (StatKind, f64)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}
