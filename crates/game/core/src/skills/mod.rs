//! Skill trees: static prerequisite graphs and the per-player ledger.

mod book;
mod definition;

pub use book::{SkillBook, SkillError, SkillLedgerSnapshot, SkillTotals};
pub use definition::{SkillDefinition, SkillEffect, SkillTreeDefinition, SkillTreeError};
