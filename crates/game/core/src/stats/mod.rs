//! Stat vocabulary and the resolution pipeline.
//!
//! Items, skills and status effects describe *modifiers*; [`StatResolver`]
//! folds them over the level-derived [`BaseStats`] into a [`ResolvedStats`]
//! snapshot that every gameplay formula reads.

mod block;
mod resolved;
mod resolver;

pub use block::{StatBlock, StatKind};
pub use resolved::{BaseStats, CombatStats, ResolvedStats, SpecialFlags};
pub use resolver::{ResolutionKey, StatResolver, StatSources, resolve_stats};
