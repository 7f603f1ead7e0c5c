//! Time-limited named stat modifiers.
//!
//! At most one effect per kind is active; applying a kind again replaces the
//! previous entry outright (duration and magnitude), it never stacks.
//! Durations are milliseconds and are driven by the host's frame loop via
//! [`StatusEffectLedger::tick`].

use arrayvec::ArrayVec;
use strum::{Display, EnumCount, EnumIter, EnumString};

use crate::config::GameConfig;

/// Kinds of status effects.
///
/// Declaration order is the order the resolver applies them in.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumCount, EnumIter, EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatusEffectKind {
    /// Flat attack bonus.
    Strength,
    /// Flat defense bonus.
    DefenseBoost,
    /// Speed multiplier `1 + magnitude`.
    Haste,
    /// Flat luck bonus.
    Luck,
    /// -10% attack, defense and mining power; -5 luck.
    Cursed,
    /// Attack multiplier `1 + magnitude` while below a quarter health.
    Berserker,
    /// Infinite defense.
    Immunity,
}

/// A single active effect.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    pub remaining_ms: u32,
    pub magnitude: f64,
}

/// Active status effects on the player.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatusEffectLedger {
    effects: ArrayVec<StatusEffect, { GameConfig::MAX_STATUS_EFFECTS }>,
    revision: u64,
}

const _: () = assert!(StatusEffectKind::COUNT <= GameConfig::MAX_STATUS_EFFECTS);

impl StatusEffectLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bumped when the set of active effects or a magnitude changes.
    /// Plain countdown ticks leave it untouched.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Applies `kind`, replacing any active effect of the same kind.
    pub fn add(&mut self, kind: StatusEffectKind, duration_ms: u32, magnitude: f64) {
        let effect = StatusEffect {
            kind,
            remaining_ms: duration_ms,
            magnitude,
        };
        match self.effects.iter_mut().find(|e| e.kind == kind) {
            Some(existing) => *existing = effect,
            // One slot per kind is guaranteed by the capacity assertion above.
            None => self.effects.push(effect),
        }
        self.revision += 1;
        tracing::debug!(%kind, duration_ms, magnitude, "status applied");
    }

    /// Removes `kind` immediately. Returns the removed effect, if any.
    pub fn remove(&mut self, kind: StatusEffectKind) -> Option<StatusEffect> {
        let index = self.effects.iter().position(|e| e.kind == kind)?;
        let removed = self.effects.remove(index);
        self.revision += 1;
        Some(removed)
    }

    /// Counts every effect down by `dt_ms`, dropping those that reach zero.
    ///
    /// Returns the kinds that expired during this tick.
    pub fn tick(&mut self, dt_ms: u32) -> Vec<StatusEffectKind> {
        let mut expired = Vec::new();
        for effect in self.effects.iter_mut() {
            effect.remaining_ms = effect.remaining_ms.saturating_sub(dt_ms);
            if effect.remaining_ms == 0 {
                expired.push(effect.kind);
            }
        }
        if !expired.is_empty() {
            self.effects.retain(|e| e.remaining_ms > 0);
            self.revision += 1;
            tracing::debug!(?expired, "status effects expired");
        }
        expired
    }

    pub fn get(&self, kind: StatusEffectKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    pub fn is_active(&self, kind: StatusEffectKind) -> bool {
        self.get(kind).is_some()
    }

    /// Iterates active effects in the order each kind was first added.
    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            effects: self.effects.iter().copied().collect(),
        }
    }

    pub fn restore(snapshot: StatusSnapshot) -> Self {
        let mut ledger = Self::new();
        for effect in snapshot.effects {
            if effect.remaining_ms > 0 {
                ledger.add(effect.kind, effect.remaining_ms, effect.magnitude);
            }
        }
        ledger.revision = 0;
        ledger
    }
}

/// Persisted status shape.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusSnapshot {
    pub effects: Vec<StatusEffect>,
}
