//! Combines every stat source into one [`ResolvedStats`] snapshot.
//!
//! Resolution always starts from scratch and applies the sources in a fixed
//! order:
//!
//! ```text
//! base → equipment (additive) → status effects (declaration order)
//!      → luck multiplier → skills (additive) → snapshot
//! ```
//!
//! The luck multiplier sits between status effects and skills, so luck
//! granted by skills does not scale attack or mining power.

use strum::IntoEnumIterator;

use super::block::{StatBlock, StatKind};
use super::resolved::{BaseStats, ResolvedStats, SpecialFlags};
use crate::skills::SkillTotals;
use crate::state::{StatusEffectKind, StatusEffectLedger};

const CURSE_MULTIPLIER: f64 = 0.9;
const CURSE_LUCK_PENALTY: f64 = 5.0;
const BERSERKER_HEALTH_RATIO: f64 = 0.25;

/// Borrowed view over every input the resolver reads.
#[derive(Clone, Copy, Debug)]
pub struct StatSources<'a> {
    pub base: &'a BaseStats,
    /// Current health; only the berserker status reads it.
    pub current_health: f64,
    pub equipment: &'a StatBlock,
    pub status: &'a StatusEffectLedger,
    pub skills: &'a SkillTotals,
}

/// Pure resolution of `sources`. Identical inputs give bit-identical output.
pub fn resolve_stats(sources: &StatSources<'_>) -> ResolvedStats {
    let mut stats = ResolvedStats::from_base(sources.base);

    for (stat, value) in sources.equipment.iter() {
        stats.add(stat, value);
    }

    apply_status_effects(&mut stats, sources);

    if stats.luck > 0.0 {
        let luck_factor = 1.0 + stats.luck / 100.0;
        stats.attack *= luck_factor;
        stats.mining_power *= luck_factor;
    }

    for (stat, value) in sources.skills.stats.iter() {
        stats.add(stat, value);
    }
    stats.auto_mine = sources.skills.auto_mine.clone();
    stats.flags.set(SpecialFlags::BERSERKER, sources.skills.berserker);
    stats.flags.set(SpecialFlags::IMMORTAL, sources.skills.immortal);

    tracing::trace!(
        attack = stats.attack,
        defense = stats.defense,
        mining_power = stats.mining_power,
        speed = stats.speed,
        luck = stats.luck,
        "stats resolved"
    );
    stats
}

fn apply_status_effects(stats: &mut ResolvedStats, sources: &StatSources<'_>) {
    for kind in StatusEffectKind::iter() {
        let Some(effect) = sources.status.get(kind) else {
            continue;
        };
        let magnitude = effect.magnitude;
        match kind {
            StatusEffectKind::Strength => stats.attack += magnitude,
            StatusEffectKind::DefenseBoost => stats.defense += magnitude,
            StatusEffectKind::Haste => stats.speed *= 1.0 + magnitude,
            StatusEffectKind::Luck => stats.luck += magnitude,
            StatusEffectKind::Cursed => {
                stats.attack *= CURSE_MULTIPLIER;
                stats.defense *= CURSE_MULTIPLIER;
                stats.mining_power *= CURSE_MULTIPLIER;
                stats.luck = (stats.luck - CURSE_LUCK_PENALTY).max(0.0);
            }
            StatusEffectKind::Berserker => {
                // Ratio against the pool as resolved so far (base + equipment).
                if stats.max_health > 0.0
                    && sources.current_health / stats.max_health < BERSERKER_HEALTH_RATIO
                {
                    stats.attack *= 1.0 + magnitude;
                    stats.flags.insert(SpecialFlags::BERSERKER_ACTIVE);
                }
            }
            StatusEffectKind::Immunity => {
                stats.defense = f64::INFINITY;
                stats.flags.insert(SpecialFlags::IMMUNE);
            }
        }
    }
}

/// Revisions of every source at the time of the cached resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolutionKey {
    pub progression: u64,
    pub equipment: u64,
    pub skills: u64,
    pub status: u64,
    pub health_bits: u64,
}

/// Memoizes a resolution keyed by source revisions.
///
/// Any mutation of a source bumps its revision, so a stale snapshot can
/// never be returned.
#[derive(Clone, Debug, Default)]
pub struct StatResolver {
    cached: Option<(ResolutionKey, ResolvedStats)>,
    recomputations: u64,
}

impl StatResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached snapshot for `key`, running `compute` on a miss.
    pub fn resolve(
        &mut self,
        key: ResolutionKey,
        compute: impl FnOnce() -> ResolvedStats,
    ) -> &ResolvedStats {
        let fresh = matches!(&self.cached, Some((cached_key, _)) if *cached_key == key);
        if !fresh {
            self.cached = None;
            self.recomputations += 1;
        }
        let (_, stats) = self.cached.get_or_insert_with(|| (key, compute()));
        stats
    }

    /// Drops the cached snapshot. Needed when revisions restart, e.g. after
    /// restoring a save.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Number of full recomputations performed so far.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        base: BaseStats,
        health: f64,
        equipment: StatBlock,
        status: StatusEffectLedger,
        skills: SkillTotals,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                base: BaseStats {
                    max_health: 100.0,
                    attack: 20.0,
                    defense: 10.0,
                    mining_power: 5.0,
                    mining_efficiency: 0.0,
                    speed: 1.0,
                    luck: 0.0,
                },
                health: 100.0,
                equipment: StatBlock::new(),
                status: StatusEffectLedger::new(),
                skills: SkillTotals::default(),
            }
        }

        fn resolve(&self) -> ResolvedStats {
            resolve_stats(&self.sources())
        }

        fn sources(&self) -> StatSources<'_> {
            StatSources {
                base: &self.base,
                current_health: self.health,
                equipment: &self.equipment,
                status: &self.status,
                skills: &self.skills,
            }
        }
    }

    #[test]
    fn resolution_is_idempotent() {
        let mut fixture = Fixture::new();
        fixture.equipment = StatBlock::new().with(StatKind::Attack, 3.5);
        fixture.status.add(StatusEffectKind::Luck, 1_000, 7.0);
        fixture.status.add(StatusEffectKind::Cursed, 1_000, 1.0);

        let first = fixture.resolve();
        let second = fixture.resolve();
        assert_eq!(first, second);
        assert_eq!(first.attack.to_bits(), second.attack.to_bits());
    }

    #[test]
    fn equipment_adds_before_status_multipliers() {
        let mut fixture = Fixture::new();
        fixture.equipment = StatBlock::new().with(StatKind::Speed, 1.0);
        fixture.status.add(StatusEffectKind::Haste, 1_000, 0.5);

        assert_eq!(fixture.resolve().speed, 3.0);
    }

    #[test]
    fn curse_scales_and_drains_luck() {
        let mut fixture = Fixture::new();
        fixture.base.luck = 3.0;
        fixture.status.add(StatusEffectKind::Cursed, 1_000, 1.0);

        let stats = fixture.resolve();
        assert_eq!(stats.attack, 18.0);
        assert_eq!(stats.defense, 9.0);
        assert_eq!(stats.mining_power, 4.5);
        assert_eq!(stats.luck, 0.0);
    }

    #[test]
    fn effects_apply_in_declaration_order_not_insertion_order() {
        let mut cursed_first = Fixture::new();
        cursed_first.status.add(StatusEffectKind::Cursed, 1_000, 1.0);
        cursed_first.status.add(StatusEffectKind::Strength, 1_000, 10.0);

        let mut strength_first = Fixture::new();
        strength_first.status.add(StatusEffectKind::Strength, 1_000, 10.0);
        strength_first.status.add(StatusEffectKind::Cursed, 1_000, 1.0);

        // (20 + 10) * 0.9 either way.
        assert_eq!(cursed_first.resolve().attack, 27.0);
        assert_eq!(strength_first.resolve().attack, 27.0);
    }

    #[test]
    fn luck_scales_attack_and_mining_power() {
        let mut fixture = Fixture::new();
        fixture.status.add(StatusEffectKind::Luck, 1_000, 50.0);

        let stats = fixture.resolve();
        assert_eq!(stats.luck, 50.0);
        assert_eq!(stats.attack, 30.0);
        assert_eq!(stats.mining_power, 7.5);
    }

    #[test]
    fn skill_bonuses_are_not_scaled_by_luck() {
        let mut fixture = Fixture::new();
        fixture.status.add(StatusEffectKind::Luck, 1_000, 100.0);
        fixture.skills.stats = StatBlock::new().with(StatKind::Attack, 5.0);

        assert_eq!(fixture.resolve().attack, 45.0);
    }

    #[test]
    fn berserker_only_below_quarter_health() {
        let mut fixture = Fixture::new();
        fixture.status.add(StatusEffectKind::Berserker, 1_000, 0.5);

        fixture.health = 25.0;
        let healthy = fixture.resolve();
        assert_eq!(healthy.attack, 20.0);
        assert!(!healthy.flags.contains(SpecialFlags::BERSERKER_ACTIVE));

        fixture.health = 24.0;
        let enraged = fixture.resolve();
        assert_eq!(enraged.attack, 30.0);
        assert!(enraged.flags.contains(SpecialFlags::BERSERKER_ACTIVE));
    }

    #[test]
    fn immunity_makes_defense_infinite() {
        let mut fixture = Fixture::new();
        fixture.status.add(StatusEffectKind::Immunity, 1_000, 1.0);

        let stats = fixture.resolve();
        assert!(stats.defense.is_infinite());
        assert!(stats.is_immune());
    }

    #[test]
    fn skill_max_health_and_specials_surface() {
        let mut fixture = Fixture::new();
        fixture.skills = SkillTotals {
            stats: StatBlock::new().with(StatKind::MaxHealth, 25.0),
            auto_mine: Some("iron".into()),
            berserker: false,
            immortal: true,
        };

        let stats = fixture.resolve();
        assert_eq!(stats.max_health, 125.0);
        assert_eq!(stats.max_health_bonus, 25.0);
        assert_eq!(stats.auto_mine.as_deref(), Some("iron"));
        assert!(stats.is_immortal());
    }

    #[test]
    fn resolver_caches_until_a_revision_changes() {
        let fixture = Fixture::new();
        let key = ResolutionKey {
            progression: 0,
            equipment: 0,
            skills: 0,
            status: 0,
            health_bits: fixture.health.to_bits(),
        };
        let mut resolver = StatResolver::new();

        let first = resolver.resolve(key, || fixture.resolve()).clone();
        let second = resolver
            .resolve(key, || panic!("cache hit must not recompute"))
            .clone();
        assert_eq!(first, second);
        assert_eq!(resolver.recomputations(), 1);

        let bumped = ResolutionKey { status: 1, ..key };
        resolver.resolve(bumped, || fixture.resolve());
        assert_eq!(resolver.recomputations(), 2);

        resolver.invalidate();
        resolver.resolve(bumped, || fixture.resolve());
        assert_eq!(resolver.recomputations(), 3);
    }
}
