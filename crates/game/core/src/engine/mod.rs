//! Player-action facade.
//!
//! [`GameEngine`] owns the player state, the stat resolver, the event bus
//! and the RNG nonce. Every player action goes through it so that exactly
//! one leaf component is mutated, its revision moves, and the matching
//! domain event is published. Static data arrives per call as a
//! [`GameEnv`](crate::env::GameEnv), never through globals.

mod combat;
mod errors;
mod gear;
mod mining;

pub use combat::AttackReport;
pub use errors::GearError;
pub use mining::{MiningAdvance, MiningReward};

use crate::config::GameConfig;
use crate::env::RollSeed;
use crate::events::{EventBus, EventKind, GameEvent, SubscriptionId};
use crate::mining::MiningSession;
use crate::skills::{SkillBook, SkillError, SkillTreeDefinition, SkillTreeError};
use crate::state::{
    LevelUpReport, PlayerSnapshot, PlayerState, StatusEffect, StatusEffectKind,
};
use crate::stats::{ResolvedStats, StatResolver, resolve_stats};

/// Actor ids mixed into roll seeds so both sides of a fight draw independently.
pub(crate) const PLAYER_ACTOR: u32 = 0;
pub(crate) const ENEMY_ACTOR: u32 = 1;

pub struct GameEngine {
    config: GameConfig,
    player: PlayerState,
    resolver: StatResolver,
    events: EventBus,
    mining: Option<MiningSession>,
    game_seed: u64,
    nonce: u64,
}

impl GameEngine {
    /// A fresh level-1 player using `trees` as the skill catalog.
    pub fn new(
        config: GameConfig,
        trees: impl IntoIterator<Item = SkillTreeDefinition>,
        game_seed: u64,
    ) -> Result<Self, SkillTreeError> {
        let skills = SkillBook::new(trees)?;
        let player = PlayerState::new(&config, skills);
        Ok(Self::from_player(config, player, game_seed))
    }

    pub fn from_player(config: GameConfig, player: PlayerState, game_seed: u64) -> Self {
        Self {
            config,
            player,
            resolver: StatResolver::new(),
            events: EventBus::new(),
            mining: None,
            game_seed,
            nonce: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn subscribe(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&GameEvent) + Send + 'static,
    ) -> SubscriptionId {
        self.events.subscribe(kind, handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.publish(&event);
    }

    /// Seed material for the next random action; advances the nonce.
    fn next_roll_seed(&mut self, actor: u32) -> RollSeed {
        let seed = RollSeed::new(self.game_seed, self.nonce, actor);
        self.nonce += 1;
        seed
    }

    // ===== stats =====

    /// Current resolved stats.
    ///
    /// Recomputed from scratch whenever any source changed since the last
    /// read. Current health is clamped to the resolved maximum.
    pub fn stats(&mut self) -> &ResolvedStats {
        let max_health = self.resolve().max_health;
        if self.player.progression.health() > max_health {
            self.player.progression.set_health(max_health);
        }
        self.resolve()
    }

    /// Re-resolves after a stat source changed so current health never
    /// exceeds the new maximum.
    fn clamp_health(&mut self) {
        self.stats();
    }

    fn resolve(&mut self) -> &ResolvedStats {
        let player = &self.player;
        self.resolver.resolve(player.resolution_key(), || {
            let skills = player.skills.total_stats_from_skills();
            resolve_stats(&player.stat_sources(&skills))
        })
    }

    /// Number of full stat recomputations so far.
    pub fn stat_recomputations(&self) -> u64 {
        self.resolver.recomputations()
    }

    pub fn health(&self) -> f64 {
        self.player.progression.health()
    }

    // ===== progression =====

    /// Adds experience; each level gained grants one skill point and a full heal.
    pub fn gain_experience(&mut self, amount: u64) -> LevelUpReport {
        let report = self.player.progression.gain_experience(amount, &self.config);
        if report.leveled_up() {
            self.player.skills.add_skill_points(report.levels_gained);
            let max_health = self.stats().max_health;
            self.player.progression.set_health(max_health);
            self.emit(GameEvent::LevelUp {
                level: report.new_level,
                levels_gained: report.levels_gained,
            });
        }
        report
    }

    // ===== skills =====

    pub fn add_skill_points(&mut self, points: u32) {
        self.player.skills.add_skill_points(points);
    }

    pub fn unlock_skill(&mut self, skill_id: &str, tree_id: &str) -> Result<u32, SkillError> {
        let level = self.player.skills.unlock_skill(skill_id, tree_id)?;
        self.clamp_health();
        self.emit(GameEvent::SkillUnlocked {
            skill: skill_id.to_owned(),
            tree: tree_id.to_owned(),
            level,
        });
        Ok(level)
    }

    pub fn reset_skills(&mut self) {
        self.player.skills.reset_skills();
        self.clamp_health();
        let refunded = self.player.skills.skill_points();
        self.emit(GameEvent::SkillsReset { refunded });
    }

    // ===== status effects =====

    pub fn apply_status(&mut self, kind: StatusEffectKind, duration_ms: u32, magnitude: f64) {
        self.player.status.add(kind, duration_ms, magnitude);
        self.clamp_health();
        self.emit(GameEvent::StatusApplied {
            kind,
            duration_ms,
            magnitude,
        });
    }

    pub fn remove_status(&mut self, kind: StatusEffectKind) -> Option<StatusEffect> {
        let removed = self.player.status.remove(kind);
        self.clamp_health();
        removed
    }

    /// Advances status timers by `dt_ms`. Returns the kinds that expired.
    ///
    /// Mining progress is driven separately by
    /// [`GameEngine::advance_mining`] since it needs static data.
    pub fn tick(&mut self, dt_ms: u32) -> Vec<StatusEffectKind> {
        let expired = self.player.status.tick(dt_ms);
        if !expired.is_empty() {
            self.clamp_health();
        }
        for &kind in &expired {
            self.emit(GameEvent::StatusExpired { kind });
        }
        expired
    }

    // ===== persistence =====

    pub fn snapshot(&self) -> PlayerSnapshot {
        self.player.snapshot()
    }

    /// Replaces the player with `snapshot`, keeping the current skill catalog.
    ///
    /// Any in-progress mining session is discarded.
    pub fn restore(&mut self, snapshot: PlayerSnapshot) -> Result<(), SkillTreeError> {
        let trees: Vec<SkillTreeDefinition> = self.player.skills.trees().cloned().collect();
        self.player = PlayerState::restore(snapshot, &self.config, trees)?;
        self.mining = None;
        self.resolver.invalidate();
        self.clamp_health();
        tracing::debug!(level = self.player.progression.level(), "player restored");
        Ok(())
    }
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("player", &self.player)
            .field("mining", &self.mining)
            .field("nonce", &self.nonce)
            .finish_non_exhaustive()
    }
}
