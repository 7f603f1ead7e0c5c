use super::{ENEMY_ACTOR, GameEngine, PLAYER_ACTOR};
use crate::combat::{
    CombatError, DamageOutcome, DamageRolls, EnemyState, LootDrop, apply_damage,
    calculate_damage, roll_loot,
};
use crate::env::{DropKind, GameEnv, OracleError};
use crate::events::GameEvent;
use crate::state::{InventoryError, Item, LevelUpReport};

/// Result of one player attack.
#[derive(Clone, Debug, PartialEq)]
pub struct AttackReport {
    pub outcome: DamageOutcome,
    pub defeated: bool,
    /// Drops that made it into the inventory.
    pub loot: Vec<LootDrop>,
    /// Drops (or the rejected part of a drop) that did not fit.
    pub overflow: Vec<LootDrop>,
    pub level_up: LevelUpReport,
}

impl GameEngine {
    /// Attacks `enemy` with the player's resolved stats.
    ///
    /// A killing blow grants the template's experience and rolls its drop
    /// table into the inventory. Every drop in the table must resolve
    /// against `env` before the blow lands.
    pub fn attack(
        &mut self,
        enemy: &mut EnemyState,
        env: GameEnv<'_>,
    ) -> Result<AttackReport, CombatError> {
        if enemy.is_defeated() {
            return Err(CombatError::EnemyDefeated(enemy.template_id.clone()));
        }
        if self.player.progression.is_dead() {
            return Err(CombatError::PlayerDefeated);
        }
        let template = env.enemy(&enemy.template_id)?;
        let rng = env.rng()?;
        let drop_items = template
            .drop_table
            .iter()
            .map(|entry| drop_item(env, &entry.kind).map(|item| (&entry.kind, item)))
            .collect::<Result<Vec<_>, OracleError>>()?;

        let seed = self.next_roll_seed(PLAYER_ACTOR);
        let attacker = self.stats().combat();
        let outcome = calculate_damage(
            &attacker,
            &template.combat_stats(),
            DamageRolls::roll(rng, seed),
        );
        enemy.health = apply_damage(enemy.health, outcome.damage);
        tracing::debug!(
            enemy = %template.id,
            damage = outcome.damage,
            critical = outcome.critical,
            remaining = enemy.health,
            "player attack"
        );

        let mut report = AttackReport {
            outcome,
            defeated: enemy.is_defeated(),
            loot: Vec::new(),
            overflow: Vec::new(),
            level_up: LevelUpReport {
                levels_gained: 0,
                new_level: self.player.progression.level(),
            },
        };
        if !report.defeated {
            return Ok(report);
        }

        for found in roll_loot(&template.drop_table, rng, seed) {
            let resolved = drop_items.iter().find(|(kind, _)| **kind == found.kind);
            let Some((_, item)) = resolved else {
                continue;
            };
            match self.player.inventory.add_item(item, found.count) {
                Ok(()) => report.loot.push(found),
                Err(InventoryError::Full { placed, rejected }) => {
                    if placed > 0 {
                        report.loot.push(LootDrop {
                            kind: found.kind.clone(),
                            count: placed,
                        });
                    }
                    report.overflow.push(LootDrop {
                        kind: found.kind,
                        count: rejected,
                    });
                }
                Err(error) => {
                    tracing::warn!(%error, "loot rejected");
                    report.overflow.push(found);
                }
            }
        }

        self.emit(GameEvent::EnemyDefeated {
            enemy: template.id.clone(),
            experience: template.experience,
            loot: report.loot.clone(),
        });
        report.level_up = self.gain_experience(template.experience);
        Ok(report)
    }

    /// Resolves an attack by `enemy` against the player.
    ///
    /// Immunity blocks all damage; the immortal skill keeps health at 1 or
    /// above.
    pub fn receive_attack(
        &mut self,
        enemy: &EnemyState,
        env: GameEnv<'_>,
    ) -> Result<DamageOutcome, CombatError> {
        if enemy.is_defeated() {
            return Err(CombatError::EnemyDefeated(enemy.template_id.clone()));
        }
        if self.player.progression.is_dead() {
            return Err(CombatError::PlayerDefeated);
        }
        let template = env.enemy(&enemy.template_id)?;
        let rng = env.rng()?;

        let seed = self.next_roll_seed(ENEMY_ACTOR);
        let stats = self.stats();
        let defender = stats.combat();
        let immortal = stats.is_immortal();
        let outcome = calculate_damage(
            &template.combat_stats(),
            &defender,
            DamageRolls::roll(rng, seed),
        );

        let mut health = apply_damage(self.player.progression.health(), outcome.damage);
        if immortal {
            health = health.max(1.0);
        }
        self.player.progression.set_health(health);
        tracing::debug!(
            enemy = %template.id,
            damage = outcome.damage,
            critical = outcome.critical,
            health,
            "player hit"
        );
        Ok(outcome)
    }
}

fn drop_item(env: GameEnv<'_>, kind: &DropKind) -> Result<Item, OracleError> {
    Ok(match kind {
        DropKind::Material(id) => env.material(id)?.to_item(),
        DropKind::Equipment(id) => env.equipment_template(id)?.instantiate(),
    })
}
