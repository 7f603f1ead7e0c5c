#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use mine_core::{
    DropCount, DropEntry, DropKind, EnemyTemplate, EquipmentSlot, EquipmentTemplate, EventKind,
    GameConfig, GameEngine, GameEvent, MaterialDefinition, MaterialTrait, SkillDefinition,
    SkillEffect, SkillTreeDefinition, StatBlock, StatKind, StaticTables,
};

pub const SEED: u64 = 0x5eed;

/// Installs a test-writer subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn skill_trees() -> Vec<SkillTreeDefinition> {
    vec![
        SkillTreeDefinition::new("combat", "Combat")
            .with_skill(
                SkillDefinition::new("power_1", 1, 1, 5)
                    .with_effect(SkillEffect::Stat(StatKind::Attack, 2.0)),
            )
            .with_skill(
                SkillDefinition::new("power_2", 2, 2, 3)
                    .requires("power_1")
                    .with_effect(SkillEffect::Stat(StatKind::Attack, 5.0)),
            ),
        SkillTreeDefinition::new("defense", "Defense")
            .with_skill(
                SkillDefinition::new("vitality", 1, 1, 3)
                    .with_effect(SkillEffect::Stat(StatKind::MaxHealth, 20.0)),
            )
            .with_skill(
                SkillDefinition::new("undying", 2, 3, 1)
                    .requires("vitality")
                    .with_effect(SkillEffect::Immortal),
            ),
    ]
}

pub fn tables() -> StaticTables {
    StaticTables::new()
        .with_material(
            MaterialDefinition::new("stone", 1.0, 1, 1_000)
                .with_name("Stone")
                .with_experience(10),
        )
        .with_material(
            MaterialDefinition::new("ruby", 1.0, 50, 1_000)
                .with_name("Ruby")
                .with_experience(40)
                .with_trait(MaterialTrait::Rare),
        )
        .with_material(
            MaterialDefinition::new("void_ore", 1.0, 5, 1_000)
                .with_name("Void Ore")
                .with_trait(MaterialTrait::Cursed),
        )
        .with_material(
            MaterialDefinition::new("adamantite", 8.0, 500, 4_000)
                .with_name("Adamantite")
                .with_trait(MaterialTrait::Legendary),
        )
        .with_material(MaterialDefinition::new("bone", 0.0, 1, 100).with_name("Bone"))
        .with_equipment(
            EquipmentTemplate::new("iron_pickaxe", EquipmentSlot::Pickaxe)
                .with_name("Iron Pickaxe")
                .with_stats(
                    StatBlock::new()
                        .with(StatKind::MiningPower, 3.0)
                        .with(StatKind::MiningEfficiency, 20.0),
                )
                .with_durability(2),
        )
        .with_equipment(
            EquipmentTemplate::new("miner_helmet", EquipmentSlot::Helmet)
                .with_name("Miner Helmet")
                .with_stats(StatBlock::new().with(StatKind::Defense, 4.0))
                .with_level_requirement(3),
        )
        .with_enemy(
            EnemyTemplate::new("slime", 10.0, 8.0, 0.0)
                .with_name("Slime")
                .with_experience(100)
                .with_drop(DropEntry::new(
                    DropKind::Material("bone".into()),
                    1.0,
                    DropCount::Fixed(2),
                )),
        )
        .with_enemy(EnemyTemplate::new("titan", 1_000.0, 10_000.0, 0.0).with_name("Titan"))
}

pub fn engine() -> GameEngine {
    init_tracing();
    match GameEngine::new(GameConfig::default(), skill_trees(), SEED) {
        Ok(engine) => engine,
        Err(error) => panic!("fixture skill trees are invalid: {error}"),
    }
}

/// Records every event of `kinds` published by `engine`.
pub fn record(engine: &mut GameEngine, kinds: &[EventKind]) -> Arc<Mutex<Vec<GameEvent>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    for &kind in kinds {
        let log = Arc::clone(&log);
        engine.subscribe(kind, move |event| log.lock().unwrap().push(event.clone()));
    }
    log
}
