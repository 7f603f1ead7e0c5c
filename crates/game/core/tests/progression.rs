mod common;

use common::{engine, record, tables};
use mine_core::{
    EquipmentSlot, EventKind, GameEvent, Item, SkillError, StatBlock, StatKind, StatusEffectKind,
    state::DurabilityOutcome,
};

#[test]
fn large_experience_grant_levels_twice_and_heals() {
    let mut engine = engine();
    let events = record(&mut engine, &[EventKind::LevelUp]);

    let report = engine.gain_experience(250);

    assert_eq!(report.levels_gained, 2);
    assert_eq!(engine.player().progression.level(), 3);
    assert_eq!(engine.player().skills.skill_points(), 2);
    assert_eq!(engine.player().skills.total_earned(), 2);
    assert_eq!(engine.stats().max_health, 120.0);
    assert_eq!(engine.health(), 120.0);
    assert_eq!(
        *events.lock().unwrap(),
        vec![GameEvent::LevelUp {
            level: 3,
            levels_gained: 2
        }]
    );
}

#[test]
fn skills_feed_resolved_stats_and_reset_refunds() {
    let mut engine = engine();
    engine.add_skill_points(10);
    let base_attack = engine.stats().attack;

    for _ in 0..5 {
        engine.unlock_skill("power_1", "combat").unwrap();
    }
    assert_eq!(engine.unlock_skill("power_2", "combat"), Ok(1));
    assert_eq!(engine.stats().attack, base_attack + 2.0 * 5.0 + 5.0);
    assert_eq!(engine.player().skills.skill_points(), 3);

    engine.reset_skills();
    assert_eq!(engine.player().skills.skill_points(), 10);
    assert_eq!(engine.stats().attack, base_attack);
}

#[test]
fn tier_two_waits_for_mastered_prerequisite() {
    let mut engine = engine();
    engine.add_skill_points(20);

    for _ in 0..4 {
        engine.unlock_skill("power_1", "combat").unwrap();
        assert!(matches!(
            engine.unlock_skill("power_2", "combat"),
            Err(SkillError::PrerequisiteNotMastered { .. })
        ));
    }
    engine.unlock_skill("power_1", "combat").unwrap();
    assert!(engine.unlock_skill("power_2", "combat").is_ok());
}

#[test]
fn max_health_skill_clamps_current_health_after_reset() {
    let mut engine = engine();
    engine.add_skill_points(5);
    engine.unlock_skill("vitality", "defense").unwrap();
    assert_eq!(engine.stats().max_health, 120.0);

    // Level-up heals to the boosted pool.
    engine.gain_experience(100);
    assert_eq!(engine.health(), 130.0);

    engine.reset_skills();
    assert_eq!(engine.health(), 110.0);
    assert_eq!(engine.stats().max_health, 110.0);
}

#[test]
fn unequipping_max_health_gear_clamps_health_immediately() {
    let mut engine = engine();
    let plate = Item::equipment("plate", "Plate", EquipmentSlot::Armor)
        .with_stats(StatBlock::new().with(StatKind::MaxHealth, 50.0));
    engine.equip(&plate, EquipmentSlot::Armor).unwrap();

    engine.gain_experience(100);
    assert_eq!(engine.health(), 160.0);

    engine.unequip(EquipmentSlot::Armor);
    assert_eq!(engine.health(), 110.0);
    assert_eq!(engine.snapshot().progression.health, 110.0);
}

#[test]
fn broken_max_health_gear_clamps_health_immediately() {
    let mut engine = engine();
    let plate = Item::equipment("plate", "Plate", EquipmentSlot::Armor)
        .with_stats(StatBlock::new().with(StatKind::MaxHealth, 50.0))
        .with_durability(1);
    engine.equip(&plate, EquipmentSlot::Armor).unwrap();
    engine.gain_experience(100);

    let outcome = engine.damage_equipment(EquipmentSlot::Armor, 1).unwrap();
    assert!(matches!(outcome, DurabilityOutcome::Broken(_)));
    assert_eq!(engine.health(), 110.0);
}

#[test]
fn equip_then_unequip_restores_everything() {
    let mut engine = engine();
    let pickaxe = tables().equipment["iron_pickaxe"].instantiate();

    let equipment_before = engine.player().equipment.snapshot();
    let bonuses_before = engine.player().equipment.stat_bonuses().clone();
    let stats_before = engine.stats().clone();

    assert_eq!(engine.equip(&pickaxe, EquipmentSlot::Pickaxe), Ok(None));
    assert_eq!(engine.stats().mining_power, stats_before.mining_power + 3.0);
    assert_eq!(engine.stats().mining_efficiency, 20.0);

    let removed = engine.unequip(EquipmentSlot::Pickaxe);
    assert_eq!(removed, Some(pickaxe));
    assert_eq!(engine.player().equipment.snapshot(), equipment_before);
    assert_eq!(engine.player().equipment.stat_bonuses(), &bonuses_before);
    assert_eq!(engine.stats(), &stats_before);
}

#[test]
fn equip_rejects_wrong_slot_and_low_level() {
    let mut engine = engine();
    let tables = tables();
    let helmet = tables.equipment["miner_helmet"].instantiate();

    assert!(engine.equip(&helmet, EquipmentSlot::Boots).is_err());
    assert!(engine.equip(&helmet, EquipmentSlot::Helmet).is_err());

    engine.gain_experience(250);
    assert_eq!(engine.equip(&helmet, EquipmentSlot::Helmet), Ok(None));
    assert_eq!(engine.stats().defense, 7.0 + 4.0);
}

#[test]
fn equip_from_inventory_swaps_with_previous_occupant() {
    let mut engine = engine();
    let tables = tables();
    let first = tables.equipment["iron_pickaxe"].instantiate();
    let second = tables.equipment["iron_pickaxe"]
        .instantiate()
        .with_bonus_stats(mine_core::StatBlock::new().with(StatKind::MiningPower, 1.0));

    engine.add_item(&first, 1).unwrap();
    engine.add_item(&second, 1).unwrap();
    engine.equip_from_inventory(0).unwrap();
    assert_eq!(engine.player().inventory.get(0), None);

    engine.equip_from_inventory(1).unwrap();
    assert_eq!(
        engine.player().equipment.get(EquipmentSlot::Pickaxe),
        Some(&second)
    );
    assert_eq!(engine.player().inventory.get(0), Some(&first));
    assert_eq!(engine.player().inventory.get(1), None);
}

#[test]
fn equip_from_inventory_rejects_non_equipment() {
    let mut engine = engine();
    engine.add_item(&Item::resource("stone", "Stone", 1), 3).unwrap();

    assert!(matches!(
        engine.equip_from_inventory(0),
        Err(mine_core::GearError::NotEquipment(_))
    ));
    assert_eq!(engine.player().inventory.total_count("Stone"), 3);
}

#[test]
fn breaking_gear_unequips_and_notifies() {
    let mut engine = engine();
    let events = record(&mut engine, &[EventKind::ItemBroken]);
    let pickaxe = tables().equipment["iron_pickaxe"].instantiate();
    engine.equip(&pickaxe, EquipmentSlot::Pickaxe).unwrap();
    let boosted = engine.stats().mining_power;

    assert_eq!(
        engine.damage_equipment(EquipmentSlot::Pickaxe, 1),
        Ok(DurabilityOutcome::Intact { remaining: 1 })
    );
    assert_eq!(engine.repair_equipment(EquipmentSlot::Pickaxe, 10), Ok(Some(2)));

    let outcome = engine.damage_equipment(EquipmentSlot::Pickaxe, 5).unwrap();
    assert!(matches!(outcome, DurabilityOutcome::Broken(_)));
    assert!(engine.player().equipment.get(EquipmentSlot::Pickaxe).is_none());
    assert_eq!(engine.stats().mining_power, boosted - 3.0);
    assert_eq!(
        *events.lock().unwrap(),
        vec![GameEvent::ItemBroken {
            slot: EquipmentSlot::Pickaxe,
            item: "Iron Pickaxe".into()
        }]
    );
}

#[test]
fn status_expiry_triggers_recomputation() {
    let mut engine = engine();
    let events = record(&mut engine, &[EventKind::StatusApplied, EventKind::StatusExpired]);
    let base_speed = engine.stats().speed;

    engine.apply_status(StatusEffectKind::Haste, 1_000, 0.5);
    assert_eq!(engine.stats().speed, base_speed * 1.5);

    assert!(engine.tick(999).is_empty());
    assert_eq!(engine.stats().speed, base_speed * 1.5);

    assert_eq!(engine.tick(1), vec![StatusEffectKind::Haste]);
    assert_eq!(engine.stats().speed, base_speed);
    assert_eq!(events.lock().unwrap().len(), 2);
}

#[test]
fn reading_stats_twice_does_not_recompute() {
    let mut engine = engine();
    let first = engine.stats().clone();
    let recomputations = engine.stat_recomputations();

    let second = engine.stats().clone();
    assert_eq!(first, second);
    assert_eq!(engine.stat_recomputations(), recomputations);

    engine.apply_status(StatusEffectKind::Strength, 1_000, 1.0);
    engine.stats();
    assert!(engine.stat_recomputations() > recomputations);
}
